//! Profile store schema versions.
//!
//! # Schema
//! - v1 `profile`: one row (`singleton = 1`) holding the scalar identity
//!   fields and the optional external id of the profile.
//! - v2 `section_entries`: one row per entry, keyed by `(section, entry_id)`,
//!   with display order in `position` and the field bag as JSON text.
//!
//! # Invariants
//! - Versions are contiguous from 1; a database is never downgraded.
//! - All pending steps commit together, then `PRAGMA user_version` is the
//!   last applied version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "profile",
        sql: include_str!("0001_profile.sql"),
    },
    SchemaStep {
        version: 2,
        name: "section_entries",
        sql: include_str!("0002_section_entries.sql"),
    },
];

/// Highest schema version this build can open.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

fn pending_steps(current: u32) -> impl Iterator<Item = &'static SchemaStep> {
    SCHEMA_STEPS.iter().filter(move |step| step.version > current)
}

/// Brings the profile schema up to `latest_version()`.
///
/// Fails with `UnsupportedSchemaVersion` when the file was written by a
/// newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let tx = conn.transaction()?;
    let mut applied = 0;
    for step in pending_steps(current) {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
        applied += 1;
    }
    tx.commit()?;

    if applied > 0 {
        info!("event=db_migrate module=db status=done from={current} to={latest}");
    }
    Ok(())
}
