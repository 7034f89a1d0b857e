//! SQLite-backed profile store.
//!
//! # Responsibility
//! - Provide a durable local implementation of the profile store contract.
//! - Keep section order in an explicit `position` column.
//!
//! # Invariants
//! - Every store call runs in a single transaction.
//! - Section reads are ordered by `position ASC`.
//! - One replace-section call never persists two entries with the same id:
//!   later duplicates are remapped to fresh ids above the current maximum.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::entry::{Entry, EntryId, FieldMap};
use crate::model::profile::{Profile, ProfileScalars};
use crate::model::section::SectionKind;
use crate::repo::profile_store::{ProfileStore, StoreError, StoreResult};
use async_trait::async_trait;
use log::info;
use rusqlite::{params, Connection, Transaction};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

/// Local profile store over one migrated SQLite connection.
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
}

impl SqliteProfileStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a fresh in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Overwrites the stored profile with `profile`, sections included.
    pub fn import_profile(&self, profile: &Profile) -> StoreResult<()> {
        self.with_tx(|tx| {
            write_scalars(tx, &profile.scalars)?;
            tx.execute(
                "UPDATE profile SET external_id = ?1 WHERE singleton = 1;",
                params![profile.id],
            )?;
            for kind in SectionKind::ALL {
                write_section(tx, kind, profile.section(kind))?;
            }
            Ok(())
        })
    }

    fn with_tx<T>(&self, work: impl FnOnce(&Transaction<'_>) -> StoreResult<T>) -> StoreResult<T> {
        let mut conn = self.conn.lock().map_err(|_| {
            StoreError::Db(DbError::InvalidData(
                "profile store connection lock poisoned".to_string(),
            ))
        })?;
        let tx = conn.transaction()?;
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn fetch_profile(&self) -> StoreResult<Profile> {
        self.with_tx(|tx| {
            let (id, scalars) = tx.query_row(
                "SELECT external_id, name, email, profile_picture FROM profile WHERE singleton = 1;",
                [],
                |row| {
                    Ok((
                        row.get::<_, Option<String>>(0)?,
                        ProfileScalars {
                            name: row.get(1)?,
                            email: row.get(2)?,
                            profile_picture: row.get(3)?,
                        },
                    ))
                },
            )?;
            let mut profile = Profile {
                id,
                scalars,
                ..Profile::default()
            };
            for kind in SectionKind::ALL {
                *profile.section_mut(kind) = read_section(tx, kind)?;
            }
            Ok(profile)
        })
    }

    async fn replace_section(
        &self,
        section: SectionKind,
        entries: &[Entry],
    ) -> StoreResult<Vec<Entry>> {
        let (canonical, remapped) = self.with_tx(|tx| {
            let (normalized, remapped) = normalize_ids(entries);
            write_section(tx, section, &normalized)?;
            Ok((read_section(tx, section)?, remapped))
        })?;
        info!(
            "event=store_replace_section module=store status=ok section={section} entries={} remapped={remapped}",
            canonical.len()
        );
        Ok(canonical)
    }

    async fn delete_item(&self, section: SectionKind, id: EntryId) -> StoreResult<()> {
        let removed = self.with_tx(|tx| {
            Ok(tx.execute(
                "DELETE FROM section_entries WHERE section = ?1 AND entry_id = ?2;",
                params![section.wire_name(), id.get()],
            )?)
        })?;
        if removed == 0 {
            return Err(StoreError::Rejected {
                status: 404,
                message: format!("entry {id} not found in {section}"),
            });
        }
        Ok(())
    }

    async fn replace_profile_scalars(&self, scalars: &ProfileScalars) -> StoreResult<()> {
        self.with_tx(|tx| write_scalars(tx, scalars))
    }
}

fn write_scalars(tx: &Transaction<'_>, scalars: &ProfileScalars) -> StoreResult<()> {
    tx.execute(
        "UPDATE profile SET name = ?1, email = ?2, profile_picture = ?3 WHERE singleton = 1;",
        params![scalars.name, scalars.email, scalars.profile_picture],
    )?;
    Ok(())
}

fn write_section(tx: &Transaction<'_>, section: SectionKind, entries: &[Entry]) -> StoreResult<()> {
    tx.execute(
        "DELETE FROM section_entries WHERE section = ?1;",
        params![section.wire_name()],
    )?;
    let mut stmt = tx.prepare(
        "INSERT INTO section_entries (section, entry_id, position, fields_json)
         VALUES (?1, ?2, ?3, ?4);",
    )?;
    for (position, entry) in entries.iter().enumerate() {
        let fields_json = serde_json::to_string(&entry.fields)
            .map_err(|err| DbError::InvalidData(err.to_string()))?;
        stmt.execute(params![
            section.wire_name(),
            entry.id.get(),
            position as i64,
            fields_json
        ])?;
    }
    Ok(())
}

fn read_section(tx: &Transaction<'_>, section: SectionKind) -> StoreResult<Vec<Entry>> {
    let mut stmt = tx.prepare(
        "SELECT entry_id, fields_json
         FROM section_entries
         WHERE section = ?1
         ORDER BY position ASC, entry_id ASC;",
    )?;
    let rows = stmt.query_map(params![section.wire_name()], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, fields_json) = row?;
        let fields: FieldMap = serde_json::from_str(&fields_json).map_err(|err| {
            DbError::InvalidData(format!("entry {id} in {section}: {err}"))
        })?;
        entries.push(Entry::new(id, fields));
    }
    Ok(entries)
}

/// Returns entries with duplicate ids remapped, plus the remap count.
fn normalize_ids(entries: &[Entry]) -> (Vec<Entry>, usize) {
    let mut next_free = entries.iter().map(|entry| entry.id.get()).max().unwrap_or(0);
    let mut seen = HashSet::new();
    let mut remapped = 0;
    let normalized = entries
        .iter()
        .map(|entry| {
            let mut entry = entry.clone();
            if !seen.insert(entry.id) {
                next_free += 1;
                entry.id = EntryId(next_free);
                seen.insert(entry.id);
                remapped += 1;
            }
            entry
        })
        .collect();
    (normalized, remapped)
}

#[cfg(test)]
mod tests {
    use super::normalize_ids;
    use crate::model::entry::{Entry, EntryId, FieldMap};

    #[test]
    fn normalize_ids_remaps_later_duplicates_only() {
        let entries = vec![
            Entry::new(4, FieldMap::new()),
            Entry::new(9, FieldMap::new()),
            Entry::new(4, FieldMap::new()),
        ];
        let (normalized, remapped) = normalize_ids(&entries);
        let ids = normalized.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![EntryId(4), EntryId(9), EntryId(10)]);
        assert_eq!(remapped, 1);
    }
}
