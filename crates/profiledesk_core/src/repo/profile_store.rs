//! Profile store contract.
//!
//! # Responsibility
//! - Define the four remote operations the core relies on.
//! - Classify store failures so callers can build user-facing messages.
//!
//! # Invariants
//! - Each call is applied atomically by the store or not at all.
//! - `replace_section` receives the entire target list, never a diff, and
//!   returns the store's canonical list for that section.
//! - Implementations never retry or time out on their own; a call resolves
//!   only when the underlying transport does.

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId};
use crate::model::profile::{Profile, ProfileScalars};
use crate::model::section::SectionKind;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of one store call.
#[derive(Debug)]
pub enum StoreError {
    /// Request never produced a response (connect/reset/DNS).
    Transport(String),
    /// Store answered with a non-success status.
    Rejected { status: u16, message: String },
    /// Response body could not be decoded into the expected shape.
    MalformedResponse(String),
    /// Local storage failure in the SQLite-backed store.
    Db(DbError),
}

impl StoreError {
    /// Server-provided error text, when the store sent any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => {
                let trimmed = message.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Rejected { .. } => "rejected",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Db(_) => "db",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "store unreachable: {message}"),
            Self::Rejected { status, message } => {
                write!(f, "store rejected request with status {status}: {message}")
            }
            Self::MalformedResponse(message) => write!(f, "malformed store response: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence endpoint for one profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Reads the whole profile.
    async fn fetch_profile(&self) -> StoreResult<Profile>;
    /// Writes an entire section list and returns the canonical list.
    async fn replace_section(
        &self,
        section: SectionKind,
        entries: &[Entry],
    ) -> StoreResult<Vec<Entry>>;
    /// Removes one entry from a section.
    async fn delete_item(&self, section: SectionKind, id: EntryId) -> StoreResult<()>;
    /// Replaces the three scalar identity fields.
    async fn replace_profile_scalars(&self, scalars: &ProfileScalars) -> StoreResult<()>;
}
