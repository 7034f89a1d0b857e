//! Core logic for ProfileDesk.
//! Owns the profile section lists, their reordering, and their
//! reconciliation with the profile store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod surface;

pub use config::{ConfigError, ProfileDeskConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::entry::{Entry, EntryId, FieldMap};
pub use model::profile::{Profile, ProfileScalars};
pub use model::section::{EditorKind, FieldSpec, SectionKind};
pub use repo::http_store::HttpProfileStore;
pub use repo::profile_store::{ProfileStore, StoreError, StoreResult};
pub use repo::sqlite_store::SqliteProfileStore;
pub use service::editor_service::{
    validate_submission, EditTarget, EditorSession, FieldErrors, SubmitOutcome,
};
pub use service::header_service::ProfileHeaderService;
pub use service::id_gen::{ClockIdGenerator, EntryIdGenerator};
pub use service::profile_page::ProfilePage;
pub use service::reorder::{
    apply_change, reorder_by_drag, reorder_by_step, ReorderChange, ReorderError, StepDirection,
};
pub use service::section_service::{
    SectionAction, SectionError, SectionResult, SectionService, ServiceDeps,
};
pub use surface::{EditorSurface, EditorView, LogNotifier, Notifier};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
