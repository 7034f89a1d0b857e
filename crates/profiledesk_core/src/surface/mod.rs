//! Presentation collaborators used by the core.
//!
//! # Responsibility
//! - Define the narrow interfaces the core calls on the presentation layer:
//!   transient acknowledgments and the modal editing surface.
//! - Never expose or inspect presentation state.
//!
//! # Invariants
//! - Each completed mutation produces exactly one acknowledgment call.

use crate::model::entry::FieldMap;
use crate::model::section::EditorKind;
use log::{info, warn};

/// Transient user-visible acknowledgment sink (toasts).
pub trait Notifier {
    fn success(&self, message: &str);
    fn failure(&self, message: &str);
}

/// Notifier that only writes acknowledgments to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!("event=ack module=surface status=ok message={message:?}");
    }

    fn failure(&self, message: &str) {
        warn!("event=ack module=surface status=error message={message:?}");
    }
}

/// Everything an editing surface needs to render itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub kind: EditorKind,
    pub title: &'static str,
    /// Values to prefill; empty when creating a new record.
    pub initial_values: FieldMap,
    /// `Save` for edits, `Add` for new records.
    pub submit_label: &'static str,
}

/// Modal/drawer host for editor views.
pub trait EditorSurface {
    fn open(&self, view: EditorView);
    fn close(&self);
}
