//! Editing-surface bridge.
//!
//! # Responsibility
//! - Validate submitted field maps against the per-kind required table.
//! - Route valid submissions to a create or update on the bound target.
//! - Close the surface on success; keep it open on any failure.
//!
//! # Invariants
//! - Invalid submissions never reach the target or the store.
//! - A failed submission yields exactly one failure acknowledgment: the
//!   target's own, or the generic one emitted here.

use crate::model::entry::{Entry, EntryId, FieldMap};
use crate::model::profile::ProfileScalars;
use crate::model::section::{EditorKind, SectionKind};
use crate::repo::profile_store::ProfileStore;
use crate::service::header_service::ProfileHeaderService;
use crate::service::section_service::{SectionError, SectionResult, SectionService};
use crate::surface::{EditorSurface, EditorView, Notifier};
use async_trait::async_trait;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field name -> "`<Label>` is required." message.
pub type FieldErrors = BTreeMap<String, String>;

const GENERIC_FAILURE: &str = "An error occurred. Please try again.";

/// Checks required fields for `kind` and keeps only that kind's fields.
pub fn validate_submission(kind: EditorKind, fields: &FieldMap) -> Result<FieldMap, FieldErrors> {
    let errors = kind
        .required_fields()
        .filter(|spec| fields.get(spec.name).map_or(true, |value| value.is_empty()))
        .map(|spec| (spec.name.to_string(), format!("{} is required.", spec.label)))
        .collect::<FieldErrors>();
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(kind
        .fields()
        .iter()
        .filter_map(|spec| {
            fields
                .get(spec.name)
                .map(|value| (spec.name.to_string(), value.clone()))
        })
        .collect())
}

/// Record owner that an editor session writes through.
#[async_trait(?Send)]
pub trait EditTarget {
    fn editor_kind(&self) -> EditorKind;
    async fn create(&self, fields: FieldMap) -> SectionResult<()>;
    async fn update(&self, id: Option<EntryId>, fields: FieldMap) -> SectionResult<()>;
}

#[async_trait(?Send)]
impl<S: ProfileStore + ?Sized> EditTarget for SectionService<S> {
    fn editor_kind(&self) -> EditorKind {
        EditorKind::Section(self.kind())
    }

    async fn create(&self, fields: FieldMap) -> SectionResult<()> {
        self.add(fields).await
    }

    async fn update(&self, id: Option<EntryId>, fields: FieldMap) -> SectionResult<()> {
        let id = id.ok_or(SectionError::Unsupported("section edit without entry id"))?;
        self.edit(id, fields).await
    }
}

#[async_trait(?Send)]
impl<S: ProfileStore + ?Sized> EditTarget for ProfileHeaderService<S> {
    fn editor_kind(&self) -> EditorKind {
        EditorKind::Profile
    }

    async fn create(&self, _fields: FieldMap) -> SectionResult<()> {
        Err(SectionError::Unsupported("profile header has no add"))
    }

    async fn update(&self, _id: Option<EntryId>, fields: FieldMap) -> SectionResult<()> {
        self.edit(fields).await
    }
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields missing; surface stays open.
    Invalid(FieldErrors),
    /// Target accepted the write; surface closed.
    Saved,
    /// Target failed; surface stays open for a retry.
    Failed,
}

/// One open editing surface bound to a record kind.
pub struct EditorSession {
    surface: Arc<dyn EditorSurface>,
    notifier: Arc<dyn Notifier>,
    kind: EditorKind,
    existing: Option<EntryId>,
    is_edit: bool,
}

impl EditorSession {
    /// Opens an empty editor for a new section entry.
    pub fn open_new(
        surface: Arc<dyn EditorSurface>,
        notifier: Arc<dyn Notifier>,
        section: SectionKind,
    ) -> Self {
        Self::open(
            surface,
            notifier,
            EditorKind::Section(section),
            None,
            None,
        )
    }

    /// Opens an editor prefilled with an existing entry.
    pub fn open_entry(
        surface: Arc<dyn EditorSurface>,
        notifier: Arc<dyn Notifier>,
        section: SectionKind,
        entry: &Entry,
    ) -> Self {
        Self::open(
            surface,
            notifier,
            EditorKind::Section(section),
            Some(entry.id),
            Some(entry.fields.clone()),
        )
    }

    /// Opens the profile header editor.
    pub fn open_profile(
        surface: Arc<dyn EditorSurface>,
        notifier: Arc<dyn Notifier>,
        scalars: &ProfileScalars,
    ) -> Self {
        Self::open(
            surface,
            notifier,
            EditorKind::Profile,
            None,
            Some(scalars.to_field_map()),
        )
    }

    fn open(
        surface: Arc<dyn EditorSurface>,
        notifier: Arc<dyn Notifier>,
        kind: EditorKind,
        existing: Option<EntryId>,
        initial_values: Option<FieldMap>,
    ) -> Self {
        let is_edit = initial_values.is_some();
        surface.open(EditorView {
            kind,
            title: kind.title(),
            initial_values: initial_values.unwrap_or_default(),
            submit_label: if is_edit { "Save" } else { "Add" },
        });
        Self {
            surface,
            notifier,
            kind,
            existing,
            is_edit,
        }
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    /// Validates `fields` and writes them through `target`.
    pub async fn submit<T: EditTarget + ?Sized>(
        &self,
        fields: FieldMap,
        target: &T,
    ) -> SubmitOutcome {
        let validated = match validate_submission(self.kind, &fields) {
            Ok(validated) => validated,
            Err(errors) => {
                info!(
                    "event=editor_submit module=editor status=invalid missing={}",
                    errors.len()
                );
                return SubmitOutcome::Invalid(errors);
            }
        };

        let result = if target.editor_kind() != self.kind {
            Err(SectionError::Unsupported("editor bound to a different kind"))
        } else if self.is_edit {
            target.update(self.existing, validated).await
        } else {
            target.create(validated).await
        };

        match result {
            Ok(()) => {
                self.surface.close();
                SubmitOutcome::Saved
            }
            Err(err) => {
                if !err.is_acknowledged() {
                    warn!("event=editor_submit module=editor status=error error={err}");
                    self.notifier.failure(GENERIC_FAILURE);
                }
                SubmitOutcome::Failed
            }
        }
    }
}
