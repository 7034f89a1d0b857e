//! Section list controller.
//!
//! # Responsibility
//! - Own one section's ordered in-memory list.
//! - Mediate add/edit/remove against the profile store and adopt results.
//! - Apply reorders locally without a store call.
//!
//! # Invariants
//! - Add/edit are send-then-adopt: the local list changes only after the
//!   store returns its canonical list, which replaces the local list whole.
//! - Remove filters the local list only after the store confirms.
//! - A failed store call leaves the local list exactly as it was.
//! - No borrow of the list is held across an `.await`; concurrent writes
//!   resolve last-response-wins.
//! - Every completed store call emits exactly one acknowledgment.

use crate::model::entry::{Entry, EntryId, FieldMap};
use crate::model::section::SectionKind;
use crate::repo::profile_store::{ProfileStore, StoreError};
use crate::service::id_gen::EntryIdGenerator;
use crate::service::reorder::{apply_change, ReorderChange, ReorderError, StepDirection};
use crate::surface::Notifier;
use log::{info, warn};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type SectionResult<T> = Result<T, SectionError>;

/// Store-backed mutation kinds, used for messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionAction {
    Add,
    Edit,
    Delete,
    UpdateProfile,
}

impl SectionAction {
    fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit | Self::UpdateProfile => "update",
            Self::Delete => "delete",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Self::Add => "adding",
            Self::Edit | Self::UpdateProfile => "updating",
            Self::Delete => "deleting",
        }
    }

    fn object(self) -> &'static str {
        match self {
            Self::UpdateProfile => "profile",
            _ => "item",
        }
    }

    /// Failure acknowledgment text, preferring the server's message.
    pub fn failure_message(self, err: &StoreError) -> String {
        match err.server_message() {
            Some(message) => format!("Failed to {} {}: {message}", self.verb(), self.object()),
            None => format!(
                "An error occurred while {} the {}.",
                self.gerund(),
                self.object()
            ),
        }
    }
}

impl Display for SectionAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::UpdateProfile => "update_profile",
        })
    }
}

/// Errors returned by section and header operations.
#[derive(Debug)]
pub enum SectionError {
    /// Store call failed; already acknowledged to the user.
    Store {
        action: SectionAction,
        source: StoreError,
    },
    /// Edit targeted an id that is not in the local list.
    EntryNotFound(EntryId),
    /// Reorder gesture referenced an index outside the list.
    Reorder(ReorderError),
    /// Operation does not apply to this target.
    Unsupported(&'static str),
}

impl SectionError {
    /// Whether the user already received a failure acknowledgment.
    pub fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

impl Display for SectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { action, source } => write!(f, "{action} failed: {source}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Reorder(err) => write!(f, "{err}"),
            Self::Unsupported(operation) => write!(f, "operation not supported: {operation}"),
        }
    }
}

impl Error for SectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::Reorder(err) => Some(err),
            Self::EntryNotFound(_) | Self::Unsupported(_) => None,
        }
    }
}

impl From<ReorderError> for SectionError {
    fn from(value: ReorderError) -> Self {
        Self::Reorder(value)
    }
}

/// Collaborators shared by every controller on one page.
pub struct ServiceDeps<S: ProfileStore + ?Sized> {
    pub store: Arc<S>,
    pub notifier: Arc<dyn Notifier>,
    pub ids: Arc<dyn EntryIdGenerator>,
}

impl<S: ProfileStore + ?Sized> ServiceDeps<S> {
    pub fn new(
        store: Arc<S>,
        notifier: Arc<dyn Notifier>,
        ids: Arc<dyn EntryIdGenerator>,
    ) -> Self {
        Self {
            store,
            notifier,
            ids,
        }
    }
}

impl<S: ProfileStore + ?Sized> Clone for ServiceDeps<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
            ids: Arc::clone(&self.ids),
        }
    }
}

/// Counts store calls in flight; decrements even if the future is dropped.
pub(crate) struct PendingGuard<'a>(&'a Cell<usize>);

impl<'a> PendingGuard<'a> {
    pub(crate) fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Controller for one section list.
pub struct SectionService<S: ProfileStore + ?Sized> {
    kind: SectionKind,
    deps: ServiceDeps<S>,
    entries: RefCell<Vec<Entry>>,
    pending: Cell<usize>,
}

impl<S: ProfileStore + ?Sized> SectionService<S> {
    /// Creates a controller seeded with server-supplied entries.
    pub fn new(kind: SectionKind, initial: Vec<Entry>, deps: ServiceDeps<S>) -> Self {
        Self {
            kind,
            deps,
            entries: RefCell::new(initial),
            pending: Cell::new(0),
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Snapshot of the current display order.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Looks up one entry by id.
    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    /// Store calls issued by this controller that have not resolved yet.
    pub fn pending_operations(&self) -> usize {
        self.pending.get()
    }

    /// Appends a new entry built from `fields` and adopts the store's list.
    pub async fn add(&self, fields: FieldMap) -> SectionResult<()> {
        let entry = Entry::for_kind(self.kind, self.deps.ids.next_id(), &fields);
        let mut outgoing = self.entries();
        outgoing.push(entry);
        self.write_section(SectionAction::Add, outgoing).await
    }

    /// Shallow-merges `updates` into entry `id` and adopts the store's list.
    pub async fn edit(&self, id: EntryId, updates: FieldMap) -> SectionResult<()> {
        let outgoing = {
            let entries = self.entries.borrow();
            if !entries.iter().any(|entry| entry.id == id) {
                warn!(
                    "event=section_edit module=section status=error section={} error_code=entry_not_found",
                    self.kind
                );
                return Err(SectionError::EntryNotFound(id));
            }
            entries
                .iter()
                .map(|entry| {
                    if entry.id == id {
                        entry.merged(self.kind, &updates)
                    } else {
                        entry.clone()
                    }
                })
                .collect::<Vec<_>>()
        };
        self.write_section(SectionAction::Edit, outgoing).await
    }

    /// Deletes entry `id` in the store, then drops it locally.
    pub async fn remove(&self, id: EntryId) -> SectionResult<()> {
        let result = {
            let _pending = PendingGuard::enter(&self.pending);
            self.deps.store.delete_item(self.kind, id).await
        };
        match result {
            Ok(()) => {
                let remaining = {
                    let mut entries = self.entries.borrow_mut();
                    entries.retain(|entry| entry.id != id);
                    entries.len()
                };
                info!(
                    "event=section_delete module=section status=ok section={} entries={remaining}",
                    self.kind
                );
                self.deps.notifier.success("Item deleted successfully!");
                Ok(())
            }
            Err(err) => Err(self.fail(SectionAction::Delete, err)),
        }
    }

    /// Applies a reorder locally; returns whether the order changed.
    ///
    /// The new order is persisted only by the next add or edit.
    pub fn reorder(&self, change: ReorderChange) -> SectionResult<bool> {
        let reordered = apply_change(self.entries.borrow().as_slice(), change)?;
        let changed = {
            let mut entries = self.entries.borrow_mut();
            let changed = entries
                .iter()
                .map(|entry| entry.id)
                .ne(reordered.iter().map(|entry| entry.id));
            *entries = reordered;
            changed
        };

        if changed {
            if let ReorderChange::Step { direction, .. } = change {
                self.deps.notifier.success(match direction {
                    StepDirection::Up => "Item moved up!",
                    StepDirection::Down => "Item moved down!",
                });
            }
        }
        Ok(changed)
    }

    /// Convenience for the move-up button.
    pub fn move_up(&self, index: usize) -> SectionResult<bool> {
        self.reorder(ReorderChange::Step {
            index,
            direction: StepDirection::Up,
        })
    }

    /// Convenience for the move-down button.
    pub fn move_down(&self, index: usize) -> SectionResult<bool> {
        self.reorder(ReorderChange::Step {
            index,
            direction: StepDirection::Down,
        })
    }

    async fn write_section(
        &self,
        action: SectionAction,
        outgoing: Vec<Entry>,
    ) -> SectionResult<()> {
        let result = {
            let _pending = PendingGuard::enter(&self.pending);
            self.deps.store.replace_section(self.kind, &outgoing).await
        };
        match result {
            Ok(canonical) => {
                info!(
                    "event=section_{action} module=section status=ok section={} sent={} adopted={}",
                    self.kind,
                    outgoing.len(),
                    canonical.len()
                );
                *self.entries.borrow_mut() = canonical;
                let verb = if action == SectionAction::Add {
                    "added"
                } else {
                    "updated"
                };
                self.deps
                    .notifier
                    .success(&format!("{} successfully {verb}!", self.kind.label()));
                Ok(())
            }
            Err(err) => Err(self.fail(action, err)),
        }
    }

    fn fail(&self, action: SectionAction, err: StoreError) -> SectionError {
        warn!(
            "event=section_{action} module=section status=error section={} error_code={}",
            self.kind,
            err.code()
        );
        self.deps.notifier.failure(&action.failure_message(&err));
        SectionError::Store {
            action,
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SectionAction;
    use crate::repo::profile_store::StoreError;

    #[test]
    fn failure_message_prefers_server_text() {
        let err = StoreError::Rejected {
            status: 409,
            message: "conflict".to_string(),
        };
        assert_eq!(
            SectionAction::Delete.failure_message(&err),
            "Failed to delete item: conflict"
        );
        assert_eq!(
            SectionAction::UpdateProfile.failure_message(&err),
            "Failed to update profile: conflict"
        );
    }

    #[test]
    fn failure_message_falls_back_to_generic_text() {
        let err = StoreError::Transport("connection reset".to_string());
        assert_eq!(
            SectionAction::Add.failure_message(&err),
            "An error occurred while adding the item."
        );
        assert_eq!(
            SectionAction::Edit.failure_message(&StoreError::MalformedResponse("eof".into())),
            "An error occurred while updating the item."
        );
    }
}
