//! Profile header (scalar fields) editor.
//!
//! # Invariants
//! - Absent or empty submitted fields keep their current values.
//! - Local scalars change only after the store confirms the update.

use crate::model::entry::FieldMap;
use crate::model::profile::ProfileScalars;
use crate::repo::profile_store::ProfileStore;
use crate::service::section_service::{
    PendingGuard, SectionAction, SectionError, SectionResult, ServiceDeps,
};
use log::{info, warn};
use std::cell::{Cell, RefCell};

/// Controller for the name/email/picture header.
pub struct ProfileHeaderService<S: ProfileStore + ?Sized> {
    deps: ServiceDeps<S>,
    scalars: RefCell<ProfileScalars>,
    pending: Cell<usize>,
}

impl<S: ProfileStore + ?Sized> ProfileHeaderService<S> {
    pub fn new(initial: ProfileScalars, deps: ServiceDeps<S>) -> Self {
        Self {
            deps,
            scalars: RefCell::new(initial),
            pending: Cell::new(0),
        }
    }

    /// Snapshot of current scalar state.
    pub fn scalars(&self) -> ProfileScalars {
        self.scalars.borrow().clone()
    }

    pub fn pending_operations(&self) -> usize {
        self.pending.get()
    }

    /// Merges `updates` over current scalars and sends one whole-record update.
    pub async fn edit(&self, updates: FieldMap) -> SectionResult<()> {
        let merged = self.scalars.borrow().merged(&updates);
        let result = {
            let _pending = PendingGuard::enter(&self.pending);
            self.deps.store.replace_profile_scalars(&merged).await
        };

        match result {
            Ok(()) => {
                // Merge again over whatever is current now; another edit may
                // have resolved while this one was in flight.
                let next = self.scalars.borrow().merged(&updates);
                *self.scalars.borrow_mut() = next;
                info!("event=profile_update module=header status=ok");
                self.deps.notifier.success("Profile successfully updated!");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=profile_update module=header status=error error_code={}",
                    err.code()
                );
                self.deps
                    .notifier
                    .failure(&SectionAction::UpdateProfile.failure_message(&err));
                Err(SectionError::Store {
                    action: SectionAction::UpdateProfile,
                    source: err,
                })
            }
        }
    }
}
