//! Profile page composition.
//!
//! # Responsibility
//! - Fetch the profile once and build the header editor plus one controller
//!   per section from the returned data.
//!
//! # Invariants
//! - Each controller exclusively owns its list; nothing else mutates it.
//! - A failed fetch is returned to the caller, never acknowledged here.

use crate::model::profile::Profile;
use crate::model::section::SectionKind;
use crate::repo::profile_store::{ProfileStore, StoreResult};
use crate::service::header_service::ProfileHeaderService;
use crate::service::section_service::{SectionService, ServiceDeps};
use log::info;

/// Live state of one profile view.
pub struct ProfilePage<S: ProfileStore + ?Sized> {
    id: Option<String>,
    header: ProfileHeaderService<S>,
    experience: SectionService<S>,
    education: SectionService<S>,
    skills: SectionService<S>,
}

impl<S: ProfileStore + ?Sized> ProfilePage<S> {
    /// Fetches the profile and mounts all controllers.
    pub async fn load(deps: ServiceDeps<S>) -> StoreResult<Self> {
        let profile = deps.store.fetch_profile().await?;
        info!(
            "event=profile_load module=page status=ok experience={} education={} skills={}",
            profile.experience.len(),
            profile.education.len(),
            profile.skills.len()
        );
        Ok(Self::from_profile(profile, deps))
    }

    /// Mounts controllers from already fetched data.
    pub fn from_profile(profile: Profile, deps: ServiceDeps<S>) -> Self {
        let Profile {
            id,
            scalars,
            experience,
            education,
            skills,
        } = profile;
        Self {
            id,
            header: ProfileHeaderService::new(scalars, deps.clone()),
            experience: SectionService::new(SectionKind::Experience, experience, deps.clone()),
            education: SectionService::new(SectionKind::Education, education, deps.clone()),
            skills: SectionService::new(SectionKind::Skills, skills, deps),
        }
    }

    pub fn header(&self) -> &ProfileHeaderService<S> {
        &self.header
    }

    pub fn section(&self, kind: SectionKind) -> &SectionService<S> {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Skills => &self.skills,
        }
    }

    /// Current local view of the whole profile, including unsaved reorders.
    pub fn snapshot(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            scalars: self.header.scalars(),
            experience: self.experience.entries(),
            education: self.education.entries(),
            skills: self.skills.entries(),
        }
    }

    /// Store calls in flight across header and sections.
    pub fn pending_operations(&self) -> usize {
        self.header.pending_operations()
            + SectionKind::ALL
                .iter()
                .map(|kind| self.section(*kind).pending_operations())
                .sum::<usize>()
    }
}
