//! Profile record: scalar identity fields plus three sections.

use crate::model::entry::{Entry, FieldMap};
use crate::model::section::SectionKind;
use serde::{Deserialize, Serialize};

/// Scalar identity fields of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScalars {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_picture: String,
}

impl ProfileScalars {
    /// Merges submitted fields over current values.
    ///
    /// A field that is absent or empty in `updates` keeps its current value.
    pub fn merged(&self, updates: &FieldMap) -> Self {
        let pick = |key: &str, current: &str| {
            updates
                .get(key)
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| current.to_string())
        };
        Self {
            name: pick("name", &self.name),
            email: pick("email", &self.email),
            profile_picture: pick("profilePicture", &self.profile_picture),
        }
    }

    /// Field-map view used to seed an editing surface.
    pub fn to_field_map(&self) -> FieldMap {
        FieldMap::from([
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("profilePicture".to_string(), self.profile_picture.clone()),
        ])
    }
}

/// Whole profile as returned by fetch-profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub scalars: ProfileScalars,
    #[serde(default)]
    pub experience: Vec<Entry>,
    #[serde(default)]
    pub education: Vec<Entry>,
    #[serde(default)]
    pub skills: Vec<Entry>,
}

impl Profile {
    pub fn section(&self, kind: SectionKind) -> &[Entry] {
        match kind {
            SectionKind::Experience => &self.experience,
            SectionKind::Education => &self.education,
            SectionKind::Skills => &self.skills,
        }
    }

    pub fn section_mut(&mut self, kind: SectionKind) -> &mut Vec<Entry> {
        match kind {
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Skills => &mut self.skills,
        }
    }
}
