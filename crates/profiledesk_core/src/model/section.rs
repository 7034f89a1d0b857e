//! Section kinds and per-kind field tables.
//!
//! # Responsibility
//! - Name the closed set of profile sections and their wire names.
//! - Describe which fields each editable kind carries and which are required.
//!
//! # Invariants
//! - Field tables are the only source for "which fields belong to a kind".
//! - Lookups are keyed by enum, never by display text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One field an editing surface may submit for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire/form key, e.g. `skillName`.
    pub name: &'static str,
    /// Human-readable label used in messages.
    pub label: &'static str,
    /// Whether a non-empty value must be present on submit.
    pub required: bool,
}

const fn required(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: true,
    }
}

const fn optional(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: false,
    }
}

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    required("company", "Company"),
    required("role", "Role"),
    required("duration", "Duration"),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    required("institution", "Institution"),
    required("degree", "Degree"),
    required("year", "Year"),
];

const SKILL_FIELDS: &[FieldSpec] = &[required("skillName", "Skill Name")];

const PROFILE_FIELDS: &[FieldSpec] = &[
    required("name", "Name"),
    required("email", "Email"),
    optional("profilePicture", "Profile Picture"),
];

/// Named ordered list inside a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
}

impl SectionKind {
    /// All sections in page order.
    pub const ALL: [SectionKind; 3] = [Self::Experience, Self::Education, Self::Skills];

    /// Key used by the store for this section.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
        }
    }

    /// Title shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Experience => EXPERIENCE_FIELDS,
            Self::Education => EDUCATION_FIELDS,
            Self::Skills => SKILL_FIELDS,
        }
    }

    /// Returns whether `name` is a field of this section kind.
    pub fn has_field(self, name: &str) -> bool {
        self.fields().iter().any(|spec| spec.name == name)
    }

    /// Parses a wire name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "experience" => Some(Self::Experience),
            "education" => Some(Self::Education),
            "skills" => Some(Self::Skills),
            _ => None,
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Kind of record an editing surface is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Scalar identity fields of the profile header.
    Profile,
    /// One entry of a section list.
    Section(SectionKind),
}

impl EditorKind {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Profile => PROFILE_FIELDS,
            Self::Section(kind) => kind.fields(),
        }
    }

    /// Iterates fields that must be non-empty on submit.
    pub fn required_fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields().iter().filter(|spec| spec.required)
    }

    /// Title of the editing surface.
    pub fn title(self) -> &'static str {
        match self {
            Self::Profile => "Edit Profile",
            Self::Section(kind) => kind.label(),
        }
    }
}

impl From<SectionKind> for EditorKind {
    fn from(value: SectionKind) -> Self {
        Self::Section(value)
    }
}
