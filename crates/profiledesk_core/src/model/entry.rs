//! Section entry model.
//!
//! # Responsibility
//! - Define the item record stored in every section list.
//! - Provide projection and shallow-merge helpers scoped to a section kind.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused within a section.
//! - `fields` never contains keys outside the owning kind's field table
//!   when built through `Entry::for_kind` or `Entry::merged`.
//! - Field values are strings on the wire. A `null` or numeric field makes
//!   the whole entry undecodable, so a store reply carrying one is reported
//!   as a malformed response and the local list is left untouched.

use crate::model::section::SectionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Generic field bag submitted by an editing surface.
pub type FieldMap = BTreeMap<String, String>;

/// Entry identifier, unique within one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One item in a section list.
///
/// Serialized flat, e.g. `{"id":1,"skillName":"Go"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl Entry {
    /// Creates an entry from raw fields without projection.
    pub fn new(id: impl Into<EntryId>, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Creates an entry keeping only fields that belong to `kind`.
    pub fn for_kind(kind: SectionKind, id: EntryId, fields: &FieldMap) -> Self {
        Self {
            id,
            fields: project_fields(kind, fields),
        }
    }

    /// Returns a copy with `updates` shallow-merged over current fields.
    ///
    /// Keys in `updates` that do not belong to `kind` are ignored; keys not
    /// present in `updates` are left untouched.
    pub fn merged(&self, kind: SectionKind, updates: &FieldMap) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(project_fields(kind, updates));
        Self {
            id: self.id,
            fields,
        }
    }

    /// Reads one field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Builder-style field setter, mainly for fixtures.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Short one-line summary used by list views and the CLI.
    pub fn headline(&self) -> String {
        let primary = ["company", "institution", "skillName"]
            .iter()
            .find_map(|key| self.field(key))
            .unwrap_or_default();
        let secondary = ["role", "degree"]
            .iter()
            .find_map(|key| self.field(key));
        let when = ["duration", "year"].iter().find_map(|key| self.field(key));

        let mut line = primary.to_string();
        for part in [secondary, when].into_iter().flatten() {
            if !part.is_empty() {
                if !line.is_empty() {
                    line.push_str(" | ");
                }
                line.push_str(part);
            }
        }
        line
    }
}

fn project_fields(kind: SectionKind, fields: &FieldMap) -> FieldMap {
    fields
        .iter()
        .filter(|(name, _)| kind.has_field(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
