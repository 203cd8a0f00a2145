//! Operations, fragments and variables.

use serde::{Deserialize, Serialize};

use crate::{Field, InlineFragment};

/// A query, mutation or subscription document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(alias = "name")]
    pub operation_name: String,
    /// Raw operation kind as written upstream (`query`, `mutation`, `subscription`).
    ///
    /// Kept as a string so an unknown kind fails the operation's own build
    /// instead of rejecting the whole document.
    #[serde(alias = "kind")]
    pub operation_type: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Raw document text of the operation itself.
    pub source: String,
    /// Root selection set.
    #[serde(default)]
    pub fields: Vec<Field>,
    pub file_path: String,
    /// Fragments used by the operation, in the order their text is appended.
    #[serde(default)]
    pub fragments_referenced: Vec<String>,
    /// Stable content hash computed upstream.
    #[serde(default)]
    pub operation_id: String,
}

impl Operation {
    /// Returns true if the operation declares any variables.
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }
}

/// A reusable named fragment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    #[serde(alias = "name")]
    pub fragment_name: String,
    /// Definition text appended to operation documents that use the fragment.
    pub source: String,
    pub type_condition: String,
    #[serde(default)]
    pub possible_types: Vec<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub fragment_spreads: Vec<String>,
    #[serde(default)]
    pub inline_fragments: Vec<InlineFragment>,
    #[serde(default)]
    pub fragments_referenced: Vec<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// A variable declared by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Variable {
    /// Returns true if the variable may be omitted or null.
    pub fn optional(&self) -> bool {
        !self.type_name.ends_with('!')
    }
}
