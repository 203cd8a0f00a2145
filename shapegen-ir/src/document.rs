//! The root IR document.

use serde::{Deserialize, Serialize};

use crate::{Fragment, Operation, TypeDeclaration};

/// Root of an IR document: everything one compilation run consumes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenIr {
    /// Operations (queries, mutations, subscriptions).
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// Reusable named fragments.
    #[serde(default)]
    pub fragments: Vec<Fragment>,
    /// Enum, input object and scalar types referenced by the documents.
    #[serde(default)]
    pub types_used: Vec<TypeDeclaration>,
}

impl CodegenIr {
    /// Look up a fragment by name.
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.fragment_name == name)
    }

    /// Look up a declared type by name.
    pub fn declaration(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types_used.iter().find(|t| t.name() == name)
    }

    /// Returns true if the document contains nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty() && self.fragments.is_empty() && self.types_used.is_empty()
    }
}
