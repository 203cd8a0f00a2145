//! Type declarations referenced by operations.
//!
//! The upstream format carries a `kind` discriminator plus either `values`
//! (enums) or `fields` (input objects). Modelling the declaration as a tagged
//! enum means the "exactly one of them" rule holds by construction.

use serde::{Deserialize, Serialize};

/// A type declared by the schema and used by at least one document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind")]
pub enum TypeDeclaration {
    /// An enum type with its values.
    #[serde(rename = "EnumType")]
    Enum {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        values: Vec<EnumValue>,
    },
    /// An input object type with its fields.
    #[serde(rename = "InputObjectType")]
    InputObject {
        name: String,
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        fields: Vec<InputField>,
    },
    /// A custom scalar type.
    #[serde(rename = "ScalarType")]
    Scalar {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl TypeDeclaration {
    /// The declared GraphQL type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Enum { name, .. } | Self::InputObject { name, .. } | Self::Scalar { name, .. } => {
                name
            }
        }
    }

    /// The declaration's description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Enum { description, .. }
            | Self::InputObject { description, .. }
            | Self::Scalar { description, .. } => description.as_deref(),
        }
    }

    /// The upstream `kind` discriminator.
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Enum { .. } => "EnumType",
            Self::InputObject { .. } => "InputObjectType",
            Self::Scalar { .. } => "ScalarType",
        }
    }

    /// Returns true for declarations that produce a generated type of their own.
    pub fn is_generated(&self) -> bool {
        !matches!(self, Self::Scalar { .. })
    }

    /// Returns true for scalar declarations.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }
}

/// A single value of an enum declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: Option<bool>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

impl EnumValue {
    /// Returns true if the value is marked deprecated.
    pub fn deprecated(&self) -> bool {
        self.is_deprecated.unwrap_or(false)
    }
}

/// A field of an input object declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default value as written in the schema, kept as raw JSON.
    #[serde(default)]
    pub default_value: Option<serde_json::Value>,
}

impl InputField {
    /// Returns true if the field may be omitted.
    pub fn optional(&self) -> bool {
        !self.type_name.ends_with('!')
    }
}
