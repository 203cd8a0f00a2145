//! Configuration types and parsing for shapegen.toml files.

mod parse;
mod validate;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use parse::parse_config;
pub use validate::{ValidationContext, is_graphql_name, is_qualified_name};

/// Root configuration for shapegen.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Code generation options
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Custom scalar mappings (GraphQL scalar name -> target type name)
    #[serde(default)]
    pub custom_types: IndexMap<String, String>,
}

/// The `[codegen]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// How optional values are represented
    pub nullable_value_type: NullableValueType,
    /// Emit accessor methods for properties
    pub generate_accessors: bool,
    /// Emit companion builder types
    pub generate_model_builder: bool,
    /// Name operation types after the operation rather than its file
    pub use_semantic_naming: bool,
    /// Package used for every generated type instead of the derived one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_package_name: Option<String>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            nullable_value_type: NullableValueType::default(),
            generate_accessors: true,
            generate_model_builder: false,
            use_semantic_naming: true,
            output_package_name: None,
        }
    }
}

/// Wrapping policy for optional values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum NullableValueType {
    /// Nullable-annotated reference.
    #[default]
    #[serde(rename = "annotated")]
    Annotated,
    /// First-party optional box.
    #[serde(rename = "apolloOptional")]
    ApolloOptional,
    /// Third-party (Guava) optional box.
    #[serde(rename = "guavaOptional")]
    GuavaOptional,
    /// Platform-native optional.
    #[serde(rename = "javaOptional")]
    JavaOptional,
    /// Distinguishes "set to null" from "omitted"; only meaningful for input object fields.
    #[serde(rename = "inputType")]
    InputType,
}

impl NullableValueType {
    /// All policies, in declaration order.
    pub const ALL: [NullableValueType; 5] = [
        Self::Annotated,
        Self::ApolloOptional,
        Self::GuavaOptional,
        Self::JavaOptional,
        Self::InputType,
    ];

    /// The configuration value for this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Annotated => "annotated",
            Self::ApolloOptional => "apolloOptional",
            Self::GuavaOptional => "guavaOptional",
            Self::JavaOptional => "javaOptional",
            Self::InputType => "inputType",
        }
    }

    /// Look up a policy by its configuration value.
    pub fn find_by_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|policy| policy.as_str() == value)
    }
}

impl fmt::Display for NullableValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_value() {
        for policy in NullableValueType::ALL {
            assert_eq!(NullableValueType::find_by_value(policy.as_str()), Some(policy));
        }
        assert_eq!(NullableValueType::find_by_value("optional"), None);
    }

    #[test]
    fn test_codegen_defaults() {
        let codegen = CodegenConfig::default();
        assert_eq!(codegen.nullable_value_type, NullableValueType::Annotated);
        assert!(codegen.generate_accessors);
        assert!(!codegen.generate_model_builder);
        assert!(codegen.use_semantic_naming);
        assert!(codegen.output_package_name.is_none());
    }
}
