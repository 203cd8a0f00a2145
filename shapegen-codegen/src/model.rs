//! The emission-ready type model.
//!
//! Specs here are declarative: they describe what an emission backend must
//! produce, not how it is rendered. Every spec is serde-serializable.

use indexmap::IndexMap;
use serde::Serialize;
use shapegen_ir::Condition;

use crate::{ClassName, ResolvedType, TypeRef, VariablesError};

/// One generated top-level type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedType {
    Fragment(FragmentSpec),
    Enum(EnumTypeSpec),
    InputObject(InputTypeSpec),
    CustomScalars(CustomScalarsSpec),
    Operation(Box<OperationSpec>),
}

impl GeneratedType {
    /// Simple name of the generated type.
    pub fn name(&self) -> &str {
        match self {
            Self::Fragment(spec) => &spec.shape.name,
            Self::Enum(spec) => &spec.name,
            Self::InputObject(spec) => &spec.name,
            Self::CustomScalars(spec) => &spec.name,
            Self::Operation(spec) => &spec.name,
        }
    }

    /// Package the generated type belongs to.
    pub fn package(&self) -> &str {
        match self {
            Self::Fragment(spec) => &spec.package,
            Self::Enum(spec) => &spec.package,
            Self::InputObject(spec) => &spec.package,
            Self::CustomScalars(spec) => &spec.package,
            Self::Operation(spec) => &spec.package,
        }
    }

    /// Qualified class name of the generated type.
    pub fn class_name(&self) -> ClassName {
        ClassName::new(self.package(), self.name())
    }
}

/// A generated data shape for one selection set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSpec {
    pub name: String,
    /// Set for inline fragment shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_condition: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_types: Vec<String>,
    pub properties: Vec<PropertySpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessors: Vec<AccessorSpec>,
    /// Nested shapes in generation order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ShapeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder: Option<BuilderSpec>,
}

impl ShapeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_condition: None,
            possible_types: Vec::new(),
            properties: Vec::new(),
            accessors: Vec::new(),
            nested: Vec::new(),
            builder: None,
        }
    }

    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find a directly nested shape by name.
    pub fn nested_shape(&self, name: &str) -> Option<&ShapeSpec> {
        self.nested.iter().find(|s| s.name == name)
    }

    /// Names of this shape and every shape below it, depth first.
    pub fn all_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        for nested in &self.nested {
            names.extend(nested.all_names());
        }
        names
    }
}

/// What a property holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "shape", rename_all = "snake_case")]
pub enum PropertyKind {
    /// A scalar, enum or custom-mapped value.
    Value,
    /// An object-valued field backed by a nested shape.
    Object(String),
    /// An inline fragment alternative, present only when its condition matched.
    InlineFragment(String),
}

/// A property of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySpec {
    /// Property name (the response name).
    pub name: String,
    /// Schema field name (empty for inline fragment properties).
    pub field_name: String,
    pub ty: ResolvedType,
    pub kind: PropertyKind,
    /// True if the value may be absent.
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

/// An accessor method exposing a property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessorSpec {
    pub name: String,
    pub returns: ResolvedType,
}

/// A companion builder for a generated type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderSpec {
    /// Name of the type the builder produces.
    pub target: String,
    pub setters: Vec<SetterSpec>,
}

impl BuilderSpec {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            setters: Vec::new(),
        }
    }

    /// Add a setter for a value of type `ty`.
    ///
    /// Optional values default to absent; non-optional references must be
    /// set before `build`. Primitives always carry a value.
    pub fn setter(mut self, name: impl Into<String>, ty: &ResolvedType) -> Self {
        self.setters.push(SetterSpec {
            name: name.into(),
            ty: ty.unwrap_optional(),
            required: !ty.is_optional() && !ty.is_primitive(),
            default_value: None,
        });
        self
    }

    /// Set the default value of the most recently added setter.
    pub fn default_value(mut self, value: Option<serde_json::Value>) -> Self {
        if let Some(last) = self.setters.last_mut() {
            last.default_value = value;
        }
        self
    }

    /// Names of the setters that must be called before `build`.
    pub fn required_setters(&self) -> impl Iterator<Item = &str> {
        self.setters
            .iter()
            .filter(|s| s.required)
            .map(|s| s.name.as_str())
    }
}

/// One builder setter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetterSpec {
    pub name: String,
    pub ty: ResolvedType,
    /// Must be set before `build` (checked non-null at build time).
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

/// A generated fragment type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentSpec {
    pub package: String,
    /// GraphQL fragment name.
    pub fragment_name: String,
    pub type_condition: String,
    pub possible_types: Vec<String>,
    /// Definition text appended to operation documents.
    pub definition: String,
    pub shape: ShapeSpec,
}

/// A generated enum type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumTypeSpec {
    pub name: String,
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub values: Vec<EnumValueSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// A generated input object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputTypeSpec {
    pub name: String,
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<InputFieldSpec>,
    pub builder: BuilderSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputFieldSpec {
    pub name: String,
    pub ty: ResolvedType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

/// The enum-like type aggregating custom scalar mappings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomScalarsSpec {
    pub name: String,
    pub package: String,
    pub constants: Vec<CustomScalarConstant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomScalarConstant {
    /// Constant identifier (e.g. `AWSDATETIME`).
    pub name: String,
    pub graphql_name: String,
    pub target: TypeRef,
}

/// Capability contract implemented by a generated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Parse an upstream operation type (case-insensitive).
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "query" => Some(Self::Query),
            "mutation" => Some(Self::Mutation),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }

    /// Suffix appended to semantic operation type names.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

/// A generated operation type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSpec {
    pub name: String,
    pub package: String,
    pub kind: OperationKind,
    /// GraphQL operation name, carried through unchanged.
    pub operation_name: String,
    /// Upstream content hash, carried through unchanged.
    pub operation_id: String,
    /// The operation's own definition text.
    pub definition: String,
    /// Exact document text sent over the wire.
    pub document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariablesSpec>,
    /// Root data shape (`Data`).
    pub data: ShapeSpec,
    /// Type handed back to callers wrapping the data shape.
    pub data_wrapper: ResolvedType,
    /// Builder over the operation's variables.
    pub builder: BuilderSpec,
}

/// The `Variables` container of an operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariablesSpec {
    pub name: String,
    pub variables: Vec<VariableSpec>,
}

/// One declared variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSpec {
    /// Parameter name (decapitalized GraphQL name).
    pub name: String,
    pub graphql_name: String,
    pub ty: ResolvedType,
    /// Non-null and non-primitive: checked at construction time.
    pub enforced_non_null: bool,
}

impl VariablesSpec {
    /// Construct variable values the way the generated constructor does.
    ///
    /// Every enforced variable is checked for null or absence, in declared
    /// order, before any value is read. Absent optional variables are omitted
    /// from the result.
    pub fn bind(
        &self,
        values: &IndexMap<String, serde_json::Value>,
    ) -> Result<IndexMap<String, serde_json::Value>, VariablesError> {
        for variable in self.variables.iter().filter(|v| v.enforced_non_null) {
            let present = values
                .get(&variable.graphql_name)
                .is_some_and(|value| !value.is_null());
            if !present {
                return Err(VariablesError::RequiredVariableNull {
                    variable: variable.name.clone(),
                });
            }
        }

        Ok(self
            .variables
            .iter()
            .filter_map(|variable| {
                values
                    .get(&variable.graphql_name)
                    .map(|value| (variable.graphql_name.clone(), value.clone()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrimitiveType, Wrapping};

    fn variable(name: &str, ty: ResolvedType, enforced: bool) -> VariableSpec {
        VariableSpec {
            name: name.to_string(),
            graphql_name: name.to_string(),
            ty,
            enforced_non_null: enforced,
        }
    }

    fn string(wrapping: Wrapping) -> ResolvedType {
        ResolvedType {
            base: TypeRef::String,
            wrapping,
            deprecated: false,
        }
    }

    #[test]
    fn test_operation_kind_parse() {
        assert_eq!(OperationKind::parse("query"), Some(OperationKind::Query));
        assert_eq!(OperationKind::parse("Mutation"), Some(OperationKind::Mutation));
        assert_eq!(OperationKind::parse("SUBSCRIPTION"), Some(OperationKind::Subscription));
        assert_eq!(OperationKind::parse("fragment"), None);
    }

    #[test]
    fn test_builder_setters() {
        let count = ResolvedType {
            base: TypeRef::Primitive(PrimitiveType::Int),
            wrapping: Wrapping::None,
            deprecated: false,
        };
        let builder = BuilderSpec::new("Post")
            .setter("id", &string(Wrapping::NonNull))
            .setter("title", &string(Wrapping::Nullable(shapegen_manifest::NullableValueType::JavaOptional)))
            .setter("count", &count)
            .default_value(Some(serde_json::json!(0)));

        let required: Vec<_> = builder.required_setters().collect();
        assert_eq!(required, ["id"]);
        assert_eq!(builder.setters[1].ty.to_string(), "@Nullable String");
        assert_eq!(builder.setters[2].default_value, Some(serde_json::json!(0)));
    }

    #[test]
    fn test_bind_checks_enforced_in_declared_order() {
        let spec = VariablesSpec {
            name: "Variables".into(),
            variables: vec![
                variable("first", string(Wrapping::NonNull), true),
                variable("second", string(Wrapping::NonNull), true),
            ],
        };

        let values = IndexMap::from([
            ("second".to_string(), serde_json::Value::Null),
            ("first".to_string(), serde_json::Value::Null),
        ]);
        assert_eq!(
            spec.bind(&values),
            Err(VariablesError::RequiredVariableNull {
                variable: "first".into()
            })
        );
    }

    #[test]
    fn test_bind_omits_absent_optionals() {
        let spec = VariablesSpec {
            name: "Variables".into(),
            variables: vec![
                variable("id", string(Wrapping::NonNull), true),
                variable("filter", string(Wrapping::Nullable(Default::default())), false),
            ],
        };

        let values = IndexMap::from([("id".to_string(), serde_json::json!("p1"))]);
        let bound = spec.bind(&values).unwrap();
        assert_eq!(bound.len(), 1);
        assert_eq!(bound["id"], serde_json::json!("p1"));
    }

    #[test]
    fn test_all_names() {
        let mut data = ShapeSpec::new("Data");
        let mut post = ShapeSpec::new("Post");
        post.nested.push(ShapeSpec::new("Author"));
        data.nested.push(post);
        data.nested.push(ShapeSpec::new("AsDroid"));

        assert_eq!(data.all_names(), ["Data", "Post", "Author", "AsDroid"]);
        assert!(data.nested_shape("Post").is_some());
    }
}
