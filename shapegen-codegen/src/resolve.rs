//! Mapping of GraphQL type strings to target type references.
//!
//! Resolution order for a named type is fixed: the built-in scalar table,
//! then the custom scalar map, then enum and input object declarations in
//! the types package. Anything else is unresolvable.

use std::fmt;

use serde::Serialize;
use shapegen_ir::{GraphqlType, TypeDeclaration};
use shapegen_manifest::NullableValueType;

use crate::{BuildError, GenerationContext, Result};

/// Intrinsic primitive representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Int,
    Boolean,
    Double,
    Long,
}

impl PrimitiveType {
    /// Name of the unboxed primitive.
    pub fn primitive_name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Boolean => "boolean",
            Self::Double => "double",
            Self::Long => "long",
        }
    }

    /// Name of the boxed reference type.
    pub fn boxed_name(self) -> &'static str {
        match self {
            Self::Int => "Integer",
            Self::Boolean => "Boolean",
            Self::Double => "Double",
            Self::Long => "Long",
        }
    }
}

/// A qualified class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassName {
    pub package: String,
    pub name: String,
}

impl ClassName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Split a dotted name at its last `.`.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// The base of a resolved type, before optionality wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum TypeRef {
    /// An intrinsic primitive that cannot express null.
    Primitive(PrimitiveType),
    /// The boxed form of a primitive.
    Boxed(PrimitiveType),
    String,
    /// A declared or custom-mapped class.
    Class(ClassName),
    /// A generated shape, referenced locally by name.
    Shape(String),
    List(Box<ResolvedType>),
}

impl TypeRef {
    /// Parse a custom scalar target into a type reference.
    pub fn from_target(target: &str) -> Self {
        let simple = target.strip_prefix("java.lang.").unwrap_or(target);
        match simple {
            "String" => Self::String,
            "Boolean" => Self::Boxed(PrimitiveType::Boolean),
            "Integer" | "Int" => Self::Boxed(PrimitiveType::Int),
            "Long" => Self::Boxed(PrimitiveType::Long),
            "Double" | "Float" => Self::Boxed(PrimitiveType::Double),
            _ => Self::Class(ClassName::parse(target)),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Box intrinsic primitives; other references are unchanged.
    pub fn boxed(self) -> Self {
        match self {
            Self::Primitive(p) => Self::Boxed(p),
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.primitive_name()),
            Self::Boxed(p) => f.write_str(p.boxed_name()),
            Self::String => f.write_str("String"),
            Self::Class(class) => write!(f, "{}", class),
            Self::Shape(name) => f.write_str(name),
            Self::List(element) => write!(f, "List<{}>", element),
        }
    }
}

/// How a resolved reference is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "policy", rename_all = "snake_case")]
pub enum Wrapping {
    /// Primitives: no wrapping at all.
    None,
    /// Non-null annotated reference.
    NonNull,
    /// Optional reference, represented per the given policy.
    Nullable(NullableValueType),
}

/// A fully resolved target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedType {
    pub base: TypeRef,
    pub wrapping: Wrapping,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl ResolvedType {
    pub fn is_primitive(&self) -> bool {
        self.base.is_primitive()
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.wrapping, Wrapping::Nullable(_))
    }

    /// The same type with optional-box wrappers replaced by a nullable annotation.
    ///
    /// Used for constructor parameters and builder setters, which take the
    /// bare value.
    pub fn unwrap_optional(&self) -> Self {
        let wrapping = match self.wrapping {
            Wrapping::Nullable(_) => Wrapping::Nullable(NullableValueType::Annotated),
            other => other,
        };
        Self {
            base: self.base.clone(),
            wrapping,
            deprecated: self.deprecated,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            f.write_str("@Deprecated ")?;
        }
        match self.wrapping {
            Wrapping::None => write!(f, "{}", self.base),
            Wrapping::NonNull => write!(f, "@Nonnull {}", self.base),
            Wrapping::Nullable(policy) => match policy {
                NullableValueType::Annotated => write!(f, "@Nullable {}", self.base),
                NullableValueType::ApolloOptional => write!(f, "Optional<{}>", self.base),
                NullableValueType::GuavaOptional => {
                    write!(f, "com.google.common.base.Optional<{}>", self.base)
                }
                NullableValueType::JavaOptional => write!(f, "java.util.Optional<{}>", self.base),
                NullableValueType::InputType => write!(f, "Input<{}>", self.base),
            },
        }
    }
}

/// Resolves GraphQL type strings against a generation context.
///
/// # Example
///
/// ```ignore
/// let resolver = TypeResolver::new(&ctx);
/// let ty = resolver.resolve("[Post!]")?;
/// assert_eq!(ty.to_string(), "@Nullable List<@Nonnull com.example.type.Post>");
/// ```
#[derive(Debug, Clone)]
pub struct TypeResolver<'a> {
    ctx: &'a GenerationContext,
    deprecated: bool,
}

impl<'a> TypeResolver<'a> {
    pub fn new(ctx: &'a GenerationContext) -> Self {
        Self {
            ctx,
            deprecated: false,
        }
    }

    /// Decorate resolved types with a deprecation marker.
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Resolve with the optionality implied by the type string and the context policy.
    pub fn resolve(&self, type_name: &str) -> Result<ResolvedType> {
        self.resolve_with(type_name, None, None)
    }

    /// Resolve with optional overrides for optionality and wrapping policy.
    pub fn resolve_with(
        &self,
        type_name: &str,
        optional: Option<bool>,
        policy: Option<NullableValueType>,
    ) -> Result<ResolvedType> {
        let parsed = self.parse(type_name)?;
        self.resolve_type(&parsed, optional, policy, None, false)
    }

    /// Resolve a field whose named type is replaced by a generated shape.
    ///
    /// List structure and nullability still come from `type_name`.
    pub fn resolve_shape(
        &self,
        type_name: &str,
        shape_name: &str,
        optional: Option<bool>,
    ) -> Result<ResolvedType> {
        let parsed = self.parse(type_name)?;
        self.resolve_type(&parsed, optional, None, Some(shape_name), false)
    }

    /// An optional reference to a generated shape (inline fragment accessors).
    pub fn optional_shape(&self, shape_name: &str) -> ResolvedType {
        self.wrap(TypeRef::Shape(shape_name.to_string()), true, None, false)
    }

    fn parse(&self, type_name: &str) -> Result<GraphqlType> {
        GraphqlType::parse(type_name).map_err(|_| self.unresolvable(type_name))
    }

    fn resolve_type(
        &self,
        ty: &GraphqlType,
        optional: Option<bool>,
        policy: Option<NullableValueType>,
        shape: Option<&str>,
        element: bool,
    ) -> Result<ResolvedType> {
        let (non_null, inner) = match ty {
            GraphqlType::NonNull(inner) => (true, inner.as_ref()),
            other => (false, other),
        };
        let optional = optional.unwrap_or(!non_null);

        let base = match inner {
            GraphqlType::List(element_ty) => {
                let element = self.resolve_type(element_ty, None, None, shape, true)?;
                TypeRef::List(Box::new(element))
            }
            GraphqlType::Named(name) => match shape {
                Some(shape_name) => TypeRef::Shape(shape_name.to_string()),
                None => self.lookup(name, optional)?,
            },
            GraphqlType::NonNull(_) => return Err(self.unresolvable(&ty.to_string())),
        };

        if element {
            return Ok(ResolvedType {
                base: base.boxed(),
                wrapping: if optional {
                    Wrapping::Nullable(NullableValueType::Annotated)
                } else {
                    Wrapping::NonNull
                },
                deprecated: false,
            });
        }

        Ok(self.wrap(base, optional, policy, self.deprecated))
    }

    fn wrap(
        &self,
        base: TypeRef,
        optional: bool,
        policy: Option<NullableValueType>,
        deprecated: bool,
    ) -> ResolvedType {
        let wrapping = if base.is_primitive() {
            Wrapping::None
        } else if optional {
            Wrapping::Nullable(policy.unwrap_or(self.ctx.settings().nullable_value_type))
        } else {
            Wrapping::NonNull
        };
        ResolvedType {
            base,
            wrapping,
            deprecated,
        }
    }

    fn lookup(&self, name: &str, optional: bool) -> Result<TypeRef> {
        let primitive = |p: PrimitiveType| {
            if optional {
                TypeRef::Boxed(p)
            } else {
                TypeRef::Primitive(p)
            }
        };

        let settings = self.ctx.settings();
        let resolved = match name {
            "String" => TypeRef::String,
            "Int" => primitive(PrimitiveType::Int),
            "Boolean" => primitive(PrimitiveType::Boolean),
            "Float" => primitive(PrimitiveType::Double),
            "AWSTimestamp" => primitive(PrimitiveType::Long),
            _ => match settings.custom_types.get(name) {
                Some(target) => TypeRef::from_target(target),
                None => match settings.declaration(name) {
                    Some(TypeDeclaration::Enum { .. } | TypeDeclaration::InputObject { .. }) => {
                        TypeRef::Class(ClassName::new(&settings.types_package, name))
                    }
                    Some(TypeDeclaration::Scalar { .. }) | None => {
                        return Err(self.unresolvable(name));
                    }
                },
            },
        };
        Ok(resolved)
    }

    fn unresolvable(&self, type_name: &str) -> BuildError {
        BuildError::UnresolvableType {
            type_name: type_name.to_string(),
            path: self.ctx.path_string(),
        }
    }
}
