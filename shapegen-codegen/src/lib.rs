//! GraphQL IR to type model compiler.
//!
//! This crate turns a [`shapegen_ir::CodegenIr`] document into an
//! emission-ready model of generated types: one per fragment, declared enum
//! and input object, operation, plus the custom scalar enum.
//!
//! # Module Organization
//!
//! - [`context`] - Run settings and the forkable [`GenerationContext`]
//! - [`resolve`] - GraphQL type strings to target types ([`TypeResolver`])
//! - [`shape`] - Selection sets to nested data shapes
//! - [`declared`] - Enums, input objects and the custom scalar enum
//! - [`operation`] - Operation and fragment assembly
//! - [`model`] - The generated type model
//! - [`pipeline`] - Per-unit compilation with diagnostics

pub mod context;
pub mod declared;
pub mod error;
pub mod model;
pub mod operation;
pub mod pipeline;
pub mod resolve;
pub mod shape;

pub use context::{GenerationContext, Settings, supported_type_map};
pub use declared::{build_custom_scalars, build_enum, build_input_object};
pub use error::{BuildError, Result, VariablesError};
pub use model::{
    AccessorSpec, BuilderSpec, CustomScalarConstant, CustomScalarsSpec, EnumTypeSpec,
    EnumValueSpec, FragmentSpec, GeneratedType, InputFieldSpec, InputTypeSpec, OperationKind,
    OperationSpec, PropertyKind, PropertySpec, SetterSpec, ShapeSpec, VariableSpec, VariablesSpec,
};
pub use operation::{build_fragment, build_operation};
pub use pipeline::{CompilationOutput, Compiler, Diagnostic, UnitKind, UnitOutput};
pub use resolve::{ClassName, PrimitiveType, ResolvedType, TypeRef, TypeResolver, Wrapping};
