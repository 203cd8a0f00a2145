//! Intermediate representation types for the shapegen compiler.
//!
//! This crate models the pre-parsed GraphQL document that upstream tooling
//! emits as JSON. The types here are the single source of truth for what the
//! compiler consumes.
//!
//! # Architecture
//!
//! ```text
//! *.graphql → upstream IR generator → CodegenIr (this crate) → shapegen-codegen → type model
//! ```
//!
//! The IR types are designed to be:
//! - Read-only once loaded (nothing in the compiler mutates them)
//! - Faithful to the upstream JSON shape (camelCase field names)
//! - Structurally sound by construction where the format allows it

mod declaration;
mod document;
mod graphql_type;
mod operation;
mod selection;

pub use declaration::{EnumValue, InputField, TypeDeclaration};
pub use document::CodegenIr;
pub use graphql_type::{GraphqlType, TypeParseError};
pub use operation::{Fragment, Operation, Variable};
pub use selection::{Condition, ConditionKind, Field, InlineFragment};
