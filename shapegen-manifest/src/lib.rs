//! Configuration and IR loading for the shapegen compiler.
//!
//! Everything read from disk passes through this crate, so every failure to
//! load carries a `miette` diagnostic pointing into the offending file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod ir;

pub use config::{
    CodegenConfig, Config, NullableValueType, ValidationContext, is_graphql_name,
    is_qualified_name, parse_config,
};
pub use error::{Error, Result, SourceContext};
pub use ir::{load_ir, parse_ir};
