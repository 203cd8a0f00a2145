//! Compilation pipeline.
//!
//! The [`Compiler`] splits an IR document into units (fragments, declared
//! types, the custom scalar enum and operations), builds them in parallel
//! and collects a [`UnitOutput`] per unit:
//!
//! - Per-unit isolation: a failing unit never aborts its siblings
//! - Deterministic output order, serial or parallel
//! - Unified diagnostics collection
//!
//! # Example
//!
//! ```ignore
//! use shapegen_codegen::pipeline::Compiler;
//!
//! let output = Compiler::new(settings).compile(&ir);
//!
//! for diag in output.diagnostics() {
//!     eprintln!("{}", diag);
//! }
//! ```

mod diagnostic;
mod runner;
mod unit;

pub use diagnostic::Diagnostic;
pub use runner::{CompilationOutput, Compiler, UnitOutput};
pub use unit::{Unit, UnitKind};
