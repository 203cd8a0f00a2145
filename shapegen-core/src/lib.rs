//! Core naming utilities for the shapegen compiler.
//!
//! This crate provides the pure string transforms used across the
//! shapegen workspace: inflection, case conversion and package derivation.

mod case;
mod inflector;
mod package;

// Case conversion
pub use case::{capitalize, decapitalize, to_constant_case, to_pascal_case};
// Inflection
pub use inflector::singularize;
// Package derivation
pub use package::{PACKAGE_CONVENTION, PackagePathMalformed, format_package_name};
