//! Errors raised while building a single unit.

use shapegen_core::PackagePathMalformed;
use thiserror::Error;

/// Result type for unit builds.
pub type Result<T> = std::result::Result<T, BuildError>;

/// A failure that aborts the build of one unit (fragment, declared type or operation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unknown operation type '{kind}' for operation '{operation}'")]
    UnknownOperationType { operation: String, kind: String },

    #[error("cannot resolve type '{type_name}'")]
    UnresolvableType { type_name: String, path: String },

    #[error("generated name '{name}' is already taken")]
    NamingCollisionUnresolved { name: String, path: String },

    #[error(transparent)]
    PackagePathMalformed(#[from] PackagePathMalformed),

    #[error("unknown fragment '{name}'")]
    UnknownFragment { name: String, path: String },
}

impl BuildError {
    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownOperationType { .. } => "unknown_operation_type",
            Self::UnresolvableType { .. } => "unresolvable_type",
            Self::NamingCollisionUnresolved { .. } => "naming_collision",
            Self::PackagePathMalformed(_) => "package_path_malformed",
            Self::UnknownFragment { .. } => "unknown_fragment",
        }
    }

    /// Location inside the unit where the failure happened, if known.
    ///
    /// Messages leave the location out; diagnostics render it separately.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnresolvableType { path, .. }
            | Self::NamingCollisionUnresolved { path, .. }
            | Self::UnknownFragment { path, .. } => Some(path),
            Self::UnknownOperationType { .. } | Self::PackagePathMalformed(_) => None,
        }
    }
}

/// Precondition failure when constructing an operation's variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariablesError {
    #[error("{variable} == null")]
    RequiredVariableNull { variable: String },
}
