//! Diagnostics recorded when a unit fails to build.

use serde::Serialize;

use crate::BuildError;

/// An error recorded against one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Name of the unit that produced this diagnostic.
    pub unit: String,
    /// Machine-readable error code, for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    /// The diagnostic message.
    pub message: String,
    /// Optional location inside the unit (e.g. "hero.friends").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            code: None,
            message: message.into(),
            location: None,
        }
    }

    /// Record a unit build failure.
    pub fn from_build_error(unit: impl Into<String>, err: &BuildError) -> Self {
        let diagnostic = Self::error(unit, err.to_string()).with_code(err.code());
        match err.path() {
            Some(path) if !path.is_empty() => diagnostic.at(path),
            _ => diagnostic,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add an error code to this diagnostic.
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}: {}", self.unit, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}
