//! Validation utilities for configuration values.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context that carries source information.
///
/// Tracks the current path through the configuration (e.g.
/// `custom_types.Date`) so messages name the offending key.
///
/// # Example
///
/// ```ignore
/// let ctx = ValidationContext::new(&source);
/// let custom = ctx.push("custom_types");
/// custom.validate_scalar_name("Date")?;
/// custom.push("Date").validate_target("Date", "java.util.Date")?;
/// ```
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    source: &'a SourceContext,
    path: Vec<&'a str>,
}

impl<'a> ValidationContext<'a> {
    /// Create a new validation context for the given source.
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: self.source,
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Validate that a custom scalar key is a GraphQL name.
    pub fn validate_scalar_name(&self, name: &str) -> Result<()> {
        if let Some(reason) = graphql_name_error(name) {
            return Err(self.source.invalid_scalar_error(
                name,
                reason,
                find_key_span(self.source.src(), name),
            ));
        }
        Ok(())
    }

    /// Validate that a custom scalar target is a dotted type name.
    pub fn validate_target(&self, key: &str, target: &str) -> Result<()> {
        if is_qualified_name(target) {
            return Ok(());
        }

        let message = if target.is_empty() {
            format!("'{}' must name a target type", self.path_string())
        } else {
            format!(
                "'{}' target '{}' is not a dotted type name",
                self.path_string(),
                target
            )
        };
        Err(self.error_at(message, key, target))
    }

    /// Validate a package name option.
    pub fn validate_package(&self, key: &str, package: &str) -> Result<()> {
        if is_qualified_name(package) {
            return Ok(());
        }

        let message = format!(
            "'{}.{}' must be a dotted package name, got '{}'",
            self.path_string(),
            key,
            package
        );
        Err(self.error_at(message, key, package))
    }

    fn error_at(&self, message: String, key: &str, value: &str) -> Box<crate::Error> {
        match find_value_span(self.source.src(), key, value) {
            Some(span) => self.source.validation_error_at(message, span),
            None => self.source.validation_error(message),
        }
    }
}

/// Returns true if `name` is a valid GraphQL name (`[_A-Za-z][_0-9A-Za-z]*`).
pub fn is_graphql_name(name: &str) -> bool {
    graphql_name_error(name).is_none()
}

fn graphql_name_error(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Some("name must contain only letters, numbers, and underscores");
    }
    None
}

/// Returns true if `name` is a non-empty sequence of identifiers joined by `.`.
pub fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

/// Find the span of a TOML key written at the start of a line.
///
/// Matches bare (`Date =`) and quoted (`"Date-Time" =`) keys.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        for (candidate, skip) in [(key.to_string(), 0), (format!("\"{}\"", key), 1)] {
            if let Some(rest) = trimmed.strip_prefix(candidate.as_str())
                && rest.trim_start().starts_with('=')
            {
                return Some(SourceSpan::from((offset + indent + skip, key.len())));
            }
        }

        offset += line.len();
    }
    None
}

/// Find the span of a quoted value assigned to `key`.
fn find_value_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    let key_span = find_key_span(src, key)?;
    let after_key = key_span.offset() + key_span.len();
    let quoted = format!("\"{}\"", value);
    let pos = src[after_key..].find(&quoted)?;
    Some(SourceSpan::from((after_key + pos + 1, value.len())))
}
