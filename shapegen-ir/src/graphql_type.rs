//! Parsed GraphQL type expressions.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A GraphQL type expression such as `[Post!]!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GraphqlType {
    Named(String),
    List(Box<GraphqlType>),
    NonNull(Box<GraphqlType>),
}

/// Error returned when a type string is not a valid type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid GraphQL type `{input}`: {reason}")]
pub struct TypeParseError {
    pub input: String,
    pub reason: &'static str,
}

impl GraphqlType {
    /// Parse a type expression from IR type-string syntax.
    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let fail = |reason| TypeParseError { input: input.to_string(), reason };
        Self::parse_inner(input.trim()).map_err(fail)
    }

    fn parse_inner(s: &str) -> Result<Self, &'static str> {
        if s.is_empty() {
            return Err("empty type");
        }

        if let Some(inner) = s.strip_suffix('!') {
            let inner = Self::parse_inner(inner)?;
            if matches!(inner, Self::NonNull(_)) {
                return Err("repeated `!`");
            }
            return Ok(Self::NonNull(Box::new(inner)));
        }

        if let Some(rest) = s.strip_prefix('[') {
            let inner = rest.strip_suffix(']').ok_or("unbalanced brackets")?;
            return Ok(Self::List(Box::new(Self::parse_inner(inner)?)));
        }

        if s.ends_with(']') {
            return Err("unbalanced brackets");
        }

        let mut chars = s.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err("invalid type name");
        }

        Ok(Self::Named(s.to_string()))
    }

    /// Returns true if the outermost type is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Returns true if the type (ignoring non-null) is a list.
    pub fn is_list(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::NonNull(inner) => inner.is_list(),
            Self::Named(_) => false,
        }
    }

    /// The named type at the bottom of the expression.
    pub fn base_name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.base_name(),
        }
    }
}

impl FromStr for GraphqlType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GraphqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::List(inner) => write!(f, "[{}]", inner),
            Self::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}
