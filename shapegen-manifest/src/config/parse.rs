//! Configuration parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Config, validate::ValidationContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, "shapegen.toml")
    }
}

impl Config {
    /// Parse a shapegen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_config(&content, &path.display().to_string())
    }

    /// Parse a shapegen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

/// Parse a configuration from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source_ctx = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_config(&config, &source_ctx)?;
    Ok(config)
}

/// Validate the configuration after parsing.
fn validate_config(config: &Config, source: &SourceContext) -> Result<()> {
    let ctx = ValidationContext::new(source);

    if let Some(package) = &config.codegen.output_package_name {
        ctx.push("codegen").validate_package("output_package_name", package)?;
    }

    let custom_ctx = ctx.push("custom_types");
    for (scalar, target) in &config.custom_types {
        custom_ctx.validate_scalar_name(scalar)?;
        custom_ctx.push(scalar).validate_target(scalar, target)?;
    }

    Ok(())
}
