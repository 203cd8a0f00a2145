//! IR document loading.

use std::path::Path;

use shapegen_ir::CodegenIr;

use crate::{Error, Result, error::SourceContext};

/// Load an IR document from a JSON file.
pub fn load_ir(path: impl AsRef<Path>) -> Result<CodegenIr> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_ir(&content, &path.display().to_string())
}

/// Parse an IR document from JSON content with the given filename for error reporting.
///
/// Any mismatch with the expected entity shapes is a `MalformedIr` error;
/// nothing is compiled from a document that fails here.
pub fn parse_ir(content: &str, filename: &str) -> Result<CodegenIr> {
    let source_ctx = SourceContext::new(content, filename);
    serde_json::from_str(content).map_err(|e| source_ctx.malformed_ir_error(e))
}
