//! Check command report data structures.

use std::path::{Path, PathBuf};

use shapegen_codegen::CompilationOutput;

use super::output::{Output, Report};

/// Report data from compiling an IR document.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the IR document.
    pub ir_path: PathBuf,
    /// Generated types as `(kind, class name)` pairs, in unit order.
    pub generated: Vec<(String, String)>,
    /// Rendered diagnostics.
    pub errors: Vec<String>,
}

impl CheckReport {
    pub fn new(ir_path: &Path, output: &CompilationOutput) -> Self {
        let generated = output
            .units
            .iter()
            .filter_map(|unit| {
                let ty = unit.generated.as_ref()?;
                Some((unit.kind.to_string(), ty.class_name().to_string()))
            })
            .collect();

        Self {
            ir_path: ir_path.to_path_buf(),
            generated,
            errors: output.diagnostics().map(|d| d.to_string()).collect(),
        }
    }

    /// Whether every unit compiled (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.diagnostic(error);
        }
        if !self.errors.is_empty() {
            out.newline();
        }

        out.heading(&format!(
            "{} type{}",
            self.generated.len(),
            if self.generated.len() == 1 { "" } else { "s" }
        ));
        for (kind, class_name) in &self.generated {
            out.generated_type(kind, class_name);
        }
        out.newline();

        if self.is_valid() {
            out.verdict(true, &format!("{} compiled", self.ir_path.display()));
        } else {
            out.verdict(
                false,
                &format!(
                    "{} failed with {} error{}",
                    self.ir_path.display(),
                    self.errors.len(),
                    if self.errors.len() == 1 { "" } else { "s" }
                ),
            );
        }
    }
}
