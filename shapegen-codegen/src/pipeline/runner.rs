//! Compiler orchestrator.

use std::{collections::HashSet, sync::Arc};

use rayon::prelude::*;
use serde::Serialize;
use shapegen_ir::CodegenIr;

use super::{Diagnostic, Unit, UnitKind};
use crate::{BuildError, GeneratedType, GenerationContext, Settings};

/// Compiles an IR document into generated types, one unit at a time.
///
/// Units are independent: each receives its own clone of the root context,
/// and a failing unit is recorded as a diagnostic without affecting the
/// others.
///
/// # Example
///
/// ```ignore
/// let settings = Settings::new(&config, &ir, "com.example");
/// let output = Compiler::new(settings).compile(&ir);
///
/// for diag in output.diagnostics() {
///     eprintln!("{}", diag);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    ctx: GenerationContext,
    serial: bool,
}

impl Compiler {
    /// Create a compiler that builds units in parallel.
    pub fn new(settings: impl Into<Arc<Settings>>) -> Self {
        Self {
            ctx: GenerationContext::new(settings),
            serial: false,
        }
    }

    /// Build units on the calling thread, one after another.
    pub fn serial(mut self, serial: bool) -> Self {
        self.serial = serial;
        self
    }

    /// Compile every unit of `ir`.
    ///
    /// Output keeps unit order regardless of how units were scheduled.
    pub fn compile(&self, ir: &CodegenIr) -> CompilationOutput {
        let units = Unit::collect(ir, self.ctx.settings());
        let _span = tracing::info_span!("compile", units = units.len(), serial = self.serial).entered();

        let mut outputs: Vec<UnitOutput> = if self.serial {
            units.iter().map(|unit| self.run_unit(unit)).collect()
        } else {
            units.par_iter().map(|unit| self.run_unit(unit)).collect()
        };
        reject_duplicates(&mut outputs);

        let output = CompilationOutput { units: outputs };
        tracing::info!(
            generated = output.generated().count(),
            errors = output.error_count(),
            "compilation finished"
        );
        output
    }

    fn run_unit(&self, unit: &Unit<'_>) -> UnitOutput {
        let kind = unit.kind();
        let name = unit.name();
        let _span = tracing::debug_span!("unit", %kind, name).entered();

        let ctx = self.ctx.clone();
        match unit.build(&ctx) {
            Ok(generated) => {
                tracing::debug!("unit built");
                UnitOutput {
                    kind,
                    name: name.to_string(),
                    generated,
                    diagnostics: Vec::new(),
                }
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "{}", err);
                UnitOutput {
                    kind,
                    name: name.to_string(),
                    generated: None,
                    diagnostics: vec![Diagnostic::from_build_error(name, &err)],
                }
            }
        }
    }
}

/// A later unit generating an already generated `(package, name)` fails.
fn reject_duplicates(outputs: &mut [UnitOutput]) {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for output in outputs {
        let Some(generated) = &output.generated else {
            continue;
        };
        let key = (generated.package().to_string(), generated.name().to_string());
        if seen.insert(key) {
            continue;
        }

        let err = BuildError::NamingCollisionUnresolved {
            name: generated.name().to_string(),
            path: generated.class_name().to_string(),
        };
        tracing::warn!(unit = %output.name, code = err.code(), "{}", err);
        output.generated = None;
        output
            .diagnostics
            .push(Diagnostic::from_build_error(&output.name, &err));
    }
}

/// Result of building one unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitOutput {
    pub kind: UnitKind,
    pub name: String,
    /// The generated type, absent when the unit failed or generates nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl UnitOutput {
    /// Returns true if any diagnostic was recorded for this unit.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Result of compiling a whole IR document.
#[derive(Debug, Clone, Serialize)]
pub struct CompilationOutput {
    pub units: Vec<UnitOutput>,
}

impl CompilationOutput {
    /// Generated types, in unit order.
    pub fn generated(&self) -> impl Iterator<Item = &GeneratedType> {
        self.units.iter().filter_map(|unit| unit.generated.as_ref())
    }

    /// Every diagnostic, in unit order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.units.iter().flat_map(|unit| &unit.diagnostics)
    }

    /// Look up a unit's output by kind and name.
    pub fn unit(&self, kind: UnitKind, name: &str) -> Option<&UnitOutput> {
        self.units
            .iter()
            .find(|unit| unit.kind == kind && unit.name == name)
    }

    /// Check if any unit recorded a diagnostic.
    pub fn has_errors(&self) -> bool {
        self.units.iter().any(UnitOutput::has_errors)
    }

    /// Count the recorded diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics().count()
    }
}
