//! Units of compilation.

use serde::Serialize;
use shapegen_ir::{CodegenIr, Fragment, Operation, TypeDeclaration};

use crate::{
    GeneratedType, GenerationContext, Result, Settings, build_custom_scalars, build_enum,
    build_fragment, build_input_object, build_operation, declared::CUSTOM_SCALARS_TYPE_NAME,
};

/// What a unit generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Fragment,
    Enum,
    InputObject,
    CustomScalars,
    Operation,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Fragment => write!(f, "fragment"),
            UnitKind::Enum => write!(f, "enum"),
            UnitKind::InputObject => write!(f, "input object"),
            UnitKind::CustomScalars => write!(f, "custom scalars"),
            UnitKind::Operation => write!(f, "operation"),
        }
    }
}

/// One independently built piece of the IR.
#[derive(Debug, Clone, Copy)]
pub enum Unit<'ir> {
    Fragment(&'ir Fragment),
    /// A declared enum or input object.
    Declaration(&'ir TypeDeclaration),
    CustomScalars,
    Operation(&'ir Operation),
}

impl<'ir> Unit<'ir> {
    /// Collect the units of `ir` in generation order.
    ///
    /// Fragments come first, then declared types, the custom scalar enum and
    /// finally operations. Scalar declarations feed the custom scalar map and
    /// produce no unit of their own.
    pub fn collect(ir: &'ir CodegenIr, settings: &Settings) -> Vec<Self> {
        let mut units: Vec<Self> = ir.fragments.iter().map(Unit::Fragment).collect();
        units.extend(
            ir.types_used
                .iter()
                .filter(|decl| decl.is_generated())
                .map(Unit::Declaration),
        );
        if !settings.custom_types.is_empty() {
            units.push(Unit::CustomScalars);
        }
        units.extend(ir.operations.iter().map(Unit::Operation));
        units
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Fragment(_) => UnitKind::Fragment,
            Unit::Declaration(TypeDeclaration::InputObject { .. }) => UnitKind::InputObject,
            Unit::Declaration(_) => UnitKind::Enum,
            Unit::CustomScalars => UnitKind::CustomScalars,
            Unit::Operation(_) => UnitKind::Operation,
        }
    }

    /// Name used to report on the unit.
    pub fn name(&self) -> &'ir str {
        match *self {
            Unit::Fragment(fragment) => &fragment.fragment_name,
            Unit::Declaration(decl) => decl.name(),
            Unit::CustomScalars => CUSTOM_SCALARS_TYPE_NAME,
            Unit::Operation(operation) => &operation.operation_name,
        }
    }

    /// Build the unit's generated type.
    pub fn build(&self, ctx: &GenerationContext) -> Result<Option<GeneratedType>> {
        let generated = match *self {
            Unit::Fragment(fragment) => Some(GeneratedType::Fragment(build_fragment(fragment, ctx)?)),
            Unit::Declaration(TypeDeclaration::Enum {
                name,
                description,
                values,
            }) => Some(GeneratedType::Enum(build_enum(
                name,
                description.as_deref(),
                values,
                ctx,
            ))),
            Unit::Declaration(TypeDeclaration::InputObject {
                name,
                description,
                fields,
            }) => Some(GeneratedType::InputObject(build_input_object(
                name,
                description.as_deref(),
                fields,
                ctx,
            )?)),
            Unit::Declaration(TypeDeclaration::Scalar { .. }) => None,
            Unit::CustomScalars => build_custom_scalars(ctx).map(GeneratedType::CustomScalars),
            Unit::Operation(operation) => Some(GeneratedType::Operation(Box::new(
                build_operation(operation, ctx)?,
            ))),
        };
        Ok(generated)
    }
}
