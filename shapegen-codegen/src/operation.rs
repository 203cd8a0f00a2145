//! Assembly of operation and fragment types.

use shapegen_core::{capitalize, decapitalize, format_package_name, to_pascal_case};
use shapegen_ir::{Fragment, Operation};
use shapegen_manifest::NullableValueType;

use crate::{
    BuildError, BuilderSpec, FragmentSpec, GenerationContext, OperationKind, OperationSpec,
    ResolvedType, Result, TypeRef, TypeResolver, VariableSpec, VariablesSpec, Wrapping,
    shape::{Selection, build_fragment_shape, build_shape},
};

/// Name of an operation's root data shape.
pub const DATA_TYPE_NAME: &str = "Data";

/// Name of an operation's variables container.
pub const VARIABLES_TYPE_NAME: &str = "Variables";

/// Build the generated type for a fragment.
pub fn build_fragment(fragment: &Fragment, ctx: &GenerationContext) -> Result<FragmentSpec> {
    let name = capitalize(&fragment.fragment_name);
    let selection = Selection::new(
        &fragment.fields,
        &fragment.fragment_spreads,
        &fragment.inline_fragments,
    );
    let shape = build_fragment_shape(&name, &fragment.fragment_name, selection, ctx)?;

    Ok(FragmentSpec {
        package: ctx.settings().fragments_package.clone(),
        fragment_name: fragment.fragment_name.clone(),
        type_condition: fragment.type_condition.clone(),
        possible_types: fragment.possible_types.clone(),
        definition: fragment.source.clone(),
        shape,
    })
}

/// Build the generated type for an operation.
pub fn build_operation(operation: &Operation, ctx: &GenerationContext) -> Result<OperationSpec> {
    let settings = ctx.settings();
    let kind = OperationKind::parse(&operation.operation_type).ok_or_else(|| {
        BuildError::UnknownOperationType {
            operation: operation.operation_name.clone(),
            kind: operation.operation_type.clone(),
        }
    })?;

    let name = operation_type_name(operation, kind, settings.use_semantic_naming);
    let package = match &settings.output_package_name {
        Some(package) => package.clone(),
        None => format_package_name(&operation.file_path)?,
    };
    let document = operation_document(operation, ctx)?;

    let op_ctx = ctx.reserve(&name);
    let variables = if operation.has_variables() {
        Some(build_variables(operation, &op_ctx.push(VARIABLES_TYPE_NAME))?)
    } else {
        None
    };

    let data = build_shape(
        DATA_TYPE_NAME,
        Selection::new(&operation.fields, &[], &[]),
        &op_ctx,
    )?;

    let policy = match settings.nullable_value_type {
        NullableValueType::InputType => NullableValueType::Annotated,
        other => other,
    };
    let data_wrapper = ResolvedType {
        base: TypeRef::Shape(DATA_TYPE_NAME.to_string()),
        wrapping: Wrapping::Nullable(policy),
        deprecated: false,
    };

    let builder = variables
        .iter()
        .flat_map(|spec| &spec.variables)
        .fold(BuilderSpec::new(&name), |builder, variable| {
            builder.setter(&variable.name, &variable.ty)
        });

    tracing::debug!(operation = %operation.operation_name, %name, %package, "assembled operation");

    Ok(OperationSpec {
        name,
        package,
        kind,
        operation_name: operation.operation_name.clone(),
        operation_id: operation.operation_id.clone(),
        definition: operation.source.clone(),
        document,
        variables,
        data,
        data_wrapper,
        builder,
    })
}

/// Generated type name of an operation.
///
/// Semantic naming appends the kind suffix unless the operation name already
/// ends with it; otherwise the source file stem is used.
pub fn operation_type_name(
    operation: &Operation,
    kind: OperationKind,
    use_semantic_naming: bool,
) -> String {
    if use_semantic_naming {
        let name = capitalize(&operation.operation_name);
        if name.ends_with(kind.suffix()) {
            name
        } else {
            format!("{}{}", name, kind.suffix())
        }
    } else {
        to_pascal_case(file_stem(&operation.file_path))
    }
}

fn file_stem(path: &str) -> &str {
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    }
}

/// The exact document text sent for an operation.
fn operation_document(operation: &Operation, ctx: &GenerationContext) -> Result<String> {
    let mut parts = Vec::with_capacity(operation.fragments_referenced.len() + 1);
    parts.push(operation.source.as_str());
    for name in &operation.fragments_referenced {
        let fragment = ctx
            .settings()
            .fragment(name)
            .ok_or_else(|| BuildError::UnknownFragment {
                name: name.clone(),
                path: operation.operation_name.clone(),
            })?;
        parts.push(fragment.source.as_str());
    }
    Ok(parts.join("\n\n"))
}

fn build_variables(operation: &Operation, ctx: &GenerationContext) -> Result<VariablesSpec> {
    let variables = operation
        .variables
        .iter()
        .map(|variable| {
            let var_ctx = ctx.push(&variable.name);
            let ty = TypeResolver::new(&var_ctx).resolve(&variable.type_name)?;
            Ok(VariableSpec {
                name: decapitalize(&variable.name),
                graphql_name: variable.name.clone(),
                enforced_non_null: !variable.optional() && !ty.is_primitive(),
                ty,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(VariablesSpec {
        name: VARIABLES_TYPE_NAME.to_string(),
        variables,
    })
}
