//! Builders for declared types: enums, input objects and the custom scalar enum.

use shapegen_core::to_constant_case;
use shapegen_ir::{EnumValue, InputField};
use shapegen_manifest::NullableValueType;

use crate::{
    BuilderSpec, CustomScalarConstant, CustomScalarsSpec, EnumTypeSpec, EnumValueSpec,
    GenerationContext, InputFieldSpec, InputTypeSpec, Result, TypeRef, TypeResolver,
};

/// Name of the generated custom scalar enum.
pub const CUSTOM_SCALARS_TYPE_NAME: &str = "CustomType";

/// Build the enum type for a declared enum.
pub fn build_enum(
    name: &str,
    description: Option<&str>,
    values: &[EnumValue],
    ctx: &GenerationContext,
) -> EnumTypeSpec {
    EnumTypeSpec {
        name: name.to_string(),
        package: ctx.settings().types_package.clone(),
        description: description.map(str::to_string),
        values: values
            .iter()
            .map(|value| EnumValueSpec {
                name: value.name.clone(),
                description: value.description.clone(),
                deprecated: value.deprecated(),
                deprecation_reason: value.deprecation_reason.clone(),
            })
            .collect(),
    }
}

/// Build the input type for a declared input object.
///
/// Optional fields are wrapped with the input-value policy regardless of the
/// configured nullable policy.
pub fn build_input_object(
    name: &str,
    description: Option<&str>,
    fields: &[InputField],
    ctx: &GenerationContext,
) -> Result<InputTypeSpec> {
    let type_ctx = ctx.reserve(name).push(name);

    let mut specs = Vec::with_capacity(fields.len());
    let mut builder = BuilderSpec::new(name);
    for field in fields {
        let field_ctx = type_ctx.push(&field.name);
        let policy = field.optional().then_some(NullableValueType::InputType);
        let ty = TypeResolver::new(&field_ctx).resolve_with(&field.type_name, None, policy)?;

        builder = builder
            .setter(&field.name, &ty)
            .default_value(field.default_value.clone());
        specs.push(InputFieldSpec {
            name: field.name.clone(),
            ty,
            description: field.description.clone(),
            default_value: field.default_value.clone(),
        });
    }

    Ok(InputTypeSpec {
        name: name.to_string(),
        package: ctx.settings().types_package.clone(),
        description: description.map(str::to_string),
        fields: specs,
        builder,
    })
}

/// Build the custom scalar enum, or `None` when the custom map is empty.
pub fn build_custom_scalars(ctx: &GenerationContext) -> Option<CustomScalarsSpec> {
    let settings = ctx.settings();
    if settings.custom_types.is_empty() {
        return None;
    }

    Some(CustomScalarsSpec {
        name: CUSTOM_SCALARS_TYPE_NAME.to_string(),
        package: settings.types_package.clone(),
        constants: settings
            .custom_types
            .iter()
            .map(|(graphql_name, target)| CustomScalarConstant {
                name: to_constant_case(graphql_name),
                graphql_name: graphql_name.clone(),
                target: TypeRef::from_target(target),
            })
            .collect(),
    })
}
