//! Shape construction for selection sets.
//!
//! A selection set becomes a [`ShapeSpec`]: fragment spreads are flattened
//! into it, fields sharing a response name are merged, object-valued fields
//! and inline fragments produce nested shapes. Nested shapes are built under
//! a forked context that reserves the enclosing shape's name, and a
//! generated name that is already reserved (or already generated at the
//! same level) is a hard error.

use shapegen_core::{capitalize, decapitalize, singularize};
use shapegen_ir::{Field, GraphqlType, InlineFragment};

use crate::{
    AccessorSpec, BuildError, BuilderSpec, GenerationContext, PropertyKind, PropertySpec, Result,
    ShapeSpec, TypeResolver,
};

/// Prefix of inline fragment shape names.
pub const INLINE_FRAGMENT_PREFIX: &str = "As";

/// A selection set borrowed from the IR.
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub fields: Vec<&'a Field>,
    pub fragment_spreads: Vec<&'a str>,
    pub inline_fragments: Vec<&'a InlineFragment>,
}

impl<'a> Selection<'a> {
    pub fn new(
        fields: &'a [Field],
        fragment_spreads: &'a [String],
        inline_fragments: &'a [InlineFragment],
    ) -> Self {
        Self {
            fields: fields.iter().collect(),
            fragment_spreads: fragment_spreads.iter().map(String::as_str).collect(),
            inline_fragments: inline_fragments.iter().collect(),
        }
    }

    /// The selection set nested under an inline fragment.
    pub fn of_inline_fragment(fragment: &'a InlineFragment) -> Self {
        Self::new(&fragment.fields, fragment.fragment_spreads(), &[])
    }
}

/// A field after merging every declaration sharing its response name.
#[derive(Debug)]
struct MergedField<'a> {
    field: &'a Field,
    nested: Selection<'a>,
    has_selection: bool,
    /// True only if every merged declaration carries a condition.
    conditional: bool,
}

/// Build the shape named `name` for `selection`.
pub fn build_shape(
    name: &str,
    selection: Selection<'_>,
    ctx: &GenerationContext,
) -> Result<ShapeSpec> {
    ShapeBuilder::new(ctx).build(name, selection, &[])
}

/// Build a fragment's shape; the fragment itself counts as being expanded.
pub fn build_fragment_shape(
    name: &str,
    fragment_name: &str,
    selection: Selection<'_>,
    ctx: &GenerationContext,
) -> Result<ShapeSpec> {
    ShapeBuilder::new(ctx).build(name, selection, &[fragment_name])
}

struct ShapeBuilder<'c> {
    ctx: &'c GenerationContext,
}

impl<'c> ShapeBuilder<'c> {
    fn new(ctx: &'c GenerationContext) -> Self {
        Self { ctx }
    }

    fn build(&self, name: &str, selection: Selection<'_>, expanding: &[&str]) -> Result<ShapeSpec> {
        let ctx = self.ctx;
        let settings = ctx.settings();
        let child_ctx = ctx.reserve(name);

        let mut chain: Vec<&str> = expanding.to_vec();
        let mut fields: Vec<MergedField<'_>> = Vec::new();
        let mut inline_fragments: Vec<&InlineFragment> = Vec::new();
        flatten(ctx, selection, &mut chain, &mut fields, &mut inline_fragments)?;

        let mut shape = ShapeSpec::new(name);
        let mut generated: Vec<String> = Vec::new();

        for merged in fields {
            let field = merged.field;
            let field_ctx = child_ctx.push(&field.response_name);
            let resolver = TypeResolver::new(&field_ctx).deprecated(field.deprecated());
            let optional = merged.conditional.then_some(true);

            let (ty, kind) = if merged.has_selection {
                let is_list = GraphqlType::parse(&field.type_name)
                    .map_err(|_| BuildError::UnresolvableType {
                        type_name: field.type_name.clone(),
                        path: field_ctx.path_string(),
                    })?
                    .is_list();
                let nested_name = nested_shape_name(&field.response_name, is_list);
                check_collision(&field_ctx, &generated, &nested_name)?;

                let nested = ShapeBuilder::new(&field_ctx).build(&nested_name, merged.nested, &chain)?;
                let ty = resolver.resolve_shape(&field.type_name, &nested_name, optional)?;
                generated.push(nested_name.clone());
                shape.nested.push(nested);
                (ty, PropertyKind::Object(nested_name))
            } else {
                let ty = resolver.resolve_with(&field.type_name, optional, None)?;
                (ty, PropertyKind::Value)
            };

            shape.properties.push(PropertySpec {
                name: field.response_name.clone(),
                field_name: field.field_name.clone(),
                optional: ty.is_optional() || merged.conditional,
                ty,
                kind,
                description: field.description.clone(),
                deprecation_reason: field.deprecation_reason.clone(),
                conditions: field.conditions().to_vec(),
            });
        }

        for fragment in inline_fragments {
            let nested_name = format!(
                "{}{}",
                INLINE_FRAGMENT_PREFIX,
                capitalize(&fragment.type_condition)
            );
            let fragment_ctx = child_ctx.push(&nested_name);
            check_collision(&fragment_ctx, &generated, &nested_name)?;
            let property_name = decapitalize(&nested_name);
            if shape.property(&property_name).is_some() {
                return Err(BuildError::NamingCollisionUnresolved {
                    name: property_name,
                    path: fragment_ctx.path_string(),
                });
            }

            let mut nested = ShapeBuilder::new(&fragment_ctx).build(
                &nested_name,
                Selection::of_inline_fragment(fragment),
                &chain,
            )?;
            nested.type_condition = Some(fragment.type_condition.clone());
            nested.possible_types = fragment.possible_types().to_vec();

            let ty = TypeResolver::new(&fragment_ctx).optional_shape(&nested_name);
            shape.properties.push(PropertySpec {
                name: property_name,
                field_name: String::new(),
                ty,
                kind: PropertyKind::InlineFragment(nested_name.clone()),
                optional: true,
                description: None,
                deprecation_reason: None,
                conditions: Vec::new(),
            });
            generated.push(nested_name);
            shape.nested.push(nested);
        }

        if settings.generate_accessors {
            shape.accessors = shape
                .properties
                .iter()
                .map(|property| AccessorSpec {
                    name: property.name.clone(),
                    returns: property.ty.clone(),
                })
                .collect();
        }

        if settings.generate_model_builder {
            shape.builder = Some(
                shape
                    .properties
                    .iter()
                    .fold(BuilderSpec::new(name), |builder, property| {
                        builder.setter(&property.name, &property.ty)
                    }),
            );
        }

        Ok(shape)
    }
}

/// Name of the nested shape generated for an object-valued field.
///
/// List-typed fields name their element shape, so the name is singularized
/// (`posts` -> `Post`).
pub fn nested_shape_name(response_name: &str, is_list: bool) -> String {
    let name = capitalize(response_name);
    if is_list {
        capitalize(&singularize(&name))
    } else {
        name
    }
}

fn check_collision(ctx: &GenerationContext, generated: &[String], name: &str) -> Result<()> {
    if ctx.is_reserved(name) || generated.iter().any(|g| g == name) {
        return Err(BuildError::NamingCollisionUnresolved {
            name: name.to_string(),
            path: ctx.path_string(),
        });
    }
    Ok(())
}

/// Flatten fragment spreads into `fields`/`inline_fragments`, merging by response name.
///
/// `chain` holds the fragments currently being expanded; a spread of one of
/// them is skipped.
fn flatten<'a>(
    ctx: &'a GenerationContext,
    selection: Selection<'a>,
    chain: &mut Vec<&'a str>,
    fields: &mut Vec<MergedField<'a>>,
    inline_fragments: &mut Vec<&'a InlineFragment>,
) -> Result<()> {
    for field in selection.fields {
        merge_field(fields, field);
    }
    inline_fragments.extend(selection.inline_fragments);

    for spread in selection.fragment_spreads {
        if chain.contains(&spread) {
            continue;
        }
        let fragment = ctx
            .settings()
            .fragment(spread)
            .ok_or_else(|| BuildError::UnknownFragment {
                name: spread.to_string(),
                path: ctx.path_string(),
            })?;

        chain.push(spread);
        let contributed = Selection::new(
            &fragment.fields,
            &fragment.fragment_spreads,
            &fragment.inline_fragments,
        );
        flatten(ctx, contributed, chain, fields, inline_fragments)?;
        chain.pop();
    }
    Ok(())
}

fn merge_field<'a>(fields: &mut Vec<MergedField<'a>>, field: &'a Field) {
    let nested = Selection::new(
        field.nested_fields(),
        field.fragment_spreads(),
        field.inline_fragments(),
    );

    match fields
        .iter_mut()
        .find(|merged| merged.field.response_name == field.response_name)
    {
        Some(merged) => {
            merged.nested.fields.extend(nested.fields);
            merged.nested.fragment_spreads.extend(nested.fragment_spreads);
            merged.nested.inline_fragments.extend(nested.inline_fragments);
            merged.has_selection |= field.has_selection_set();
            merged.conditional &= field.is_conditional();
        }
        None => fields.push(MergedField {
            field,
            nested,
            has_selection: field.has_selection_set(),
            conditional: field.is_conditional(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use shapegen_ir::CodegenIr;
    use shapegen_manifest::Config;

    use super::*;
    use crate::Settings;

    fn context(ir: &CodegenIr, config: &Config) -> GenerationContext {
        GenerationContext::new(Settings::new(config, ir, "com.example")).reserve("HeroQuery")
    }

    fn fields(value: serde_json::Value) -> Vec<Field> {
        serde_json::from_value(value).unwrap()
    }

    fn ir(value: serde_json::Value) -> CodegenIr {
        serde_json::from_value(value).unwrap()
    }

    fn outline(shape: &ShapeSpec) -> String {
        fn walk(shape: &ShapeSpec, depth: usize, out: &mut String) {
            let indent = "  ".repeat(depth);
            out.push_str(&format!("{}{}\n", indent, shape.name));
            for property in &shape.properties {
                out.push_str(&format!("{}  .{}: {}\n", indent, property.name, property.ty));
            }
            for nested in &shape.nested {
                walk(nested, depth + 1, out);
            }
        }
        let mut out = String::new();
        walk(shape, 0, &mut out);
        out.trim_end().to_string()
    }

    #[test]
    fn test_nested_shapes_and_fragments() {
        let ir = ir(serde_json::json!({
            "fragments": [{
                "fragmentName": "HeroDetails",
                "source": "fragment HeroDetails on Character { name appearsIn }",
                "typeCondition": "Character",
                "fields": [
                    { "responseName": "name", "fieldName": "name", "type": "String!" },
                    { "responseName": "appearsIn", "fieldName": "appearsIn", "type": "[Episode]!" }
                ]
            }],
            "typesUsed": [{ "kind": "EnumType", "name": "Episode", "values": [] }]
        }));
        let selection = fields(serde_json::json!([{
            "responseName": "hero",
            "fieldName": "hero",
            "type": "Character",
            "fields": [
                { "responseName": "name", "fieldName": "name", "type": "String!" },
                {
                    "responseName": "friends",
                    "fieldName": "friends",
                    "type": "[Character]",
                    "fields": [{ "responseName": "id", "fieldName": "id", "type": "ID!" }]
                }
            ],
            "fragmentSpreads": ["HeroDetails"],
            "inlineFragments": [{
                "typeCondition": "Droid",
                "possibleTypes": ["Droid"],
                "fields": [{ "responseName": "primaryFunction", "fieldName": "primaryFunction", "type": "String" }]
            }]
        }]));

        let ctx = context(&ir, &Config::default());
        let shape = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap();

        insta::assert_snapshot!(outline(&shape), @r"
        Data
          .hero: @Nullable Hero
          Hero
            .name: @Nonnull String
            .friends: @Nullable List<@Nullable Friend>
            .appearsIn: @Nonnull List<@Nullable com.example.type.Episode>
            .asDroid: @Nullable AsDroid
            Friend
              .id: @Nonnull String
            AsDroid
              .primaryFunction: @Nullable String
        ");

        let hero = shape.nested_shape("Hero").unwrap();
        let as_droid = hero.nested_shape("AsDroid").unwrap();
        assert_eq!(as_droid.type_condition.as_deref(), Some("Droid"));
        assert_eq!(as_droid.possible_types, ["Droid"]);
        assert_eq!(hero.property("asDroid").unwrap().kind, PropertyKind::InlineFragment("AsDroid".into()));
        assert_eq!(hero.accessors.len(), hero.properties.len());
        assert!(hero.builder.is_none());
    }

    #[test]
    fn test_list_fields_are_singularized() {
        assert_eq!(nested_shape_name("posts", true), "Post");
        assert_eq!(nested_shape_name("items", true), "Item");
        assert_eq!(nested_shape_name("series", true), "Series");
        assert_eq!(nested_shape_name("posts", false), "Posts");
        assert_eq!(nested_shape_name("people", true), "Person");
    }

    #[test]
    fn test_inline_fragment_property_clashes_with_field() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([{
            "responseName": "hero",
            "fieldName": "hero",
            "type": "Character",
            "fields": [{ "responseName": "asDroid", "fieldName": "name", "type": "String" }],
            "inlineFragments": [{ "typeCondition": "Droid", "fields": [] }]
        }]));

        let ctx = context(&ir, &Config::default());
        let err = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap_err();
        assert_eq!(
            err,
            BuildError::NamingCollisionUnresolved {
                name: "asDroid".into(),
                path: "hero.AsDroid".into()
            }
        );
    }

    #[test]
    fn test_sibling_inline_fragments_collide() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([{
            "responseName": "hero",
            "fieldName": "hero",
            "type": "Character",
            "fields": [],
            "inlineFragments": [
                { "typeCondition": "Droid", "fields": [] },
                { "typeCondition": "droid", "fields": [] }
            ]
        }]));

        let ctx = context(&ir, &Config::default());
        let err = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap_err();
        assert_eq!(
            err,
            BuildError::NamingCollisionUnresolved {
                name: "AsDroid".into(),
                path: "hero.AsDroid".into()
            }
        );
    }

    #[test]
    fn test_ancestor_name_collides() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([{
            "responseName": "data",
            "fieldName": "data",
            "type": "Payload",
            "fields": [{ "responseName": "id", "fieldName": "id", "type": "ID" }]
        }]));

        let ctx = context(&ir, &Config::default());
        let err = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap_err();
        assert_eq!(
            err,
            BuildError::NamingCollisionUnresolved {
                name: "Data".into(),
                path: "data".into()
            }
        );
    }

    #[test]
    fn test_same_name_in_different_branches_is_allowed() {
        let ir = CodegenIr::default();
        let friends = serde_json::json!({
            "responseName": "friends",
            "fieldName": "friends",
            "type": "[Character]",
            "fields": [{ "responseName": "name", "fieldName": "name", "type": "String" }]
        });
        let selection = fields(serde_json::json!([
            { "responseName": "hero", "fieldName": "hero", "type": "Character", "fields": [friends.clone()] },
            { "responseName": "villain", "fieldName": "villain", "type": "Character", "fields": [friends] }
        ]));

        let ctx = context(&ir, &Config::default());
        let shape = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap();
        assert!(shape.nested_shape("Hero").unwrap().nested_shape("Friend").is_some());
        assert!(shape.nested_shape("Villain").unwrap().nested_shape("Friend").is_some());
    }

    #[test]
    fn test_duplicate_response_names_merge() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([
            {
                "responseName": "hero", "fieldName": "hero", "type": "Character",
                "fields": [{ "responseName": "name", "fieldName": "name", "type": "String" }]
            },
            {
                "responseName": "hero", "fieldName": "hero", "type": "Character",
                "fields": [
                    { "responseName": "name", "fieldName": "name", "type": "String" },
                    { "responseName": "id", "fieldName": "id", "type": "ID!" }
                ]
            }
        ]));

        let ctx = context(&ir, &Config::default());
        let shape = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap();
        assert_eq!(shape.properties.len(), 1);
        let hero = shape.nested_shape("Hero").unwrap();
        let names: Vec<_> = hero.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["name", "id"]);
    }

    #[test]
    fn test_unknown_fragment() {
        let ir = CodegenIr::default();
        let spreads = vec!["Missing".to_string()];
        let ctx = context(&ir, &Config::default());
        let err = build_shape("Data", Selection::new(&[], &spreads, &[]), &ctx).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnknownFragment {
                name: "Missing".into(),
                path: String::new()
            }
        );
    }

    #[test]
    fn test_recursive_fragment_spread_is_expanded_once() {
        let ir = ir(serde_json::json!({
            "fragments": [{
                "fragmentName": "Loop",
                "source": "fragment Loop on Node { id ...Loop }",
                "typeCondition": "Node",
                "fields": [{ "responseName": "id", "fieldName": "id", "type": "ID!" }],
                "fragmentSpreads": ["Loop"]
            }]
        }));
        let fragment = ir.fragment("Loop").unwrap();
        let ctx = GenerationContext::new(Settings::new(&Config::default(), &ir, ""));
        let shape = build_fragment_shape(
            "Loop",
            "Loop",
            Selection::new(&fragment.fields, &fragment.fragment_spreads, &[]),
            &ctx,
        )
        .unwrap();
        assert_eq!(shape.properties.len(), 1);
    }

    #[test]
    fn test_conditional_fields_are_optional() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([
            {
                "responseName": "likes", "fieldName": "likes", "type": "Int!",
                "conditions": [{ "kind": "BooleanCondition", "variableName": "withLikes", "inverted": false }]
            },
            { "responseName": "views", "fieldName": "views", "type": "Int!" }
        ]));

        let ctx = context(&ir, &Config::default());
        let shape = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap();
        let likes = shape.property("likes").unwrap();
        assert!(likes.optional);
        assert_eq!(likes.ty.to_string(), "@Nullable Integer");
        assert_eq!(likes.conditions.len(), 1);
        let views = shape.property("views").unwrap();
        assert!(!views.optional);
        assert_eq!(views.ty.to_string(), "int");
    }

    #[test]
    fn test_builders_and_no_accessors() {
        let ir = CodegenIr::default();
        let config: Config = "[codegen]\ngenerate_accessors = false\ngenerate_model_builder = true\n"
            .parse()
            .unwrap();
        let selection = fields(serde_json::json!([
            { "responseName": "id", "fieldName": "id", "type": "ID!" },
            { "responseName": "title", "fieldName": "title", "type": "String" },
            { "responseName": "version", "fieldName": "version", "type": "Int!" }
        ]));

        let ctx = context(&ir, &config);
        let shape = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap();
        assert!(shape.accessors.is_empty());
        let builder = shape.builder.unwrap();
        assert_eq!(builder.target, "Data");
        let required: Vec<_> = builder.required_setters().collect();
        assert_eq!(required, ["id"]);
    }

    #[test]
    fn test_unresolvable_field_reports_path() {
        let ir = CodegenIr::default();
        let selection = fields(serde_json::json!([{
            "responseName": "hero", "fieldName": "hero", "type": "Character",
            "fields": [{ "responseName": "planet", "fieldName": "planet", "type": "Planet" }]
        }]));

        let ctx = context(&ir, &Config::default());
        let err = build_shape("Data", Selection::new(&selection, &[], &[]), &ctx).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnresolvableType {
                type_name: "Planet".into(),
                path: "hero.planet".into()
            }
        );
    }
}
