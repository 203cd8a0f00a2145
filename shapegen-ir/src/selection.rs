//! Selection set building blocks: fields, inline fragments and conditions.

use serde::{Deserialize, Serialize};

/// A field selected in a selection set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Name under which the field appears in the response (alias or field name).
    pub response_name: String,
    /// Name of the field in the schema.
    pub field_name: String,
    /// GraphQL type string, e.g. `[Post!]!`.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: Option<bool>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    /// Nested selection set for object-valued fields.
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub fragment_spreads: Option<Vec<String>>,
    #[serde(default)]
    pub inline_fragments: Option<Vec<InlineFragment>>,
    /// `@skip` / `@include` conditions.
    #[serde(default)]
    pub conditions: Option<Vec<Condition>>,
}

impl Field {
    /// Nested fields (empty for leaf fields).
    pub fn nested_fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// Fragment spreads in the nested selection set.
    pub fn fragment_spreads(&self) -> &[String] {
        self.fragment_spreads.as_deref().unwrap_or_default()
    }

    /// Inline fragments in the nested selection set.
    pub fn inline_fragments(&self) -> &[InlineFragment] {
        self.inline_fragments.as_deref().unwrap_or_default()
    }

    /// Conditions attached to this field.
    pub fn conditions(&self) -> &[Condition] {
        self.conditions.as_deref().unwrap_or_default()
    }

    /// Returns true if the field selects sub-fields (is object-valued).
    pub fn has_selection_set(&self) -> bool {
        self.fields.is_some()
            || !self.fragment_spreads().is_empty()
            || !self.inline_fragments().is_empty()
    }

    /// Returns true if the field may be skipped at runtime.
    pub fn is_conditional(&self) -> bool {
        !self.conditions().is_empty()
    }

    /// Returns true if the field is marked deprecated.
    pub fn deprecated(&self) -> bool {
        self.is_deprecated.unwrap_or(false)
    }
}

/// A type-conditional selection (`... on Droid { ... }`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineFragment {
    pub type_condition: String,
    #[serde(default)]
    pub possible_types: Option<Vec<String>>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub fragment_spreads: Option<Vec<String>>,
}

impl InlineFragment {
    /// Fragment spreads scoped to this inline fragment.
    pub fn fragment_spreads(&self) -> &[String] {
        self.fragment_spreads.as_deref().unwrap_or_default()
    }

    /// Concrete types this fragment may match.
    pub fn possible_types(&self) -> &[String] {
        self.possible_types.as_deref().unwrap_or_default()
    }
}

/// A `@skip`/`@include` condition on a field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub kind: ConditionKind,
    pub variable_name: String,
    /// True for `@skip`, false for `@include`.
    pub inverted: bool,
}

/// Kind of field condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ConditionKind {
    #[serde(rename = "BooleanCondition")]
    Boolean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_field() {
        let field: Field = serde_json::from_str(
            r#"{ "responseName": "id", "fieldName": "id", "type": "ID!" }"#,
        )
        .unwrap();

        assert!(!field.has_selection_set());
        assert!(field.nested_fields().is_empty());
        assert!(!field.is_conditional());
        assert!(!field.deprecated());
    }

    #[test]
    fn test_object_field_with_fragments() {
        let field: Field = serde_json::from_str(
            r#"{
                "responseName": "hero",
                "fieldName": "hero",
                "type": "Character",
                "fields": [
                    { "responseName": "name", "fieldName": "name", "type": "String!" }
                ],
                "fragmentSpreads": ["HeroDetails"],
                "inlineFragments": [
                    { "typeCondition": "Droid", "possibleTypes": ["Droid"], "fields": [] }
                ],
                "conditions": [
                    { "kind": "BooleanCondition", "variableName": "withHero", "inverted": false }
                ]
            }"#,
        )
        .unwrap();

        assert!(field.has_selection_set());
        assert_eq!(field.nested_fields().len(), 1);
        assert_eq!(field.fragment_spreads(), ["HeroDetails".to_string()]);
        assert_eq!(field.inline_fragments()[0].possible_types(), ["Droid"]);
        assert!(field.is_conditional());
        assert_eq!(field.conditions()[0].kind, ConditionKind::Boolean);
    }

    #[test]
    fn test_spread_only_selection_counts_as_selection_set() {
        let field: Field = serde_json::from_str(
            r#"{ "responseName": "post", "fieldName": "post", "type": "Post",
                 "fragmentSpreads": ["PostDetails"] }"#,
        )
        .unwrap();
        assert!(field.has_selection_set());
    }
}
