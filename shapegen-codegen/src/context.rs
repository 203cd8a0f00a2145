//! Per-run generation settings and the forkable generation context.

use std::sync::Arc;

use indexmap::IndexMap;
use shapegen_ir::{CodegenIr, Fragment, TypeDeclaration};
use shapegen_manifest::{Config, NullableValueType};

/// Extended AWS scalars and their default targets.
const AWS_SCALARS: &[(&str, &str)] = &[
    ("AWSDate", "String"),
    ("AWSTime", "String"),
    ("AWSDateTime", "String"),
    ("AWSTimestamp", "Long"),
    ("AWSEmail", "String"),
    ("AWSJSON", "String"),
    ("AWSURL", "String"),
    ("AWSPhone", "String"),
    ("AWSIPAddress", "String"),
];

/// Target used for declared scalars the user did not map.
const UNMAPPED_SCALAR_TARGET: &str = "java.lang.Object";

/// Build the effective custom scalar map for a run.
///
/// Declared scalars come first (in declaration order), then `ID`, then the
/// extended AWS scalars. User mappings win over every default.
pub fn supported_type_map(
    user: &IndexMap<String, String>,
    declarations: &[TypeDeclaration],
) -> IndexMap<String, String> {
    let mapped = |name: &str, default: &str| {
        user.get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    let mut map: IndexMap<String, String> = declarations
        .iter()
        .filter(|decl| decl.is_scalar())
        .map(|decl| {
            (
                decl.name().to_string(),
                mapped(decl.name(), UNMAPPED_SCALAR_TARGET),
            )
        })
        .collect();

    map.insert("ID".to_string(), mapped("ID", "String"));
    for (name, default) in AWS_SCALARS {
        map.insert(name.to_string(), mapped(name, default));
    }
    map
}

/// Immutable settings shared by every unit of a run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Effective custom scalar map (see [`supported_type_map`]).
    pub custom_types: IndexMap<String, String>,
    pub nullable_value_type: NullableValueType,
    pub types_package: String,
    pub fragments_package: String,
    pub output_package_name: Option<String>,
    pub generate_accessors: bool,
    pub generate_model_builder: bool,
    pub use_semantic_naming: bool,
    /// Declared types by name.
    pub declarations: IndexMap<String, TypeDeclaration>,
    /// Fragments by name.
    pub fragments: IndexMap<String, Fragment>,
}

impl Settings {
    /// Create settings for `ir` from a configuration.
    ///
    /// `base_package` is used for the fragment and type packages when the
    /// configuration does not name an output package.
    pub fn new(config: &Config, ir: &CodegenIr, base_package: &str) -> Self {
        let codegen = &config.codegen;
        let base = codegen
            .output_package_name
            .as_deref()
            .unwrap_or(base_package);
        let sub_package = |name: &str| {
            if base.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", base, name)
            }
        };

        Self {
            custom_types: supported_type_map(&config.custom_types, &ir.types_used),
            nullable_value_type: codegen.nullable_value_type,
            types_package: sub_package("type"),
            fragments_package: sub_package("fragment"),
            output_package_name: codegen.output_package_name.clone(),
            generate_accessors: codegen.generate_accessors,
            generate_model_builder: codegen.generate_model_builder,
            use_semantic_naming: codegen.use_semantic_naming,
            declarations: ir
                .types_used
                .iter()
                .map(|decl| (decl.name().to_string(), decl.clone()))
                .collect(),
            fragments: ir
                .fragments
                .iter()
                .map(|fragment| (fragment.fragment_name.clone(), fragment.clone()))
                .collect(),
        }
    }

    /// Look up a fragment by name.
    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    /// Look up a declared type by name.
    pub fn declaration(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.get(name)
    }
}

/// Generation context threaded through shape construction.
///
/// Forking (`reserve`, `push`) returns a new context and never mutates the
/// parent, so sibling branches cannot observe each other's reservations.
///
/// # Example
///
/// ```ignore
/// let ctx = GenerationContext::new(settings);
/// let op_ctx = ctx.reserve("AllPostsQuery");
/// let data_ctx = op_ctx.reserve("Data").push("allPosts");
/// assert!(data_ctx.is_reserved("Data"));
/// assert!(!ctx.is_reserved("Data"));
/// ```
#[derive(Debug, Clone)]
pub struct GenerationContext {
    settings: Arc<Settings>,
    reserved: Vec<String>,
    path: Vec<String>,
}

impl GenerationContext {
    /// Create a root context with nothing reserved.
    pub fn new(settings: impl Into<Arc<Settings>>) -> Self {
        Self {
            settings: settings.into(),
            reserved: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Shared settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Return a new context that additionally reserves `name`.
    pub fn reserve(&self, name: impl Into<String>) -> Self {
        let mut reserved = self.reserved.clone();
        reserved.push(name.into());
        Self {
            settings: Arc::clone(&self.settings),
            reserved,
            path: self.path.clone(),
        }
    }

    /// Return a new context one path segment deeper.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            settings: Arc::clone(&self.settings),
            reserved: self.reserved.clone(),
            path,
        }
    }

    /// Returns true if an ancestor reserved `name`.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|reserved| reserved == name)
    }

    /// Names reserved by ancestors, outermost first.
    pub fn reserved_type_names(&self) -> &[String] {
        &self.reserved
    }

    /// Current path as a dot-separated string (used in diagnostics).
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ir_with_scalar(name: &str) -> CodegenIr {
        serde_json::from_value(serde_json::json!({
            "typesUsed": [
                { "kind": "ScalarType", "name": name },
                { "kind": "EnumType", "name": "Episode", "values": [] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_supported_type_map_defaults() {
        let ir = ir_with_scalar("Date");
        let map = supported_type_map(&IndexMap::new(), &ir.types_used);

        assert_eq!(map["Date"], "java.lang.Object");
        assert_eq!(map["ID"], "String");
        assert_eq!(map["AWSTimestamp"], "Long");
        assert_eq!(map["AWSJSON"], "String");
        assert!(!map.contains_key("Episode"));
        assert_eq!(map.len(), 1 + 1 + AWS_SCALARS.len());
        assert_eq!(map.keys().next().map(String::as_str), Some("Date"));
    }

    #[test]
    fn test_user_mappings_win() {
        let ir = ir_with_scalar("Date");
        let user: IndexMap<String, String> = [
            ("Date", "java.util.Date"),
            ("ID", "java.util.UUID"),
            ("AWSDateTime", "java.time.OffsetDateTime"),
            ("Undeclared", "com.example.Thing"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let map = supported_type_map(&user, &ir.types_used);
        assert_eq!(map["Date"], "java.util.Date");
        assert_eq!(map["ID"], "java.util.UUID");
        assert_eq!(map["AWSDateTime"], "java.time.OffsetDateTime");
        assert!(!map.contains_key("Undeclared"));
    }

    #[test]
    fn test_packages_from_base() {
        let ir = CodegenIr::default();
        let settings = Settings::new(&Config::default(), &ir, "com.example");
        assert_eq!(settings.types_package, "com.example.type");
        assert_eq!(settings.fragments_package, "com.example.fragment");

        let settings = Settings::new(&Config::default(), &ir, "");
        assert_eq!(settings.types_package, "type");
        assert_eq!(settings.fragments_package, "fragment");
    }

    #[test]
    fn test_output_package_overrides_base() {
        let config: Config = "[codegen]\noutput_package_name = \"com.acme.api\"\n"
            .parse()
            .unwrap();
        let settings = Settings::new(&config, &CodegenIr::default(), "com.example");
        assert_eq!(settings.types_package, "com.acme.api.type");
        assert_eq!(settings.output_package_name.as_deref(), Some("com.acme.api"));
    }

    #[test]
    fn test_fork_does_not_touch_parent() {
        let root = GenerationContext::new(Settings::new(
            &Config::default(),
            &CodegenIr::default(),
            "",
        ));
        let left = root.reserve("Data").push("hero");
        let right = root.reserve("Other");

        assert!(left.is_reserved("Data"));
        assert!(!right.is_reserved("Data"));
        assert!(!root.is_reserved("Data"));
        assert_eq!(left.path_string(), "hero");
        assert_eq!(root.path_string(), "");
        assert_eq!(left.reserved_type_names(), ["Data".to_string()]);
    }
}
