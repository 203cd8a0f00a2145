//! Compile operation - load inputs and run the compiler.

use std::path::{Path, PathBuf};

use shapegen_codegen::{CompilationOutput, Compiler, Settings};
use shapegen_core::format_package_name;
use shapegen_ir::CodegenIr;
use shapegen_manifest::{Config, load_ir};

use crate::commands::InputArgs;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "shapegen.toml";

/// Everything one compilation run consumes.
#[derive(Debug)]
pub struct Inputs {
    pub ir: CodegenIr,
    pub config: Config,
    /// Base package for fragments and types when none is configured.
    pub base_package: String,
}

/// Load the IR document and configuration named by `args`.
pub fn load(args: &InputArgs) -> shapegen_manifest::Result<Inputs> {
    let config = match config_path(args.config.as_deref(), Path::new(".")) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let ir = load_ir(&args.ir)?;
    let base_package = base_package(&config, args.package.as_deref(), &args.ir);
    tracing::debug!(
        ir = %args.ir.display(),
        operations = ir.operations.len(),
        fragments = ir.fragments.len(),
        %base_package,
        "loaded inputs"
    );

    Ok(Inputs {
        ir,
        config,
        base_package,
    })
}

/// Compile loaded inputs.
pub fn compile(inputs: &Inputs, serial: bool) -> CompilationOutput {
    let settings = Settings::new(&inputs.config, &inputs.ir, &inputs.base_package);
    Compiler::new(settings).serial(serial).compile(&inputs.ir)
}

/// The explicit config path, else `shapegen.toml` in `dir` when it exists.
fn config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = dir.join(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}

/// Resolve the base package for fragments and types.
///
/// A configured output package wins, then `--package`, then the package
/// derived from the IR file location. Without any of them the bare
/// `fragment`/`type` packages are used.
fn base_package(config: &Config, flag: Option<&str>, ir_path: &Path) -> String {
    if let Some(package) = &config.codegen.output_package_name {
        return package.clone();
    }
    if let Some(package) = flag {
        return package.to_string();
    }
    match format_package_name(&ir_path.to_string_lossy()) {
        Ok(package) => package,
        Err(err) => {
            tracing::debug!("{}; using the root package", err);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_base_package_precedence() {
        let ir_path = Path::new("/app/src/main/graphql/com/example/ir.json");
        let config: Config = "[codegen]\noutput_package_name = \"com.acme\"\n"
            .parse()
            .unwrap();
        assert_eq!(base_package(&config, Some("org.flag"), ir_path), "com.acme");

        let config = Config::default();
        assert_eq!(base_package(&config, Some("org.flag"), ir_path), "org.flag");
        assert_eq!(base_package(&config, None, ir_path), "com.example");
        assert_eq!(base_package(&config, None, Path::new("build/ir.json")), "");
    }

    #[test]
    fn test_config_path() {
        let dir = TempDir::new().unwrap();
        assert_eq!(config_path(None, dir.path()), None);

        let explicit = Path::new("custom.toml");
        assert_eq!(
            config_path(Some(explicit), dir.path()),
            Some(PathBuf::from("custom.toml"))
        );

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "").unwrap();
        assert_eq!(
            config_path(None, dir.path()),
            Some(dir.path().join(DEFAULT_CONFIG_FILE))
        );
    }

    #[test]
    fn test_load_and_compile() {
        let dir = TempDir::new().unwrap();
        let ir_path = dir.path().join("ir.json");
        let config_file = dir.path().join("shapegen.toml");
        fs::write(
            &ir_path,
            r#"{
                "operations": [{
                    "operationName": "Viewer",
                    "operationType": "query",
                    "source": "query Viewer { me: viewer { login } }",
                    "fields": [{
                        "responseName": "me", "fieldName": "viewer", "type": "User!",
                        "fields": [{ "responseName": "login", "fieldName": "login", "type": "String!" }]
                    }],
                    "filePath": "src/main/graphql/com/github/Viewer.graphql"
                }]
            }"#,
        )
        .unwrap();
        fs::write(&config_file, "[codegen]\nuse_semantic_naming = false\n").unwrap();

        let args = InputArgs {
            ir: ir_path,
            config: Some(config_file),
            package: Some("com.github".into()),
            serial: true,
        };
        let inputs = load(&args).unwrap();
        assert_eq!(inputs.base_package, "com.github");

        let output = compile(&inputs, args.serial);
        assert!(!output.has_errors());
        let names: Vec<String> = output
            .generated()
            .map(|ty| ty.class_name().to_string())
            .collect();
        assert_eq!(names, ["com.github.type.CustomType", "com.github.Viewer"]);
    }

    #[test]
    fn test_load_reports_malformed_ir() {
        let dir = TempDir::new().unwrap();
        let ir_path = dir.path().join("ir.json");
        fs::write(&ir_path, r#"{ "operations": [{ "operationName": 1 }] }"#).unwrap();

        let config_file = dir.path().join("shapegen.toml");
        fs::write(&config_file, "").unwrap();

        let args = InputArgs {
            ir: ir_path,
            config: Some(config_file),
            package: None,
            serial: false,
        };
        let err = load(&args).unwrap_err();
        assert!(matches!(*err, shapegen_manifest::Error::MalformedIr { .. }));
    }
}
