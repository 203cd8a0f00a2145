//! Loading configuration and IR documents from disk.

use std::fs;

use miette::Diagnostic;
use shapegen_manifest::{Config, Error, NullableValueType, load_ir};
use tempfile::TempDir;

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shapegen.toml");
    fs::write(
        &path,
        r#"
[codegen]
nullable_value_type = "guavaOptional"
generate_model_builder = true
output_package_name = "com.example.api"

[custom_types]
Date = "java.util.Date"
AWSJSON = "com.google.gson.JsonElement"
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.codegen.nullable_value_type, NullableValueType::GuavaOptional);
    assert!(config.codegen.generate_model_builder);
    assert!(config.codegen.generate_accessors);
    assert_eq!(config.codegen.output_package_name.as_deref(), Some("com.example.api"));
    let keys: Vec<_> = config.custom_types.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Date", "AWSJSON"]);
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::from_file(dir.path().join("shapegen.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
    assert_eq!(
        err.code().map(|code| code.to_string()).as_deref(),
        Some("shapegen::io")
    );
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shapegen.toml");
    fs::write(&path, "[custom_types]\nDate = \"java..Date\"\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(*err, Error::Validation { .. }));
    assert_eq!(
        err.code().map(|code| code.to_string()).as_deref(),
        Some("shapegen::validation_error")
    );
}

#[test]
fn test_load_ir_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ir.json");
    fs::write(
        &path,
        r#"{
  "operations": [],
  "fragments": [],
  "typesUsed": [{ "kind": "ScalarType", "name": "Date" }]
}"#,
    )
    .unwrap();

    let ir = load_ir(&path).unwrap();
    assert!(ir.operations.is_empty());
    assert_eq!(ir.types_used.len(), 1);
}

#[test]
fn test_malformed_ir_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ir.json");
    fs::write(&path, "{\n  \"operations\": [\n    { \"operationName\": \"X\" }\n  ]\n}").unwrap();

    let err = load_ir(&path).unwrap_err();
    assert!(matches!(*err, Error::MalformedIr { span: Some(_), .. }));
    assert!(err.help().is_some());
}
