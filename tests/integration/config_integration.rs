//! Integration tests for configuration-driven registry setup

use super::test_utils::{list, owner};
use genset::config::ConfigLoader;
use genset::declaration::MatrixSpec;
use genset::{
    Generator, GeneratorDeclaration, GeneratorKind, GeneratorRegistry, ListGenerator,
    NestedGeneratorDeclaration,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_config_file_drives_registry() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("genset.toml");

    std::fs::write(
        &config_file,
        r#"
[generators]
enabled = ["List", "Matrix"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());

    let registry = GeneratorRegistry::from_config(
        &config.generators,
        [(
            GeneratorKind::List,
            Arc::new(ListGenerator::new()) as Arc<dyn Generator>,
        )],
    )
    .unwrap();
    assert_eq!(
        registry.kinds(),
        vec![GeneratorKind::List, GeneratorKind::Matrix]
    );

    let declaration = GeneratorDeclaration::Matrix(MatrixSpec {
        generators: vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"a": 1})])),
            NestedGeneratorDeclaration::new(list(vec![json!({"b": 2})])),
        ],
        single_element: false,
    });
    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(results[0].len(), 1);
    assert_eq!(results[0][0]["a"], json!(1));
    assert_eq!(results[0][0]["b"], json!(2));
}

#[test]
fn test_invalid_config_reports_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("genset.json");

    std::fs::write(
        &config_file,
        r#"{"generators": {"enabled": ["List", "Helm"]}, "logging": {"format": "yaml"}}"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.to_string().contains("Helm")));
    assert!(errors.iter().any(|e| e.to_string().contains("yaml")));
}
