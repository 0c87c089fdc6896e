//! Integration tests for matrix generation through the registry

use super::test_utils::{cluster, element, elements, list, owner, registry_with, StubGenerator};
use genset::declaration::MatrixSpec;
use genset::matrix::UNNAMED_SETS_KEY;
use genset::{GeneratorDeclaration, GeneratorError, GeneratorKind, NestedGeneratorDeclaration};
use serde_json::json;
use std::sync::Arc;

fn matrix(generators: Vec<NestedGeneratorDeclaration>, single_element: bool) -> GeneratorDeclaration {
    GeneratorDeclaration::Matrix(MatrixSpec {
        generators,
        single_element,
    })
}

fn clusters() -> Arc<StubGenerator> {
    Arc::new(StubGenerator::new(
        GeneratorKind::Cluster,
        elements(vec![
            json!({"cluster": "eu-1", "region": "eu"}),
            json!({"cluster": "us-1", "region": "us"}),
        ]),
    ))
}

#[tokio::test]
async fn test_matrix_of_list_and_clusters() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"app": "web"}), json!({"app": "api"})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        false,
    );

    let results = registry
        .generate_all(&[declaration], &owner())
        .await
        .unwrap();

    assert_eq!(
        results,
        vec![elements(vec![
            json!({"app": "web", "cluster": "eu-1", "region": "eu"}),
            json!({"app": "web", "cluster": "us-1", "region": "us"}),
            json!({"app": "api", "cluster": "eu-1", "region": "eu"}),
            json!({"app": "api", "cluster": "us-1", "region": "us"}),
        ])]
    );
}

#[tokio::test]
async fn test_named_lists_nest_each_element() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::named("list1", list(vec![json!({"k": 1}), json!({"k": 2})])),
            NestedGeneratorDeclaration::named("list2", list(vec![json!({"k": 3}), json!({"k": 4})])),
        ],
        false,
    );

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(results[0].len(), 4);
    for combined in &results[0] {
        assert_eq!(combined.len(), 2);
        assert!(combined["list1"]["k"].is_number());
        assert!(combined["list2"]["k"].is_number());
    }
    assert_eq!(
        results[0][1],
        element(json!({"list1": {"k": 1}, "list2": {"k": 4}}))
    );
}

#[tokio::test]
async fn test_single_element_mode() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::named("list1", list(vec![json!({"k": 1}), json!({"k": 2})])),
            NestedGeneratorDeclaration::named("list2", list(vec![json!({"k": 3}), json!({"k": 4})])),
        ],
        true,
    );

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(
        results[0],
        elements(vec![json!({
            "list1": [{"k": 1}, {"k": 2}],
            "list2": [{"k": 3}, {"k": 4}]
        })])
    );
}

#[tokio::test]
async fn test_single_element_mode_flattens_unnamed_sets() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"app": "web"})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        true,
    );

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(results[0].len(), 1);
    assert_eq!(
        results[0][0][UNNAMED_SETS_KEY],
        json!([
            {"app": "web"},
            {"cluster": "eu-1", "region": "eu"},
            {"cluster": "us-1", "region": "us"}
        ])
    );
}

#[tokio::test]
async fn test_later_generator_overrides_shared_key() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"region": "default", "app": "web"})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        false,
    );

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(results[0][0]["region"], json!("eu"));
    assert_eq!(results[0][1]["region"], json!("us"));
    assert_eq!(results[0][0]["app"], json!("web"));
}

#[tokio::test]
async fn test_disabled_kind_fails_before_generation() {
    let stub = clusters();
    let registry = registry_with(Arc::clone(&stub));
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(cluster("prod")),
            NestedGeneratorDeclaration::new(genset::NestedGenerator::ImagePolicy(
                genset::declaration::ImagePolicySpec {
                    policy_ref: "podinfo".to_string(),
                },
            )),
        ],
        false,
    );

    let err = registry
        .generate_all(&[declaration], &owner())
        .await
        .unwrap_err();

    match err {
        GeneratorError::SubGenerator { kind, source } => {
            assert_eq!(kind, GeneratorKind::Matrix);
            assert!(matches!(
                *source,
                GeneratorError::NotEnabled(GeneratorKind::ImagePolicy)
            ));
        }
        other => panic!("expected wrapped not-enabled error, got {:?}", other),
    }
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_sub_generator_failure_aborts_composition() {
    let registry = registry_with(Arc::new(StubGenerator::failing(
        GeneratorKind::Cluster,
        "cluster inventory unavailable",
    )));
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"app": "web"})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        false,
    );

    let err = registry
        .generate_all(&[declaration], &owner())
        .await
        .unwrap_err();

    let GeneratorError::SubGenerator { source, .. } = err else {
        panic!("expected sub generator error");
    };
    match *source {
        GeneratorError::SubGenerator { kind, source } => {
            assert_eq!(kind, GeneratorKind::Cluster);
            assert!(source.to_string().contains("cluster inventory unavailable"));
        }
        other => panic!("expected cluster failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_sub_generator_empties_product() {
    let registry = registry_with(Arc::new(StubGenerator::new(GeneratorKind::Cluster, Vec::new())));
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"app": "web"})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        false,
    );

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert!(results[0].is_empty());
}

#[tokio::test]
async fn test_matrix_declared_as_json() {
    let registry = registry_with(clusters());
    let declaration: GeneratorDeclaration = serde_json::from_value(json!({
        "matrix": {
            "generators": [
                {"name": "env", "list": {"elements": [{"stage": "dev"}, {"stage": "prod"}]}},
                {"name": "target", "cluster": {"selector": {"matchLabels": {"tier": "prod"}}}}
            ]
        }
    }))
    .unwrap();

    let results = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(results[0].len(), 4);
    assert_eq!(
        results[0][3],
        element(json!({
            "env": {"stage": "prod"},
            "target": {"cluster": "us-1", "region": "us"}
        }))
    );
}

#[test]
fn test_malformed_nested_entries_are_rejected() {
    let malformed = [
        json!({"name": "a", "list": {"elements": 5}}),
        json!({"name": "b", "lsit": {"elements": [{"a": 1}]}}),
        json!({"list": {"elements": [{"a": 1}]}, "cluster": {}}),
    ];

    for entry in malformed {
        let result = serde_json::from_value::<GeneratorDeclaration>(json!({
            "matrix": {
                "generators": [entry.clone(), {"list": {"elements": [{"b": 2}]}}]
            }
        }));
        assert!(result.is_err(), "accepted malformed entry {}", entry);
    }
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let registry = registry_with(clusters());
    let declaration = matrix(
        vec![
            NestedGeneratorDeclaration::new(list(vec![json!({"a": 1}), json!({"a": 2}), json!({"a": 1})])),
            NestedGeneratorDeclaration::new(cluster("prod")),
        ],
        false,
    );

    let first = registry.generate_all(&[declaration.clone()], &owner()).await.unwrap();
    let second = registry.generate_all(&[declaration], &owner()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].len(), 4);
}
