use std::sync::Arc;
use std::thread;

use strata_orm::{ModelDefinition, ModelRegistry};

fn definition(name: &str) -> Arc<ModelDefinition> {
    ModelDefinition::builder(name).table_name("test_table").build_shared()
}

#[test]
fn test_throws_on_duplicate_names() {
    let registry = ModelRegistry::new();
    let model = definition("RegistryTestModel");

    model.register(&registry).unwrap();
    let err = model.register(&registry).unwrap_err();
    assert!(err.is_model_error());
    assert_eq!(err.to_string(), "Model already registered: RegistryTestModel");
}

#[test]
fn test_works_with_custom_registry() {
    let default_registry = ModelRegistry::default();
    let custom = ModelRegistry::new();

    definition("CustomModel").register(&custom).unwrap();
    assert!(custom.contains("CustomModel"));
    assert!(!default_registry.contains("CustomModel"));

    // the same name can live in a different registry
    definition("CustomModel").register(&default_registry).unwrap();
    assert_eq!(default_registry.len(), 1);
}

#[test]
fn test_concurrent_registration_of_one_name() {
    let registry = ModelRegistry::new();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || definition("Raced").register(&registry).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_distinct_names_never_conflict() {
    let registry = ModelRegistry::new();
    for name in ["Alpha", "Beta", "Gamma"] {
        definition(name).register(&registry).unwrap();
    }
    assert_eq!(registry.names(), vec!["Alpha", "Beta", "Gamma"]);
}
