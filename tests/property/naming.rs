//! Property-based tests for naming and grouping determinism

use proptest::prelude::*;
use sdkgen::builder::{pascal_case, ModelBuilder};
use sdkgen::descriptor::RawDescriptor;
use serde_json::{json, Map, Value};

fn build_model(procedures: Map<String, Value>) -> sdkgen::model::DefinitionModel {
    ModelBuilder::new("sdk.client", "Vendor")
        .build(&RawDescriptor::new(json!({ "procedures": procedures })))
        .unwrap()
}

proptest! {
    /// Pascal-casing is deterministic and yields type-name-safe identifiers.
    #[test]
    fn pascal_case_is_deterministic_and_identifier_safe(raw in "[a-z][a-z0-9_.-]{0,20}") {
        let first = pascal_case(&raw);
        let second = pascal_case(&raw);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.chars().all(|c| c.is_alphanumeric()));
        prop_assert!(!first.is_empty());
    }

    /// Procedures sharing a prefix always land in exactly one class, with
    /// one method per procedure.
    #[test]
    fn shared_prefix_procedures_group_into_one_class(
        prefix in "[a-z]{1,8}",
        methods in prop::collection::hash_set("[a-z]{1,8}", 1..5),
    ) {
        let mut procedures = Map::new();
        for method in &methods {
            procedures.insert(
                format!("{}.{}", prefix, method),
                json!({"parameters": []}),
            );
        }

        let model = build_model(procedures);
        prop_assert_eq!(model.class_count(), 1);
        let class = model.class(&pascal_case(&prefix)).unwrap();
        prop_assert_eq!(class.method_count(), methods.len());
    }

    /// Dotless procedure names always map to the `Main` class, keeping the
    /// full name as the procedure name.
    #[test]
    fn dotless_names_always_map_to_main(name in "[a-z]{1,10}") {
        let mut procedures = Map::new();
        procedures.insert(name.clone(), json!({"parameters": []}));

        let model = build_model(procedures);
        let class = model.class("Main").unwrap();
        let method = class.method(&name).unwrap();
        prop_assert_eq!(&method.procedure_name, &name);
    }

    /// Argument order always mirrors descriptor parameter order.
    #[test]
    fn argument_order_mirrors_descriptor_order(
        names in prop::collection::vec("[a-z]{1,6}", 0..6),
    ) {
        let parameters: Vec<Value> = names
            .iter()
            .map(|n| json!({"name": n, "type": "string", "optional": false}))
            .collect();
        let mut procedures = Map::new();
        procedures.insert(
            "svc.call".to_string(),
            json!({"parameters": parameters}),
        );

        let model = build_model(procedures);
        let method = model.class("Svc").unwrap().method("call").unwrap();
        let built: Vec<&str> = method.arguments().iter().map(|a| a.name.as_str()).collect();
        prop_assert_eq!(built, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
