mod helpers;

use std::sync::Arc;

use helpers::{Call, FakeSession, done, object};
use serde_json::json;
use sforce_mcp::registry::typed_handler;
use sforce_mcp::tools::count::CountParams;
use sforce_mcp::{
    RegistryError, ToolFailure, ToolRegistry, ToolSelection, build_registry, catalog, definitions,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(session: &Arc<FakeSession>) -> ToolRegistry {
        build_registry(session.clone(), &ToolSelection::all()).unwrap()
    }

    #[test]
    fn test_catalog_order_and_unique_names() {
        let names: Vec<&str> = catalog().iter().map(|entry| entry.name).collect();

        assert_eq!(
            names,
            vec![
                "update-records",
                "retrieve",
                "anonymous-apex",
                "triggers-by-sobject",
                "create-custom-field",
                "count",
                "query-records",
                "soql-query",
            ]
        );
    }

    #[test]
    fn test_query_records_schema_declares_defaults() {
        let definitions = definitions(&ToolSelection::only(["query-records"])).unwrap();
        let schema = &definitions[0].input_schema;

        assert_eq!(schema["properties"]["list_of_fields"]["default"], json!("Id, Name"));
        assert_eq!(schema["properties"]["limit"]["default"], json!(10));
        assert_eq!(schema["required"], json!(["sobject"]));
    }

    #[test]
    fn test_custom_field_schema_enumerates_types() {
        let definitions = definitions(&ToolSelection::only(["create-custom-field"])).unwrap();
        let field_type =
            &definitions[0].input_schema["properties"]["customField"]["properties"]["Metadata"]["properties"]["type"];

        let options = field_type["enum"].as_array().unwrap();
        assert_eq!(options.len(), 29);
        assert!(options.contains(&json!("Number")));
        assert!(options.contains(&json!("LongTextArea")));
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_remote_call() {
        let session = Arc::new(FakeSession::new());
        let registry = registry_with(&session);

        let result = registry.dispatch("delete-records", None).await;

        assert_eq!(
            result,
            Err(RegistryError::UnknownTool("delete-records".to_string()))
        );
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_arguments_name_fields() {
        let session = Arc::new(FakeSession::new());
        let registry = registry_with(&session);

        let result = registry
            .dispatch("retrieve", Some(object(json!({"id": 7}))))
            .await;

        match result {
            Err(RegistryError::InvalidArguments { tool, mut fields, .. }) => {
                fields.sort();
                assert_eq!(tool, "retrieve");
                assert_eq!(fields, vec!["id", "sobject"]);
            }
            other => panic!("Expected invalid arguments, got {:?}", other),
        }
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_records_requires_id_per_record() {
        let session = Arc::new(FakeSession::new());
        let registry = registry_with(&session);

        let result = registry
            .dispatch(
                "update-records",
                Some(object(json!({
                    "sobject": "Account",
                    "records": [{"Id": "001A", "Name": "Acme"}, {"Name": "No Id"}]
                }))),
            )
            .await;

        match result {
            Err(RegistryError::InvalidArguments { fields, .. }) => {
                assert_eq!(fields, vec!["records[1].Id"]);
            }
            other => panic!("Expected invalid arguments, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_defaults_applied_before_handler() {
        let session = Arc::new(FakeSession::new().with_query_result(done(Vec::new())));
        let registry = registry_with(&session);

        registry
            .dispatch("query-records", Some(object(json!({"sobject": "Contact"}))))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            session.calls(),
            vec![Call::Query("select Id, Name from Contact limit 10".to_string())]
        );
    }

    #[tokio::test]
    async fn test_numeric_limit_coerced() {
        let session = Arc::new(FakeSession::new().with_query_result(done(Vec::new())));
        let registry = registry_with(&session);

        registry
            .dispatch(
                "query-records",
                Some(object(json!({"sobject": "Contact", "limit": "5"}))),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            session.calls(),
            vec![Call::Query("select Id, Name from Contact limit 5".to_string())]
        );
    }

    #[tokio::test]
    async fn test_oversized_limit_names_the_field() {
        let session = Arc::new(FakeSession::new().with_query_result(done(Vec::new())));
        let registry = registry_with(&session);

        let result = registry
            .dispatch(
                "query-records",
                Some(object(json!({"sobject": "Contact", "limit": 10_000_000_000u64}))),
            )
            .await;

        match result {
            Err(RegistryError::InvalidArguments { fields, .. }) => {
                assert_eq!(fields, vec!["limit"]);
            }
            other => panic!("Expected invalid arguments, got {:?}", other),
        }
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_field_length_names_the_field() {
        let session = Arc::new(FakeSession::new());
        let registry = registry_with(&session);

        let result = registry
            .dispatch(
                "create-custom-field",
                Some(object(json!({
                    "customField": {
                        "FullName": "Account.Tier__c",
                        "Metadata": {
                            "type": "Text",
                            "description": "Customer tier",
                            "label": "Tier",
                            "length": 5_000_000_000u64,
                            "required": false
                        }
                    }
                }))),
            )
            .await;

        match result {
            Err(RegistryError::InvalidArguments { fields, .. }) => {
                assert_eq!(fields, vec!["customField.Metadata.length"]);
            }
            other => panic!("Expected invalid arguments, got {:?}", other),
        }
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_numeric_bounds_published_in_schemas() {
        let definitions = definitions(&ToolSelection::only(["create-custom-field", "query-records"])).unwrap();
        let length = &definitions[0].input_schema["properties"]["customField"]["properties"]["Metadata"]["properties"]["length"];
        let limit = &definitions[1].input_schema["properties"]["limit"];

        assert_eq!(length["maximum"].as_f64(), Some(131072.0));
        assert_eq!(limit["maximum"].as_f64(), Some(50000.0));
    }

    #[test]
    fn test_uncompilable_schema_rejected_at_registration() {
        let mut registry = ToolRegistry::new();
        let schema = object(json!({"type": "object", "properties": {"sobject": {"type": 12}}}));
        let handler = typed_handler(|params: CountParams| async move { Ok::<_, ToolFailure>(params.sobject) });

        let result = registry.register("count", "Count", schema, handler);

        assert!(matches!(result, Err(RegistryError::InvalidSchema { tool, .. }) if tool == "count"));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_update_records_passes_extra_fields_through() {
        let session = Arc::new(FakeSession::new());
        let registry = registry_with(&session);

        registry
            .dispatch(
                "update-records",
                Some(object(json!({
                    "sobject": "Account",
                    "records": [{"Id": "001A", "Rating": "Hot", "NumberOfEmployees": 12}]
                }))),
            )
            .await
            .unwrap()
            .unwrap();

        match &session.calls()[0] {
            Call::Update { records, .. } => {
                assert_eq!(records[0].id, "001A");
                assert_eq!(records[0].fields.get("Rating"), Some(&json!("Hot")));
                assert_eq!(records[0].fields.get("NumberOfEmployees"), Some(&json!(12)));
            }
            other => panic!("Expected an update, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        let handler = || typed_handler(|params: CountParams| async move { Ok::<_, ToolFailure>(params.sobject) });

        registry
            .register("count", "Count", serde_json::Map::new(), handler())
            .unwrap();
        let result = registry.register("count", "Count again", serde_json::Map::new(), handler());

        assert_eq!(result, Err(RegistryError::DuplicateTool("count".to_string())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_selection_without_apex() {
        let session = Arc::new(FakeSession::new());

        let registry =
            build_registry(session, &ToolSelection::all().without(["anonymous-apex"])).unwrap();

        assert_eq!(registry.len(), 7);
        assert!(!registry.contains("anonymous-apex"));
        assert!(registry.contains("create-custom-field"));
    }

    #[test]
    fn test_record_only_selection() {
        let session = Arc::new(FakeSession::new());
        let selection = ToolSelection::only([
            "update-records",
            "retrieve",
            "count",
            "query-records",
            "soql-query",
        ]);

        let registry = build_registry(session, &selection).unwrap();
        let names: Vec<&str> = registry.definitions().map(|d| d.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["update-records", "retrieve", "count", "query-records", "soql-query"]
        );
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let session = Arc::new(FakeSession::new());

        let result = build_registry(session, &ToolSelection::only(["retreive"]));

        assert!(matches!(result, Err(RegistryError::UnknownSelection(name)) if name == "retreive"));
    }
}
