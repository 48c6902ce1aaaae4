//! Input schemas and argument validation.
//!
//! Schemas are generated from each tool's params struct and compiled once when
//! the tool is registered. Incoming arguments are checked against that schema at
//! the registry boundary: missing optional fields get their declared defaults,
//! numeric strings and integral floats are coerced, and every offending field is
//! reported by path.

use jsonschema::{JSONSchema, ValidationError, error::ValidationErrorKind};
use rmcp::model::JsonObject;
use rmcp::schemars::{JsonSchema, generate::SchemaSettings};
use serde_json::{Number, Value};

/// JSON schema for a params type, with subschemas inlined.
pub fn input_schema<P: JsonSchema>() -> JsonObject {
    let generator = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<P>();

    match serde_json::to_value(&schema) {
        Ok(Value::Object(mut object)) => {
            object.remove("$schema");
            object
        }
        _ => JsonObject::new(),
    }
}

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path to the field, e.g. `customField.Metadata.type` or `records[1].Id`.
    pub field: String,
    pub problem: String,
}

/// A tool's input schema, compiled once and reused for every call.
pub struct ArgumentValidator {
    schema: JsonObject,
    compiled: JSONSchema,
}

impl ArgumentValidator {
    /// Compiles `schema`. Fails with the compiler's message if the schema itself is invalid.
    pub fn compile(schema: &JsonObject) -> Result<Self, String> {
        let compiled =
            JSONSchema::compile(&Value::Object(schema.clone())).map_err(|e| e.to_string())?;
        Ok(Self {
            schema: schema.clone(),
            compiled,
        })
    }

    /// Validates `args` in place, filling defaults and coercing numbers first.
    ///
    /// Returns every issue found; an empty list means the arguments are valid.
    pub fn validate(&self, args: &mut JsonObject) -> Vec<FieldIssue> {
        prepare_object(&self.schema, args);

        let instance = Value::Object(args.clone());
        let issues = match self.compiled.validate(&instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.map(|error| field_issue(&error)).collect(),
        };
        issues
    }
}

fn field_issue(error: &ValidationError<'_>) -> FieldIssue {
    let mut field = field_path(&error.instance_path.to_string());
    if let ValidationErrorKind::Required { property } = &error.kind {
        let name = property.as_str().map(str::to_string).unwrap_or_else(|| property.to_string());
        if !field.is_empty() {
            field.push('.');
        }
        field.push_str(&name);
    }
    FieldIssue {
        field,
        problem: error.to_string(),
    }
}

/// Converts a JSON pointer such as `/records/1/Id` into `records[1].Id`.
fn field_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').filter(|segment| !segment.is_empty()) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            path.push_str(&format!("[{}]", segment));
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }
    path
}

/// Fills declared defaults for missing fields and coerces numeric values,
/// recursing into nested objects and array items.
fn prepare_object(schema: &JsonObject, object: &mut JsonObject) {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };

    for (name, property) in properties {
        let Some(property) = property.as_object() else {
            continue;
        };
        match object.get_mut(name.as_str()) {
            Some(value) => prepare_value(property, value),
            None => {
                if let Some(default) = property.get("default") {
                    object.insert(name.clone(), default.clone());
                }
            }
        }
    }
}

fn prepare_value(property: &JsonObject, value: &mut Value) {
    let types = allowed_types(property);
    if !types.is_empty() && !types.iter().any(|t| matches_type(value, t)) {
        coerce(value, &types);
    }

    match value {
        Value::Object(inner) => prepare_object(property, inner),
        Value::Array(items) => {
            if let Some(item_schema) = property.get("items").and_then(Value::as_object) {
                for item in items.iter_mut() {
                    prepare_value(item_schema, item);
                }
            }
        }
        _ => {}
    }
}

fn allowed_types(property: &JsonObject) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        _ => true,
    }
}

/// Converts values agents commonly send for numeric fields: `"5"` and `5.0`.
fn coerce(value: &mut Value, types: &[&str]) {
    let wants_integer = types.contains(&"integer");
    let wants_number = types.contains(&"number");
    if !wants_integer && !wants_number {
        return;
    }

    let coerced = match value {
        Value::String(s) => {
            let s = s.trim();
            if wants_integer {
                s.parse::<i64>().ok().map(Value::from)
            } else {
                s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
            }
        }
        Value::Number(n) if wants_integer => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite() && f.abs() < 9.0e15)
            .map(|f| Value::from(f as i64)),
        _ => None,
    };

    if let Some(coerced) = coerced {
        *value = coerced;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    fn schema() -> JsonObject {
        object(json!({
            "type": "object",
            "properties": {
                "sobject": {"type": "string"},
                "limit": {"type": "integer", "minimum": 0, "maximum": 50000, "default": 10},
                "kind": {"type": "string", "enum": ["Text", "Number"]},
                "note": {"type": ["string", "null"]},
                "records": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {"Id": {"type": "string"}},
                        "required": ["Id"]
                    }
                }
            },
            "required": ["sobject"]
        }))
    }

    fn validate(args: &mut JsonObject) -> Vec<FieldIssue> {
        let validator = ArgumentValidator::compile(&schema()).unwrap();
        validator.validate(args)
    }

    #[test]
    fn test_default_inserted() {
        let mut args = object(json!({"sobject": "Account"}));

        let issues = validate(&mut args);

        assert!(issues.is_empty());
        assert_eq!(args.get("limit"), Some(&json!(10)));
    }

    #[test]
    fn test_missing_required_field() {
        let mut args = JsonObject::new();

        let issues = validate(&mut args);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "sobject");
    }

    #[test]
    fn test_integer_coercion() {
        let mut from_string = object(json!({"sobject": "Account", "limit": "5"}));
        let mut from_float = object(json!({"sobject": "Account", "limit": 5.0}));

        assert!(validate(&mut from_string).is_empty());
        assert!(validate(&mut from_float).is_empty());
        assert_eq!(from_string.get("limit"), Some(&json!(5)));
        assert_eq!(from_float.get("limit"), Some(&json!(5)));
    }

    #[test]
    fn test_fractional_limit_rejected() {
        let mut args = object(json!({"sobject": "Account", "limit": 2.5}));

        let issues = validate(&mut args);

        assert_eq!(issues[0].field, "limit");
    }

    #[test]
    fn test_minimum_enforced() {
        let mut args = object(json!({"sobject": "Account", "limit": -1}));

        let issues = validate(&mut args);

        assert_eq!(issues[0].field, "limit");
        assert!(issues[0].problem.contains("minimum"));
    }

    #[test]
    fn test_maximum_enforced() {
        let mut args = object(json!({"sobject": "Account", "limit": 10_000_000_000u64}));

        let issues = validate(&mut args);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "limit");
        assert!(issues[0].problem.contains("maximum"));
    }

    #[test]
    fn test_nested_required_field_path() {
        let mut args = object(json!({"sobject": "Account", "records": [{"Id": "001"}, {}]}));

        let issues = validate(&mut args);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "records[1].Id");
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let broken = object(json!({"type": "object", "properties": {"limit": {"type": 12}}}));

        assert!(ArgumentValidator::compile(&broken).is_err());
    }

    #[test]
    fn test_field_path_from_pointer() {
        assert_eq!(field_path(""), "");
        assert_eq!(field_path("/customField/Metadata/type"), "customField.Metadata.type");
        assert_eq!(field_path("/records/0/Id"), "records[0].Id");
        assert_eq!(field_path("/a~1b/c~0d"), "a/b.c~d");
    }

    #[test]
    fn test_enum_enforced() {
        let mut args = object(json!({"sobject": "Account", "kind": "Blob"}));

        let issues = validate(&mut args);

        assert_eq!(issues[0].field, "kind");
    }

    #[test]
    fn test_nullable_accepts_null() {
        let mut args = object(json!({"sobject": "Account", "note": null}));

        assert!(validate(&mut args).is_empty());
    }

    #[test]
    fn test_array_items_reported_by_index() {
        let mut args = object(json!({
            "sobject": 7,
            "records": [{"Id": "001"}, {"Name": "no id"}]
        }));

        let issues = validate(&mut args);
        let mut fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        fields.sort();

        assert_eq!(fields, vec!["records[1].Id", "sobject"]);
    }
}
