//! Schema Generator — derives the JSON-schema document the backend needs to
//! constrain its output from a statically declared result shape.
//!
//! Derivation is pure and deterministic per shape, so callers hold the result
//! in a `once_cell::sync::Lazy` static and derive once per process.

use schemars::generate::SchemaSettings;
use schemars::JsonSchema;
use serde_json::Value;

/// A named, described, fully-inlined JSON-schema document.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: String,
    pub description: String,
    pub schema: Value,
}

impl ResponseSchema {
    /// Derives the schema for `T`.
    ///
    /// Nested definitions are inlined rather than referenced, and every
    /// object node gets `additionalProperties: false`; structured-output
    /// backends reject schemas that allow open-ended objects.
    pub fn of<T: JsonSchema>(name: &str, description: &str) -> Self {
        let mut settings = SchemaSettings::draft07();
        settings.inline_subschemas = true;
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<T>();

        let mut document =
            serde_json::to_value(schema).expect("derived schema serializes to JSON");
        deny_additional_properties(&mut document);

        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema: document,
        }
    }
}

/// Recursively stamps `additionalProperties: false` onto every object schema
/// node in the document.
fn deny_additional_properties(value: &mut Value) {
    match value {
        Value::Object(map) => {
            let is_object_schema = map.get("type").and_then(Value::as_str) == Some("object")
                || map.contains_key("properties");
            if is_object_schema {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            for nested in map.values_mut() {
                deny_additional_properties(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                deny_additional_properties(item);
            }
        }
        _ => {}
    }
}
