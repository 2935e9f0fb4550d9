use serde_json::Value;

use crate::schema::{SchemaIndex, TypeKind};

/// Checks a literal argument against the type it is passed to, returning a description of
/// the offending value when it cannot be coerced. Enum and custom scalar values are not
/// inspected.
pub(crate) fn mismatch(value: &Value, type_ref: &str, type_name: &str, schema: &SchemaIndex<'_>) -> Option<&'static str> {
    let nullable = type_ref.trim_end_matches('!');

    if value.is_null() {
        return (nullable.len() != type_ref.len()).then_some("null");
    }

    if let Some(item_type) = nullable.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        return match value {
            Value::Array(items) => items
                .iter()
                .find_map(|item| mismatch(item, item_type, type_name, schema)),
            // a single value is coerced to a list of one
            _ => mismatch(value, item_type, type_name, schema),
        };
    }

    match (type_name, value) {
        ("Int", Value::Number(number)) if number.as_i64().is_some_and(|n| i32::try_from(n).is_ok()) => None,
        ("Float", Value::Number(_)) | ("String" | "ID", Value::String(_)) | ("Boolean", Value::Bool(_)) => None,
        ("ID", Value::Number(number)) if number.is_i64() => None,
        ("Int" | "Float" | "String" | "ID" | "Boolean", value) => Some(describe(value)),
        (_, Value::Object(_)) => None,
        (_, value) if schema.kind(type_name) == Some(TypeKind::InputObject) => Some(describe(value)),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(value: Value, type_ref: &str) -> Option<&'static str> {
        let schema = newsfeed_introspection::SchemaDocument::from_response_body(include_bytes!(
            "../../../newsfeed-introspection/tests/fixtures/hackernews_introspection.json"
        ))
        .unwrap()
        .to_schema()
        .unwrap();

        let type_name = type_ref.trim_matches(|c| c == '[' || c == ']' || c == '!');

        mismatch(&value, type_ref, type_name, &SchemaIndex::new(&schema))
    }

    #[test]
    fn scalars() {
        assert_eq!(check(json!(10), "Int"), None);
        assert_eq!(check(json!(1.5), "Int"), Some("a number"));
        assert_eq!(check(json!(4_000_000_000_i64), "Int"), Some("a number"));
        assert_eq!(check(json!(1.5), "Float"), None);
        assert_eq!(check(json!("top"), "String"), None);
        assert_eq!(check(json!(10), "String"), Some("a number"));
        assert_eq!(check(json!(10), "ID"), None);
        assert_eq!(check(json!("yes"), "Boolean"), Some("a string"));
    }

    #[test]
    fn nullability() {
        assert_eq!(check(json!(null), "Int"), None);
        assert_eq!(check(json!(null), "Int!"), Some("null"));
        assert_eq!(check(json!([1, null]), "[Int!]"), Some("null"));
        assert_eq!(check(json!([1, null]), "[Int]!"), None);
    }

    #[test]
    fn lists() {
        assert_eq!(check(json!([1, 2]), "[Int]"), None);
        assert_eq!(check(json!(1), "[Int]"), None);
        assert_eq!(check(json!(["a"]), "[Int]"), Some("a string"));
        assert_eq!(check(json!([1]), "Int"), Some("a list"));
    }

    #[test]
    fn custom_types_are_not_inspected() {
        assert_eq!(check(json!("2024-01-01"), "DateTime"), None);
    }
}
