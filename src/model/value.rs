use serde_json::Value;

/// Reads an integer that Conduit may send either as a JSON number or as a
/// decimal string.
pub fn as_i64_lenient(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(string) => string.trim().parse().ok(),
        _ => None,
    }
}

/// Elements of a collection Conduit may send either as an array or as an
/// object keyed by id. PHP encodes an empty map as `[]`, so both shapes appear
/// for the same field.
pub fn values_of(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(array) => array.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => vec![],
    }
}
