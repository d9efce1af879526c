use serde_json::{Map, Value};

/// Folds per-chunk responses of one analysis kind into a single object.
///
/// Lists are concatenated in chunk order, objects are updated key by key with
/// later chunks winning, and any other value is appended to the previous text
/// on a new line. When two chunks disagree on a field's type, the later one
/// replaces it.
pub fn merge_responses(responses: Vec<Map<String, Value>>) -> Map<String, Value> {
    let mut merged = Map::new();
    for response in responses {
        for (key, value) in response {
            merge_field(&mut merged, key, value);
        }
    }
    merged
}

fn merge_field(merged: &mut Map<String, Value>, key: String, value: Value) {
    let replacement = match (merged.get_mut(&key), value) {
        (Some(Value::Array(existing)), Value::Array(items)) => {
            existing.extend(items);
            None
        }
        (Some(Value::Object(existing)), Value::Object(fields)) => {
            existing.extend(fields);
            None
        }
        (_, value @ (Value::Array(_) | Value::Object(_))) => Some(value),
        (existing, scalar) => {
            let previous = match existing {
                Some(Value::String(text)) => text.clone(),
                Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
                _ => String::new(),
            };
            let joined = format!("{}\n{}", previous, scalar_text(&scalar));
            Some(Value::String(joined.trim().to_string()))
        }
    };
    if let Some(value) = replacement {
        merged.insert(key, value);
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
