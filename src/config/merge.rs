//! Layering of YAML configuration documents.
//!
//! Mappings merge key by key; sequences and scalars from the upper layer
//! replace the lower one. A null upper value leaves the lower one alone.

use serde_yaml::Value;

/// Lay `upper` over `lower`.
pub fn layer(lower: Value, upper: Value) -> Value {
    match (lower, upper) {
        (Value::Mapping(mut merged), Value::Mapping(upper)) => {
            for (key, upper_value) in upper {
                let value = match merged.remove(&key) {
                    Some(lower_value) => layer(lower_value, upper_value),
                    None => upper_value,
                };
                merged.insert(key, value);
            }
            Value::Mapping(merged)
        }
        (lower, Value::Null) => lower,
        (_, upper) => upper,
    }
}
