//! Element merge
//!
//! Overlays one element onto another. Later layers win for scalars, arrays and
//! `null`; nested objects merge recursively. An object meeting a non-null,
//! non-object value at the same key is a merge failure rather than a silent
//! replacement.

use crate::error::GeneratorError;
use crate::types::Element;
use serde_json::Value;

/// Overlay `layer` onto `target` in place.
pub fn merge_element(target: &mut Element, layer: &Element) -> Result<(), GeneratorError> {
    merge_at(target, layer, "")
}

/// Merge `layers` left to right into a fresh element.
pub fn merge_all<'a, I>(layers: I) -> Result<Element, GeneratorError>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut merged = Element::new();
    for layer in layers {
        merge_element(&mut merged, layer)?;
    }
    Ok(merged)
}

fn merge_at(target: &mut Element, layer: &Element, prefix: &str) -> Result<(), GeneratorError> {
    for (key, incoming) in layer {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        let Some(existing) = target.get_mut(key) else {
            target.insert(key.clone(), incoming.clone());
            continue;
        };

        match (existing, incoming) {
            (Value::Object(existing), Value::Object(incoming)) => {
                merge_at(existing, incoming, &path)?;
            }
            (existing, Value::Null) => *existing = Value::Null,
            (existing @ Value::Null, incoming) => *existing = incoming.clone(),
            (Value::Object(_), other) => {
                return Err(GeneratorError::Merge {
                    key: path,
                    reason: format!("cannot replace an object with {}", type_name(other)),
                });
            }
            (other, Value::Object(_)) => {
                return Err(GeneratorError::Merge {
                    key: path,
                    reason: format!("cannot merge an object into {}", type_name(other)),
                });
            }
            (existing, incoming) => *existing = incoming.clone(),
        }
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
