//! Single-element packing of generated sets.

use crate::error::GeneratorError;
use crate::types::{Element, GeneratedSet};
use serde_json::Value;

/// Key holding the concatenated elements of every unnamed set.
pub const UNNAMED_SETS_KEY: &str = "Matrix";

/// Pack every set into one element.
///
/// A named set becomes `name: [elements...]`. Unnamed sets are concatenated in
/// order under [`UNNAMED_SETS_KEY`]. No sets yields no elements.
pub fn single_element(sets: &[GeneratedSet]) -> Result<Vec<Element>, GeneratorError> {
    if sets.is_empty() {
        return Ok(Vec::new());
    }

    let mut packed = Element::new();
    let mut unnamed: Option<Vec<Value>> = None;

    for set in sets {
        let values = set.elements.iter().cloned().map(Value::Object);
        match &set.name {
            Some(name) if name == UNNAMED_SETS_KEY => {
                return Err(GeneratorError::InvalidDeclaration(format!(
                    "generator name {:?} is reserved in single element mode",
                    UNNAMED_SETS_KEY
                )));
            }
            Some(name) => {
                packed.insert(name.clone(), Value::Array(values.collect()));
            }
            None => unnamed.get_or_insert_with(Vec::new).extend(values),
        }
    }

    if let Some(unnamed) = unnamed {
        packed.insert(UNNAMED_SETS_KEY.to_string(), Value::Array(unnamed));
    }

    Ok(vec![packed])
}
