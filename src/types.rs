//! Core data types shared by every generator.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// One generated parameter map.
pub type Element = Map<String, Value>;

/// The (optionally named) output of one sub-generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSet {
    /// When set, each element is nested under this key before combination
    pub name: Option<String>,
    pub elements: Vec<Element>,
}

impl GeneratedSet {
    pub fn new(name: Option<String>, elements: Vec<Element>) -> Self {
        Self { name, elements }
    }

    pub fn unnamed(elements: Vec<Element>) -> Self {
        Self::new(None, elements)
    }

    pub fn named(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self::new(Some(name.into()), elements)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Elements as they enter a cartesian combination.
    ///
    /// Named sets contribute `{name: element}`; unnamed sets contribute the
    /// element itself.
    pub fn combinable(&self) -> Vec<Element> {
        match &self.name {
            Some(name) => self
                .elements
                .iter()
                .map(|element| {
                    let mut wrapped = Element::new();
                    wrapped.insert(name.clone(), Value::Object(element.clone()));
                    wrapped
                })
                .collect(),
            None => self.elements.clone(),
        }
    }
}

/// Identity of the resource that owns a generation run.
///
/// Passed through to generators that need to look up namespaced objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub name: String,
    pub namespace: String,
}

impl OwnerRef {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Parse a duration string such as `30s`, `5m` or `1h30m`.
pub fn parse_interval(value: &str) -> Result<Duration, GeneratorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GeneratorError::InvalidDeclaration(
            "interval cannot be empty".to_string(),
        ));
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let amount: u64 = digits.parse().map_err(|_| {
            GeneratorError::InvalidDeclaration(format!("invalid interval {:?}", value))
        })?;
        digits.clear();

        let unit_secs = match ch {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            _ => {
                return Err(GeneratorError::InvalidDeclaration(format!(
                    "invalid interval unit {:?} in {:?}",
                    ch, value
                )))
            }
        };
        total = amount
            .checked_mul(unit_secs)
            .and_then(|secs| total.checked_add(Duration::from_secs(secs)))
            .ok_or_else(|| {
                GeneratorError::InvalidDeclaration(format!("interval {:?} is too large", value))
            })?;
    }

    if !digits.is_empty() {
        return Err(GeneratorError::InvalidDeclaration(format!(
            "interval {:?} is missing a unit",
            value
        )));
    }

    Ok(total)
}
