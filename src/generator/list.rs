//! List generator: elements written inline in the declaration.

use crate::declaration::GeneratorDeclaration;
use crate::error::GeneratorError;
use crate::generator::{require_declaration, Generator};
use crate::types::{Element, OwnerRef};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Emits the declared elements unchanged, in order
#[derive(Debug, Clone, Default)]
pub struct ListGenerator;

impl ListGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for ListGenerator {
    async fn generate(
        &self,
        declaration: Option<&GeneratorDeclaration>,
        owner: &OwnerRef,
    ) -> Result<Vec<Element>, GeneratorError> {
        let GeneratorDeclaration::List(spec) = require_declaration(declaration)? else {
            return Ok(Vec::new());
        };

        let elements = spec
            .elements
            .iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(map) => Ok(map.clone()),
                other => Err(GeneratorError::InvalidDeclaration(format!(
                    "list element {} must be an object, got {}",
                    index, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(owner = %owner, element_count = elements.len(), "Generated list elements");
        Ok(elements)
    }

    fn interval(&self, _declaration: &GeneratorDeclaration) -> Option<Duration> {
        None
    }
}
