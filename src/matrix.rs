//! Matrix Generator
//!
//! Runs two or more nested generators and combines their output, either as a
//! cartesian product of merged elements or packed into a single element.
//! Nested generators run one after another in declaration order: later merges
//! depend on that order, and clients shared by generators are not assumed to
//! be safe for concurrent use.

use crate::declaration::{GeneratorDeclaration, MatrixSpec};
use crate::error::GeneratorError;
use crate::generator::{lowest_interval, require_declaration, Generator};
use crate::registry::{find_relevant_generators, GeneratorRegistry};
use crate::types::{Element, GeneratedSet, OwnerRef};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

pub mod cartesian;
pub mod single_element;

pub use cartesian::cartesian;
pub use single_element::{single_element, UNNAMED_SETS_KEY};

/// Fewest nested generators a matrix accepts
pub const MIN_GENERATORS: usize = 2;

/// Combines the output of nested generators
#[derive(Debug, Clone)]
pub struct MatrixGenerator {
    generators: Arc<GeneratorRegistry>,
}

impl MatrixGenerator {
    /// `generators` holds the kinds a matrix may nest.
    pub fn new(generators: Arc<GeneratorRegistry>) -> Self {
        Self { generators }
    }

    /// Run every nested generator, in order, into its own generated set.
    ///
    /// All nested declarations are resolved before any of them runs, so a
    /// disabled kind fails the matrix without touching external sources.
    async fn generate_sets(
        &self,
        spec: &MatrixSpec,
        owner: &OwnerRef,
    ) -> Result<Vec<GeneratedSet>, GeneratorError> {
        if spec.generators.len() < MIN_GENERATORS {
            return Err(GeneratorError::InsufficientGenerators {
                found: spec.generators.len(),
            });
        }

        let mut resolved = Vec::with_capacity(spec.generators.len());
        for nested in &spec.generators {
            let generators = find_relevant_generators(nested, &self.generators)?;
            if let Some(declaration) = nested.to_declaration() {
                resolved.push((nested.name.clone(), declaration, generators));
            }
        }

        let mut sets = Vec::new();
        for (name, declaration, generators) in resolved {
            for generator in generators {
                let elements = generator
                    .generate(Some(&declaration), owner)
                    .await
                    .map_err(|err| GeneratorError::sub_generator(declaration.kind(), err))?;
                debug!(
                    kind = %declaration.kind(),
                    name = name.as_deref().unwrap_or(""),
                    element_count = elements.len(),
                    "Nested generator finished"
                );
                sets.push(GeneratedSet::new(name.clone(), elements));
            }
        }

        Ok(sets)
    }
}

#[async_trait]
impl Generator for MatrixGenerator {
    #[instrument(skip_all, fields(owner = %owner))]
    async fn generate(
        &self,
        declaration: Option<&GeneratorDeclaration>,
        owner: &OwnerRef,
    ) -> Result<Vec<Element>, GeneratorError> {
        let GeneratorDeclaration::Matrix(spec) = require_declaration(declaration)? else {
            return Ok(Vec::new());
        };

        let sets = self.generate_sets(spec, owner).await?;
        let elements = if spec.single_element {
            single_element(&sets)?
        } else {
            cartesian(&sets)?
        };

        debug!(
            sets = sets.len(),
            single_element = spec.single_element,
            element_count = elements.len(),
            "Matrix combined"
        );
        Ok(elements)
    }

    fn interval(&self, declaration: &GeneratorDeclaration) -> Option<Duration> {
        let GeneratorDeclaration::Matrix(spec) = declaration else {
            return None;
        };

        let mut intervals = Vec::new();
        for nested in &spec.generators {
            let generators = match find_relevant_generators(nested, &self.generators) {
                Ok(generators) => generators,
                Err(err) => {
                    error!(error = %err, "Failed to find relevant generators for matrix interval");
                    return None;
                }
            };
            if let Some(nested_declaration) = nested.to_declaration() {
                intervals.extend(generators.iter().map(|g| g.interval(&nested_declaration)));
            }
        }

        lowest_interval(intervals)
    }
}
