//! Generator Registry
//!
//! Maps each enabled generator kind to its implementation and resolves which
//! implementation a declaration selects. The registry is built once at process
//! start and only read afterwards, so it is shared behind an `Arc`.

use crate::config::GeneratorsConfig;
use crate::declaration::{GeneratorDeclaration, GeneratorKind, NestedGeneratorDeclaration};
use crate::error::{GeneratorError, SetupError};
use crate::generator::{lowest_interval, Generator};
use crate::matrix::MatrixGenerator;
use crate::types::{Element, OwnerRef};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Enabled generators keyed by kind
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<GeneratorKind, Arc<dyn Generator>>,
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl GeneratorRegistry {
    /// Create an empty registry (every kind disabled)
    pub fn new() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    /// Enable `kind`, replacing any previous implementation
    pub fn register(&mut self, kind: GeneratorKind, generator: Arc<dyn Generator>) {
        self.generators.insert(kind, generator);
    }

    /// Builder-style variant of [`register`](Self::register)
    pub fn with_generator(mut self, kind: GeneratorKind, generator: Arc<dyn Generator>) -> Self {
        self.register(kind, generator);
        self
    }

    pub fn get(&self, kind: GeneratorKind) -> Option<&Arc<dyn Generator>> {
        self.generators.get(&kind)
    }

    pub fn contains(&self, kind: GeneratorKind) -> bool {
        self.generators.contains_key(&kind)
    }

    /// Enabled kinds, sorted
    pub fn kinds(&self) -> Vec<GeneratorKind> {
        let mut kinds: Vec<GeneratorKind> = self.generators.keys().copied().collect();
        kinds.sort();
        kinds
    }

    /// Build the registry for the kinds enabled in configuration.
    ///
    /// `available` supplies the data-source implementations. The matrix
    /// generator is always built here, over the enabled non-matrix kinds, so
    /// any `Matrix` entry in `available` is ignored.
    pub fn from_config<I>(config: &GeneratorsConfig, available: I) -> Result<Self, SetupError>
    where
        I: IntoIterator<Item = (GeneratorKind, Arc<dyn Generator>)>,
    {
        let enabled = config.enabled_kinds()?;
        let mut available: HashMap<GeneratorKind, Arc<dyn Generator>> =
            available.into_iter().collect();

        let mut leaves = GeneratorRegistry::new();
        for kind in enabled.iter().copied().filter(|k| *k != GeneratorKind::Matrix) {
            let generator = available
                .remove(&kind)
                .ok_or(SetupError::MissingImplementation(kind))?;
            leaves.register(kind, generator);
        }

        let mut registry = leaves.clone();
        if enabled.contains(&GeneratorKind::Matrix) {
            registry.register(
                GeneratorKind::Matrix,
                Arc::new(MatrixGenerator::new(Arc::new(leaves))),
            );
        }

        debug!(kinds = ?registry.kinds(), "Generator registry built");
        Ok(registry)
    }

    /// Requeue interval for an owner declaring `declarations`.
    ///
    /// Resolution failures are logged and yield `None` so a misconfigured
    /// owner is never requeued in a tight loop.
    pub fn requeue_interval(&self, declarations: &[GeneratorDeclaration]) -> Option<Duration> {
        let mut intervals = Vec::new();
        for declaration in declarations {
            let generators = match find_generators_for(declaration, self) {
                Ok(generators) => generators,
                Err(err) => {
                    error!(error = %err, "Failed to find relevant generators for interval");
                    return None;
                }
            };
            intervals.extend(generators.iter().map(|g| g.interval(declaration)));
        }
        lowest_interval(intervals)
    }

    /// Generate every top-level declaration in order.
    ///
    /// Returns one element list per declaration; the first failure aborts.
    #[instrument(skip(self, declarations, owner), fields(owner = %owner, declarations = declarations.len()))]
    pub async fn generate_all(
        &self,
        declarations: &[GeneratorDeclaration],
        owner: &OwnerRef,
    ) -> Result<Vec<Vec<Element>>, GeneratorError> {
        let mut results = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let kind = declaration.kind();
            let mut elements = Vec::new();
            for generator in find_generators_for(declaration, self)? {
                let generated = generator
                    .generate(Some(declaration), owner)
                    .await
                    .map_err(|err| GeneratorError::sub_generator(kind, err))?;
                elements.extend(generated);
            }
            debug!(kind = %kind, element_count = elements.len(), "Generated declaration");
            results.push(elements);
        }
        Ok(results)
    }
}

/// Generators selected by a nested declaration.
///
/// A declaration with no variant selects nothing; a variant whose kind is not
/// registered is an error.
pub fn find_relevant_generators(
    declaration: &NestedGeneratorDeclaration,
    registry: &GeneratorRegistry,
) -> Result<Vec<Arc<dyn Generator>>, GeneratorError> {
    match declaration.kind() {
        Some(kind) => resolve_kind(kind, registry),
        None => Ok(Vec::new()),
    }
}

/// Generators selected by a top-level declaration
pub fn find_generators_for(
    declaration: &GeneratorDeclaration,
    registry: &GeneratorRegistry,
) -> Result<Vec<Arc<dyn Generator>>, GeneratorError> {
    resolve_kind(declaration.kind(), registry)
}

fn resolve_kind(
    kind: GeneratorKind,
    registry: &GeneratorRegistry,
) -> Result<Vec<Arc<dyn Generator>>, GeneratorError> {
    registry
        .get(kind)
        .map(|generator| vec![Arc::clone(generator)])
        .ok_or(GeneratorError::NotEnabled(kind))
}
