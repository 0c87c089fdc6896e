//! Generator Capability
//!
//! The contract every generator satisfies, whether it reads a static list or
//! calls out to an external system. Generators are shared across concurrent
//! generation runs, so implementations must be `Send + Sync` and keep no
//! per-run state.

use crate::declaration::GeneratorDeclaration;
use crate::error::GeneratorError;
use crate::types::{Element, OwnerRef};
use async_trait::async_trait;
use std::time::Duration;

pub mod list;

pub use list::ListGenerator;

/// Produces parameter elements for the declarations of one kind
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate elements for `declaration`.
    ///
    /// Returns `GeneratorError::EmptyDeclaration` when `declaration` is `None`,
    /// and an empty list when the declaration selects another kind.
    async fn generate(
        &self,
        declaration: Option<&GeneratorDeclaration>,
        owner: &OwnerRef,
    ) -> Result<Vec<Element>, GeneratorError>;

    /// How soon the owner should be generated again.
    ///
    /// `None` means no periodic re-poll is needed.
    fn interval(&self, declaration: &GeneratorDeclaration) -> Option<Duration>;
}

/// Reject a missing declaration.
pub fn require_declaration(
    declaration: Option<&GeneratorDeclaration>,
) -> Result<&GeneratorDeclaration, GeneratorError> {
    declaration.ok_or(GeneratorError::EmptyDeclaration)
}

/// Smallest requeue interval, ignoring "no requeue" and zero entries.
pub fn lowest_interval<I>(intervals: I) -> Option<Duration>
where
    I: IntoIterator<Item = Option<Duration>>,
{
    intervals
        .into_iter()
        .flatten()
        .filter(|interval| !interval.is_zero())
        .min()
}
