//! Genset: Generator Composition
//!
//! Produces ordered lists of parameter maps ("elements") from declared
//! generators. Each generator kind reads one data source; the matrix generator
//! combines two or more of them by cartesian product or packs their results
//! into a single element. The registry decides which kinds are enabled and
//! how often an owner needs to be regenerated.

pub mod config;
pub mod declaration;
pub mod error;
pub mod generator;
pub mod logging;
pub mod matrix;
pub mod merge;
pub mod registry;
pub mod types;

pub use declaration::{GeneratorDeclaration, GeneratorKind, NestedGenerator, NestedGeneratorDeclaration};
pub use error::{GeneratorError, SetupError};
pub use generator::{Generator, ListGenerator};
pub use matrix::MatrixGenerator;
pub use registry::GeneratorRegistry;
pub use types::{Element, GeneratedSet, OwnerRef};
