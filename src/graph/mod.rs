//! Dependency Graph Construction
//!
//! Builds a bidirectional file dependency graph from lightweight source
//! scanning plus naming-convention inference, cached per application.
//!
//! ## Modules
//!
//! - [`model`]: the graph structure and bounded BFS walks
//! - [`inference`]: naming-convention edge heuristics
//! - [`builder`]: cached build orchestration over the file store

mod builder;
mod inference;
mod model;

pub use builder::{BuiltGraph, DependencyGraphBuilder};
pub use inference::{infer_dependencies, infer_dependents};
pub use model::{DependencyGraph, Reached};
