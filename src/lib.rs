//! BlastMap - Change-Impact ("Blast Radius") Analyzer
//!
//! Given an application and a set of nominally-changed file paths, BlastMap
//! resolves the paths against the real file tree, builds a file dependency
//! graph from lightweight source scanning plus naming-convention inference,
//! propagates impact outward by bounded BFS, and produces a risk-scored
//! report with testing recommendations.
//!
//! ## Pipeline
//!
//! 1. **Resolve**: fuzzy-match each changed path onto a real file
//! 2. **BuildGraph**: scan sources, persist import edges, cache per app
//! 3. **Propagate**: bounded BFS over the dependents relation
//! 4. **Classify**: archetypes, integration couplings, test files
//! 5. **Score**: additive capped risk score, banded into a level
//! 6. **Recommend**: testing guidance derived from the classified impact
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use blastmap::{AnalyzeRequest, BlastRadiusEngine, Config, LocalFileStore};
//!
//! let store = LocalFileStore::single("clinic", "/srv/apps/clinic");
//! let engine = BlastRadiusEngine::new(Arc::new(store), &Config::default());
//! let report = engine
//!     .analyze(&AnalyzeRequest {
//!         application_id: "clinic".into(),
//!         changed_files: vec!["Services/PaymentService.cs".into()],
//!         depth: None,
//!     })
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: the analysis pipeline end to end
//! - [`resolver`]: fuzzy path resolution cascade
//! - [`graph`]: dependency graph construction and BFS
//! - [`scanner`]: per-file-kind lexical source scanning
//! - [`workspace`]: file listing/reading capabilities
//! - [`config`]: layered configuration with tunable risk weights

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod engine;
pub mod graph;
pub mod resolver;
pub mod scanner;
pub mod types;
pub mod workspace;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{AnalysisConfig, CacheConfig, Config, ConfigLoader, RiskConfig};

// Error Types
pub use types::error::{BlastError, Result, ResultExt};

// Engine
pub use engine::BlastRadiusEngine;

// Requests and Reports
pub use types::{
    AnalyzeRequest, AppId, BlastRadiusReport, ImpactSummary, MatchStrategy, Recommendation,
    ResolvedFile, RiskAssessment, RiskLevel,
};

// Capabilities
pub use workspace::{FileStore, LocalFileStore, MemoryFileStore, SharedFileStore};
