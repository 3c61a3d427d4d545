//! Workspace Capability Boundary
//!
//! The analyzer consumes two capabilities from its host environment: a
//! file-listing capability and a file-read capability. Both are expressed
//! through the [`FileStore`] trait so transports (local directory, remote
//! mount, test fixture) stay interchangeable.
//!
//! ## Implementations
//!
//! - [`LocalFileStore`]: applications mapped to local directories
//! - [`MemoryFileStore`]: in-memory file set for embedding and tests

mod local;
mod memory;

pub use local::LocalFileStore;
pub use memory::MemoryFileStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{AppId, Result};

/// Result of attempting to read a file's content.
///
/// `Unavailable` is a normal, non-fatal outcome: the graph builder degrades
/// to naming-convention inference for such files. Only a failure of the
/// capability itself (unknown application, unreachable root) is an error.
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    Content(String),
    Unavailable(String),
}

impl ReadOutcome {
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Content(c) => Some(c),
            Self::Unavailable(_) => None,
        }
    }
}

/// File-listing and file-read capabilities for one or more applications
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Enumerate every known file path for the application, relative to
    /// its root, with forward-slash separators
    async fn list_files(&self, app: &AppId) -> Result<Vec<String>>;

    /// Read one file's content; unreadable files yield
    /// `ReadOutcome::Unavailable`, not an error
    async fn read_file(&self, app: &AppId, path: &str) -> Result<ReadOutcome>;
}

/// Shared file store for thread-safe access
pub type SharedFileStore = Arc<dyn FileStore>;
