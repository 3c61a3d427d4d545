//! Local Directory File Store
//!
//! Maps each application id to a directory on the local filesystem and
//! serves the listing/read capabilities from it. Enumeration is
//! gitignore-aware and skips the usual build artifact directories.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::constants::analysis::MAX_FILE_SIZE;
use crate::types::{AppId, BlastError, Result};

use super::{FileStore, ReadOutcome};

/// Default directories to skip during enumeration
const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    ".git",
    "bin",
    "obj",
    "build",
    "dist",
    "__pycache__",
    "vendor",
    ".venv",
];

/// Serves applications rooted at local directories
pub struct LocalFileStore {
    roots: HashMap<AppId, PathBuf>,
    exclude: Vec<String>,
    max_file_size: u64,
}

impl LocalFileStore {
    pub fn new() -> Self {
        let exclude = DEFAULT_SKIP_DIRS
            .iter()
            .map(|d| format!("**/{}/**", d))
            .collect();
        Self {
            roots: HashMap::new(),
            exclude,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Create a store serving a single application
    pub fn single(app: impl Into<AppId>, root: impl AsRef<Path>) -> Self {
        let mut store = Self::new();
        store.add_application(app, root);
        store
    }

    /// Register an application root
    pub fn add_application(&mut self, app: impl Into<AppId>, root: impl AsRef<Path>) {
        self.roots.insert(app.into(), root.as_ref().to_path_buf());
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    fn root_for(&self, app: &AppId) -> Result<&PathBuf> {
        self.roots
            .get(app)
            .ok_or_else(|| BlastError::workspace(app.as_str(), "unknown application"))
    }

    fn should_exclude(&self, path: &str) -> bool {
        self.exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(path))
                .unwrap_or(false)
        })
    }

    /// Reject paths that climb out of the application root
    fn escapes_root(path: &str) -> bool {
        Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    }
}

impl Default for LocalFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn list_files(&self, app: &AppId) -> Result<Vec<String>> {
        let root = self.root_for(app)?.clone();
        if !root.is_dir() {
            return Err(BlastError::workspace(
                app.as_str(),
                format!("root directory not found: {}", root.display()),
            ));
        }

        let exclude = self.exclude.clone();
        let max_size = self.max_file_size;
        let store_excludes = move |rel: &str| {
            exclude.iter().any(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|p| p.matches(rel))
                    .unwrap_or(false)
            })
        };

        // Directory walking is blocking work; keep it off the async executor.
        let paths = tokio::task::spawn_blocking(move || {
            let walker = WalkBuilder::new(&root)
                .hidden(false)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .follow_links(false) // Security: prevent symlink traversal attacks
                .build();

            let mut paths = Vec::new();
            for entry in walker.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                if let Ok(metadata) = path.metadata()
                    && metadata.len() > max_size
                {
                    continue;
                }
                if let Ok(rel) = path.strip_prefix(&root) {
                    let rel = rel.to_string_lossy().replace('\\', "/");
                    if !store_excludes(&rel) {
                        paths.push(rel);
                    }
                }
            }
            paths.sort();
            paths
        })
        .await
        .map_err(|e| BlastError::workspace(app.as_str(), format!("listing task failed: {}", e)))?;

        debug!(app = %app, files = paths.len(), "enumerated workspace");
        Ok(paths)
    }

    async fn read_file(&self, app: &AppId, path: &str) -> Result<ReadOutcome> {
        let root = self.root_for(app)?;

        if Self::escapes_root(path) || self.should_exclude(path) {
            return Ok(ReadOutcome::Unavailable(format!(
                "path outside mounted root: {}",
                path
            )));
        }

        let full = root.join(path);
        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.len() > self.max_file_size => {
                warn!(path, size = meta.len(), "file exceeds size limit, skipping");
                return Ok(ReadOutcome::Unavailable("file exceeds size limit".into()));
            }
            Err(e) => return Ok(ReadOutcome::Unavailable(e.to_string())),
            Ok(_) => {}
        }

        match tokio::fs::read_to_string(&full).await {
            Ok(content) => Ok(ReadOutcome::Content(content)),
            Err(e) => {
                warn!(path, error = %e, "file unreadable, skipping");
                Ok(ReadOutcome::Unavailable(e.to_string()))
            }
        }
    }
}
