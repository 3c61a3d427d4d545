//! In-Memory File Store
//!
//! Serves a fixed file set from memory. Useful for embedding the analyzer
//! against file manifests that have no local checkout (CI diff listings),
//! and as the test double for resolver/builder/engine tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::types::{AppId, BlastError, Result};

use super::{FileStore, ReadOutcome};

/// A file set held entirely in memory.
///
/// Paths registered without content are listed but unreadable, which
/// exercises the builder's naming-convention fallback.
#[derive(Default)]
pub struct MemoryFileStore {
    apps: HashMap<AppId, HashMap<String, Option<String>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file with readable content
    pub fn with_file(
        mut self,
        app: impl Into<AppId>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.apps
            .entry(app.into())
            .or_default()
            .insert(path.into(), Some(content.into()));
        self
    }

    /// Register a path that is listed but whose content is unavailable
    pub fn with_unreadable(mut self, app: impl Into<AppId>, path: impl Into<String>) -> Self {
        self.apps
            .entry(app.into())
            .or_default()
            .insert(path.into(), None);
        self
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn list_files(&self, app: &AppId) -> Result<Vec<String>> {
        let files = self
            .apps
            .get(app)
            .ok_or_else(|| BlastError::workspace(app.as_str(), "unknown application"))?;
        let mut paths: Vec<String> = files.keys().cloned().collect();
        paths.sort();
        Ok(paths)
    }

    async fn read_file(&self, app: &AppId, path: &str) -> Result<ReadOutcome> {
        let files = self
            .apps
            .get(app)
            .ok_or_else(|| BlastError::workspace(app.as_str(), "unknown application"))?;
        Ok(match files.get(path) {
            Some(Some(content)) => ReadOutcome::Content(content.clone()),
            Some(None) => ReadOutcome::Unavailable("content not provided".into()),
            None => ReadOutcome::Unavailable("no such file".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listing_is_sorted() {
        let store = MemoryFileStore::new()
            .with_file("app", "b.ts", "")
            .with_file("app", "a.ts", "");
        let files = store.list_files(&AppId::new("app")).await.unwrap();
        assert_eq!(files, vec!["a.ts", "b.ts"]);
    }

    #[tokio::test]
    async fn test_unreadable_path_listed_but_unavailable() {
        let store = MemoryFileStore::new().with_unreadable("app", "Services/PaymentService.cs");
        let app = AppId::new("app");

        assert_eq!(
            store.list_files(&app).await.unwrap(),
            vec!["Services/PaymentService.cs"]
        );
        let outcome = store
            .read_file(&app, "Services/PaymentService.cs")
            .await
            .unwrap();
        assert!(outcome.content().is_none());
    }
}
