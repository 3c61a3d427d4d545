//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (BlastError) for the entire application
//! - The analysis pipeline itself is total: unresolved paths, unreadable
//!   files, and empty requests are absorbed into the report rather than
//!   surfaced as errors. Only infrastructure failures (config, workspace
//!   root, serialization) reach the caller.
//! - No panic/unwrap - all errors are recoverable

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlastError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    /// The file-store capability itself is unusable for an application
    /// (unknown application id, missing root directory). Individual
    /// unreadable files are NOT reported through this variant.
    #[error("Workspace error for '{app}': {message}")]
    Workspace { app: String, message: String },

    #[error("Scan error in {path}: {message}")]
    Scan { message: String, path: String },
}

impl BlastError {
    /// Create a workspace error with application context
    pub fn workspace(app: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workspace {
            app: app.into(),
            message: message.into(),
        }
    }

    /// Create a scan error with path context
    pub fn scan(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Scan {
            message: message.into(),
            path: path.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlastError>;

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| BlastError::Config(format!("{}: {}", context.into(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_error_display() {
        let err = BlastError::workspace("billing-portal", "root directory not found");
        assert_eq!(
            err.to_string(),
            "Workspace error for 'billing-portal': root directory not found"
        );
    }

    #[test]
    fn test_scan_error_display() {
        let err = BlastError::scan("src/App.vue", "unterminated script block");
        assert_eq!(
            err.to_string(),
            "Scan error in src/App.vue: unterminated script block"
        );
    }

    #[test]
    fn test_result_ext_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.with_context("loading config").unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
