pub mod error;
pub mod insight;
pub mod report;

pub use error::{BlastError, Result, ResultExt};
pub use insight::{FileInsight, ImportKind, ImportRecord};
pub use report::{
    AffectedComponent, AnalyzeRequest, BlastRadiusReport, ImpactSummary, IntegrationFinding,
    IntegrationType, MatchStrategy, Recommendation, ResolvedFile, RiskAssessment, RiskLevel,
    TestFinding, TestType,
};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Type-safe wrapper for application identifiers
///
/// Prevents accidental mixing of application ids with other string types
/// (paths, module specifiers) in cache keys and capability calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AppId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the final path segment of a slash- or backslash-separated path.
///
/// Operates on the raw string rather than `std::path::Path` so that
/// Windows-style paths from foreign codebases resolve the same way on
/// every host platform.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Normalize separators to forward slashes
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
