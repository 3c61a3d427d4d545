//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Fuzzy path resolution constants
pub mod resolver {
    /// Maximum Levenshtein distance accepted for a filename match
    pub const MAX_EDIT_DISTANCE: usize = 5;

    /// Maximum number of suggestions returned for unmatched paths
    pub const MAX_SUGGESTIONS: usize = 5;

    /// Filename prefix length used when collecting suggestions
    pub const SUGGESTION_PREFIX_LEN: usize = 4;

    /// Smallest path suffix (in segments) tried for partial-path matching
    pub const MIN_SUFFIX_SEGMENTS: usize = 2;

    /// Largest path suffix (in segments) tried for partial-path matching
    pub const MAX_SUFFIX_SEGMENTS: usize = 4;
}

/// Cache constants
pub mod cache {
    /// File-listing cache expiration (seconds)
    pub const FILE_LIST_TTL_SECS: u64 = 300;

    /// Dependency-graph cache expiration (seconds)
    pub const GRAPH_TTL_SECS: u64 = 300;
}

/// Analysis constants
pub mod analysis {
    /// Default BFS propagation depth when the request omits one
    pub const DEFAULT_DEPTH: usize = 2;

    /// Upper bound on requested propagation depth
    pub const MAX_DEPTH: usize = 10;

    /// Maximum file size read during graph construction (1MB)
    pub const MAX_FILE_SIZE: u64 = 1_048_576;
}

/// Risk scoring constants
///
/// These are heuristic weights; they are surfaced through `RiskConfig`
/// so deployments can tune them without a rebuild.
pub mod risk {
    /// Score contributed per affected component
    pub const PER_COMPONENT: u32 = 5;

    /// Cap on the component contribution
    pub const COMPONENT_CAP: u32 = 30;

    /// Multiplier applied to each integration finding's weight
    pub const INTEGRATION_MULTIPLIER: u32 = 10;

    /// Cap on the integration contribution
    pub const INTEGRATION_CAP: u32 = 50;

    /// Score contributed per directly-affected test
    pub const PER_DIRECT_TEST: u32 = 5;

    /// Cap on the test contribution
    pub const TEST_CAP: u32 = 20;

    /// Total score at or above which risk is critical
    pub const CRITICAL_THRESHOLD: u32 = 70;

    /// Total score at or above which risk is high
    pub const HIGH_THRESHOLD: u32 = 50;

    /// Total score at or above which risk is medium
    pub const MEDIUM_THRESHOLD: u32 = 30;
}
