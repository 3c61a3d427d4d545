//! Configuration Types
//!
//! Serde-backed configuration with built-in defaults sourced from
//! `constants`. Risk weights are deliberately configuration rather than
//! code: they are heuristic and meant to be tuned per deployment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{analysis, cache, risk};
use crate::types::{BlastError, Result};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: String,
    pub cache: CacheConfig,
    pub analysis: AnalysisConfig,
    pub risk: RiskConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            cache: CacheConfig::default(),
            analysis: AnalysisConfig::default(),
            risk: RiskConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.risk.validate()
    }
}

/// TTLs for the two shared caches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub file_list_ttl_secs: u64,
    pub graph_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            file_list_ttl_secs: cache::FILE_LIST_TTL_SECS,
            graph_ttl_secs: cache::GRAPH_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn file_list_ttl(&self) -> Duration {
        Duration::from_secs(self.file_list_ttl_secs)
    }

    pub fn graph_ttl(&self) -> Duration {
        Duration::from_secs(self.graph_ttl_secs)
    }
}

/// Traversal and file-reading limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// BFS depth used when a request omits one
    pub default_depth: usize,
    /// Hard cap on requested depth
    pub max_depth: usize,
    /// Per-file read limit in bytes
    pub max_file_size: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_depth: analysis::DEFAULT_DEPTH,
            max_depth: analysis::MAX_DEPTH,
            max_file_size: analysis::MAX_FILE_SIZE,
        }
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<()> {
        if self.default_depth == 0 || self.default_depth > self.max_depth {
            return Err(BlastError::Config(format!(
                "default_depth must be in 1..={}, got {}",
                self.max_depth, self.default_depth
            )));
        }
        Ok(())
    }

    /// Clamp a requested depth into the configured range
    pub fn effective_depth(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_depth)
            .clamp(1, self.max_depth)
    }
}

/// Risk scoring weights, caps, and level thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub per_component: u32,
    pub component_cap: u32,
    pub integration_multiplier: u32,
    pub integration_cap: u32,
    pub per_direct_test: u32,
    pub test_cap: u32,
    pub critical_threshold: u32,
    pub high_threshold: u32,
    pub medium_threshold: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            per_component: risk::PER_COMPONENT,
            component_cap: risk::COMPONENT_CAP,
            integration_multiplier: risk::INTEGRATION_MULTIPLIER,
            integration_cap: risk::INTEGRATION_CAP,
            per_direct_test: risk::PER_DIRECT_TEST,
            test_cap: risk::TEST_CAP,
            critical_threshold: risk::CRITICAL_THRESHOLD,
            high_threshold: risk::HIGH_THRESHOLD,
            medium_threshold: risk::MEDIUM_THRESHOLD,
        }
    }
}

impl RiskConfig {
    fn validate(&self) -> Result<()> {
        if self.medium_threshold >= self.high_threshold
            || self.high_threshold >= self.critical_threshold
        {
            return Err(BlastError::Config(format!(
                "risk thresholds must be strictly increasing: {} < {} < {}",
                self.medium_threshold, self.high_threshold, self.critical_threshold
            )));
        }
        Ok(())
    }
}
