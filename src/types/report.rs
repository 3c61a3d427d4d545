//! Analysis Request and Report Types
//!
//! Wire-level data model for a blast-radius analysis: the request shape,
//! per-path resolution outcomes, affected components, integration and test
//! findings, the risk assessment, and the assembled report.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::insight::FileInsight;

// =============================================================================
// Request
// =============================================================================

/// A single blast-radius analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Application identifier (selects the workspace root)
    pub application_id: String,
    /// Changed file paths as reported by the caller; may be inexact
    pub changed_files: Vec<String>,
    /// Maximum BFS propagation depth; engine default applies when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

// =============================================================================
// Path Resolution
// =============================================================================

/// Which strategy of the resolution cascade produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    Exact,
    CaseInsensitive,
    FilenameOnly,
    FilenameCaseInsensitive,
    PartialPath,
    EditDistance,
    NotFound,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::FilenameOnly => "filename-only",
            Self::FilenameCaseInsensitive => "filename-case-insensitive",
            Self::PartialPath => "partial-path",
            Self::EditDistance => "edit-distance",
            Self::NotFound => "not-found",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of resolving one requested path against the known file set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
    pub requested_path: String,
    /// Equal to `requested_path` when no match was found
    pub resolved_path: String,
    pub exists: bool,
    pub match_strategy: MatchStrategy,
    /// Levenshtein distance, present only for edit-distance matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_distance: Option<usize>,
    /// Near-miss candidates, present only for not-found outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_suggestions: Option<Vec<String>>,
}

impl ResolvedFile {
    /// A successful match via the given strategy
    pub fn matched(requested: impl Into<String>, resolved: impl Into<String>, strategy: MatchStrategy) -> Self {
        Self {
            requested_path: requested.into(),
            resolved_path: resolved.into(),
            exists: true,
            match_strategy: strategy,
            edit_distance: None,
            alternative_suggestions: None,
        }
    }

    /// An unmatched path with optional suggestions
    pub fn not_found(requested: impl Into<String>, suggestions: Vec<String>) -> Self {
        let requested = requested.into();
        Self {
            resolved_path: requested.clone(),
            requested_path: requested,
            exists: false,
            match_strategy: MatchStrategy::NotFound,
            edit_distance: None,
            alternative_suggestions: if suggestions.is_empty() {
                None
            } else {
                Some(suggestions)
            },
        }
    }
}

// =============================================================================
// Impact
// =============================================================================

/// A component reached by BFS propagation from the change set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedComponent {
    pub path: String,
    /// Coarse structural classification, e.g. "API controller"
    pub archetype_label: String,
    /// BFS distance from the nearest directly-changed file; 0 only for
    /// files in the original change set
    pub depth: usize,
    pub changed_directly: bool,
}

/// Category of external or critical coupling detected on an affected path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegrationType {
    EhrIntegration,
    Financial,
    PaymentGateway,
    ExternalApi,
    Database,
    Messaging,
    InternalService,
    Ui,
}

impl std::fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EhrIntegration => "EHR integration",
            Self::Financial => "financial",
            Self::PaymentGateway => "payment gateway",
            Self::ExternalApi => "external API",
            Self::Database => "database",
            Self::Messaging => "messaging",
            Self::InternalService => "internal service",
            Self::Ui => "UI",
        };
        write!(f, "{}", s)
    }
}

/// Overall or per-finding risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// A detected coupling point to an external or critical subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationFinding {
    #[serde(rename = "type")]
    pub integration_type: IntegrationType,
    pub risk_level: RiskLevel,
    /// Fixed weight of the matched keyword group; feeds the risk score
    pub weight: u32,
    /// First affected path that matched the group
    pub example_file: String,
}

/// Kind of test file detected among affected components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    Unit,
    Integration,
    E2e,
    Api,
}

/// A test file within the blast radius
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFinding {
    pub path: String,
    pub test_type: TestType,
    /// True when the test file itself is in the change set
    pub directly_affected: bool,
}

// =============================================================================
// Assessment and Recommendations
// =============================================================================

/// Scored and banded overall risk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// 0..=100
    pub score: u32,
    pub level: RiskLevel,
    pub description: String,
}

/// A single testing recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub priority: RiskLevel,
    pub text: String,
    pub suggested_test_types: Vec<String>,
}

/// Aggregate impact counts for the report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    /// Paths of all affected components, shallowest-first
    pub affected_components: Vec<String>,
    /// Paths of affected test files
    pub affected_tests: Vec<String>,
    /// Distinct integration types in the blast radius
    pub affected_integrations: Vec<IntegrationType>,
    /// Components at BFS depth 1
    pub direct_dependency_count: usize,
    /// Components at BFS depth 2 and beyond
    pub transitive_dependency_count: usize,
}

/// Complete result of one blast-radius analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlastRadiusReport {
    pub application_id: String,
    pub risk: RiskAssessment,
    /// One entry per requested path, matched or not, in request order
    pub changed_files: Vec<ResolvedFile>,
    pub impact: ImpactSummary,
    /// Insights for the changed files that exist in the workspace
    pub file_insights: HashMap<String, FileInsight>,
    pub recommendations: Vec<Recommendation>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_strategy_serde_kebab_case() {
        let json = serde_json::to_string(&MatchStrategy::FilenameCaseInsensitive).unwrap();
        assert_eq!(json, "\"filename-case-insensitive\"");

        let strategy: MatchStrategy = serde_json::from_str("\"edit-distance\"").unwrap();
        assert_eq!(strategy, MatchStrategy::EditDistance);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::High > RiskLevel::Medium);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }

    #[test]
    fn test_resolved_file_not_found_omits_empty_suggestions() {
        let file = ResolvedFile::not_found("Services/Ghost.cs", vec![]);
        assert!(!file.exists);
        assert!(file.alternative_suggestions.is_none());
        assert_eq!(file.resolved_path, "Services/Ghost.cs");

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["matchStrategy"], "not-found");
        assert!(json.get("alternativeSuggestions").is_none());
    }

    #[test]
    fn test_integration_finding_wire_field_names() {
        let finding = IntegrationFinding {
            integration_type: IntegrationType::PaymentGateway,
            risk_level: RiskLevel::Critical,
            weight: 5,
            example_file: "Services/StripeClient.cs".to_string(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["type"], "payment-gateway");
        assert_eq!(json["riskLevel"], "critical");
        assert_eq!(json["exampleFile"], "Services/StripeClient.cs");
    }
}
