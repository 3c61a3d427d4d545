//! Component, Integration, and Test Classification
//!
//! Keyword-based classification of affected file paths: the coarse
//! archetype of each component, couplings to external or critical
//! subsystems, and test files with their sub-type.

use crate::types::{
    AffectedComponent, IntegrationFinding, IntegrationType, RiskLevel, TestFinding, TestType,
};

// =============================================================================
// Archetypes
// =============================================================================

/// Coarse structural classification of a file, inferred from path keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Controller,
    Service,
    Repository,
    Model,
    Test,
    Integration,
    Middleware,
    Handler,
    Utility,
    Component,
}

impl Archetype {
    /// Classify by path keywords, first match in priority order
    pub fn classify(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("controller") {
            Self::Controller
        } else if lower.contains("service") {
            Self::Service
        } else if lower.contains("repository") {
            Self::Repository
        } else if lower.contains("model") || lower.contains("entity") {
            Self::Model
        } else if lower.contains("test") {
            Self::Test
        } else if lower.contains("integration") {
            Self::Integration
        } else if lower.contains("middleware") {
            Self::Middleware
        } else if lower.contains("handler") {
            Self::Handler
        } else if lower.contains("helper") || lower.contains("util") {
            Self::Utility
        } else {
            Self::Component
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Controller => "API controller",
            Self::Service => "business service",
            Self::Repository => "data repository",
            Self::Model => "data model",
            Self::Test => "test suite",
            Self::Integration => "integration layer",
            Self::Middleware => "middleware",
            Self::Handler => "request handler",
            Self::Utility => "utility",
            Self::Component => "component",
        }
    }
}

// =============================================================================
// Integration Detection
// =============================================================================

/// One keyword group in the ordered detection table
struct IntegrationRule {
    integration_type: IntegrationType,
    keywords: &'static [&'static str],
    /// When set, every keyword must appear (the "api"+"client" rule);
    /// otherwise any single keyword matches
    requires_all: bool,
    risk_level: RiskLevel,
    weight: u32,
}

/// Ordered detection table; earlier groups take precedence per component
const INTEGRATION_RULES: &[IntegrationRule] = &[
    IntegrationRule {
        integration_type: IntegrationType::EhrIntegration,
        keywords: &["ehr", "emr", "epic", "cerner", "hl7", "fhir"],
        requires_all: false,
        risk_level: RiskLevel::Critical,
        weight: 5,
    },
    IntegrationRule {
        integration_type: IntegrationType::Financial,
        keywords: &["billing", "invoice", "financial", "payment", "claim"],
        requires_all: false,
        risk_level: RiskLevel::Critical,
        weight: 5,
    },
    IntegrationRule {
        integration_type: IntegrationType::PaymentGateway,
        keywords: &["stripe", "paypal", "braintree", "square"],
        requires_all: false,
        risk_level: RiskLevel::Critical,
        weight: 5,
    },
    IntegrationRule {
        integration_type: IntegrationType::ExternalApi,
        keywords: &["api", "client"],
        requires_all: true,
        risk_level: RiskLevel::Medium,
        weight: 3,
    },
    IntegrationRule {
        integration_type: IntegrationType::Database,
        keywords: &["repository", "dbcontext", "database", "migration"],
        requires_all: false,
        risk_level: RiskLevel::High,
        weight: 4,
    },
    IntegrationRule {
        integration_type: IntegrationType::Messaging,
        keywords: &["queue", "message", "kafka", "rabbitmq", "servicebus"],
        requires_all: false,
        risk_level: RiskLevel::Medium,
        weight: 3,
    },
    IntegrationRule {
        integration_type: IntegrationType::InternalService,
        keywords: &["grpc", "rpc"],
        requires_all: false,
        risk_level: RiskLevel::Low,
        weight: 2,
    },
    IntegrationRule {
        integration_type: IntegrationType::Ui,
        keywords: &["view", "page", "screen"],
        requires_all: false,
        risk_level: RiskLevel::Low,
        weight: 1,
    },
];

impl IntegrationRule {
    fn matches(&self, path_lower: &str) -> bool {
        if self.requires_all {
            self.keywords.iter().all(|k| path_lower.contains(k))
        } else {
            self.keywords.iter().any(|k| path_lower.contains(k))
        }
    }
}

/// Scan affected components against the integration table, one finding
/// per matched group per component, deduplicated by type (first wins)
pub fn detect_integrations(components: &[AffectedComponent]) -> Vec<IntegrationFinding> {
    let mut findings: Vec<IntegrationFinding> = Vec::new();

    for component in components {
        let lower = component.path.to_lowercase();
        for rule in INTEGRATION_RULES {
            if !rule.matches(&lower) {
                continue;
            }
            if findings
                .iter()
                .any(|f| f.integration_type == rule.integration_type)
            {
                continue;
            }
            findings.push(IntegrationFinding {
                integration_type: rule.integration_type,
                risk_level: rule.risk_level,
                weight: rule.weight,
                example_file: component.path.clone(),
            });
        }
    }

    findings
}

// =============================================================================
// Test Detection
// =============================================================================

/// Filter affected components that are test code and classify the sub-type
pub fn detect_tests(components: &[AffectedComponent]) -> Vec<TestFinding> {
    components
        .iter()
        .filter(|c| c.path.to_lowercase().contains("test"))
        .map(|c| {
            let lower = c.path.to_lowercase();
            let test_type = if lower.contains("integration") {
                TestType::Integration
            } else if lower.contains("e2e") {
                TestType::E2e
            } else if lower.contains("api") {
                TestType::Api
            } else {
                TestType::Unit
            };
            TestFinding {
                path: c.path.clone(),
                test_type,
                directly_affected: c.changed_directly,
            }
        })
        .collect()
}
