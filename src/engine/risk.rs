//! Risk Scoring
//!
//! Additive score over three capped components, banded into a level by
//! configurable thresholds. Weights and thresholds come from [`RiskConfig`]
//! so deployments can tune the heuristic without a rebuild.

use crate::config::RiskConfig;
use crate::types::{
    AffectedComponent, IntegrationFinding, RiskAssessment, RiskLevel, TestFinding,
};

/// Score the blast radius and band it into a risk level.
///
/// score = min(component_cap, per_component * |components|)
///       + min(integration_cap, multiplier * sum(finding weights))
///       + min(test_cap, per_direct_test * |directly affected tests|)
pub fn assess(
    config: &RiskConfig,
    components: &[AffectedComponent],
    integrations: &[IntegrationFinding],
    tests: &[TestFinding],
) -> RiskAssessment {
    let component_score = (config.per_component * components.len() as u32)
        .min(config.component_cap);

    let integration_weight: u32 = integrations.iter().map(|f| f.weight).sum();
    let integration_score =
        (config.integration_multiplier * integration_weight).min(config.integration_cap);

    let direct_tests = tests.iter().filter(|t| t.directly_affected).count() as u32;
    let test_score = (config.per_direct_test * direct_tests).min(config.test_cap);

    let score = (component_score + integration_score + test_score).min(100);
    let level = band(config, score);

    RiskAssessment {
        score,
        level,
        description: describe(level, components.len(), integrations, direct_tests as usize),
    }
}

fn band(config: &RiskConfig, score: u32) -> RiskLevel {
    if score >= config.critical_threshold {
        RiskLevel::Critical
    } else if score >= config.high_threshold {
        RiskLevel::High
    } else if score >= config.medium_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn describe(
    level: RiskLevel,
    component_count: usize,
    integrations: &[IntegrationFinding],
    direct_tests: usize,
) -> String {
    let mut description = format!(
        "{} risk: {} affected component{}",
        capitalized(level),
        component_count,
        plural(component_count)
    );

    if !integrations.is_empty() {
        let names: Vec<String> = integrations
            .iter()
            .map(|f| f.integration_type.to_string())
            .collect();
        description.push_str(&format!(
            ", touching {} integration{} ({})",
            integrations.len(),
            plural(integrations.len()),
            names.join(", ")
        ));
    }

    if direct_tests > 0 {
        description.push_str(&format!(
            ", {} test file{} directly changed",
            direct_tests,
            plural(direct_tests)
        ));
    }

    description
}

fn capitalized(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low",
        RiskLevel::Medium => "Medium",
        RiskLevel::High => "High",
        RiskLevel::Critical => "Critical",
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
