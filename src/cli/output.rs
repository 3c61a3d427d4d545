//! Console Output
//!
//! Styled terminal rendering for reports and command feedback.

use console::style;

use crate::types::{BlastRadiusReport, ResolvedFile, RiskLevel};

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the conventional color for a risk level
fn colored_level(level: RiskLevel) -> console::StyledObject<String> {
    let text = level.to_string();
    match level {
        RiskLevel::Low => style(text).green(),
        RiskLevel::Medium => style(text).yellow(),
        RiskLevel::High => style(text).red(),
        RiskLevel::Critical => style(text).red().bold(),
    }
}

/// Render the full report as styled text
pub fn render_report(report: &BlastRadiusReport) {
    let out = Output::new();

    println!(
        "{} {}",
        style("Blast radius for").bold(),
        style(&report.application_id).cyan()
    );

    out.section("Risk");
    println!(
        "  {} ({}/100)",
        colored_level(report.risk.level),
        report.risk.score
    );
    println!("  {}", report.risk.description);

    out.section(&format!("Changed files ({})", report.changed_files.len()));
    for file in &report.changed_files {
        render_resolved(file);
    }

    out.section(&format!(
        "Impact ({} components)",
        report.impact.affected_components.len()
    ));
    println!(
        "  Direct dependents: {}",
        report.impact.direct_dependency_count
    );
    println!(
        "  Transitive dependents: {}",
        report.impact.transitive_dependency_count
    );
    for path in &report.impact.affected_components {
        println!("  → {}", path);
    }
    if !report.impact.affected_tests.is_empty() {
        println!("  Tests in radius:");
        for path in &report.impact.affected_tests {
            println!("    {}", path);
        }
    }

    if !report.recommendations.is_empty() {
        out.section(&format!(
            "Recommendations ({})",
            report.recommendations.len()
        ));
        for rec in &report.recommendations {
            println!(
                "  [{}] {}: {}",
                colored_level(rec.priority),
                style(&rec.category).bold(),
                rec.text
            );
            if !rec.suggested_test_types.is_empty() {
                println!(
                    "      suggested tests: {}",
                    rec.suggested_test_types.join(", ")
                );
            }
        }
    }
}

/// Render one resolution outcome as a single annotated line
pub fn render_resolved(file: &ResolvedFile) {
    if file.exists {
        let mut annotation = format!("{}", file.match_strategy);
        if let Some(distance) = file.edit_distance {
            annotation.push_str(&format!(", distance {}", distance));
        }
        if file.requested_path == file.resolved_path {
            println!("  {} {}", style("✓").green(), file.resolved_path);
        } else {
            println!(
                "  {} {} {} {} ({})",
                style("✓").green(),
                file.requested_path,
                style("→").dim(),
                file.resolved_path,
                style(annotation).dim()
            );
        }
    } else {
        println!("  {} {} (not found)", style("✗").red(), file.requested_path);
        if let Some(suggestions) = &file.alternative_suggestions {
            for suggestion in suggestions {
                println!("      did you mean {}?", style(suggestion).cyan());
            }
        }
    }
}
