//! Testing Recommendations
//!
//! Turns the classified impact into concrete testing guidance: one
//! recommendation per detected integration, per affected architectural
//! layer, and a full-regression entry when overall risk is critical.

use crate::types::{
    AffectedComponent, IntegrationFinding, IntegrationType, Recommendation, RiskLevel,
};

use super::classify::Archetype;

/// Build the recommendation list, highest priority first
pub fn recommendations(
    overall_level: RiskLevel,
    components: &[AffectedComponent],
    integrations: &[IntegrationFinding],
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for finding in integrations {
        recs.push(Recommendation {
            category: "Integration".to_string(),
            priority: finding.risk_level,
            text: format!(
                "Verify the {} coupling exercised via {}",
                finding.integration_type, finding.example_file
            ),
            suggested_test_types: integration_test_types(finding.integration_type),
        });
    }

    let mut has_controller = false;
    let mut has_service = false;
    let mut has_repository = false;
    for component in components {
        match Archetype::classify(&component.path) {
            Archetype::Controller => has_controller = true,
            Archetype::Service => has_service = true,
            Archetype::Repository => has_repository = true,
            _ => {}
        }
    }

    if has_controller {
        recs.push(Recommendation {
            category: "API".to_string(),
            priority: RiskLevel::High,
            text: "Controllers are in the blast radius; exercise the affected endpoints \
                   including error responses"
                .to_string(),
            suggested_test_types: vec!["api".to_string(), "integration".to_string()],
        });
    }
    if has_repository {
        recs.push(Recommendation {
            category: "Data".to_string(),
            priority: RiskLevel::High,
            text: "Repositories are in the blast radius; verify queries and persistence \
                   against a real database"
                .to_string(),
            suggested_test_types: vec!["integration".to_string(), "unit".to_string()],
        });
    }
    if has_service {
        recs.push(Recommendation {
            category: "Business Logic".to_string(),
            priority: RiskLevel::Medium,
            text: "Services are in the blast radius; cover the changed business rules \
                   and their edge cases"
                .to_string(),
            suggested_test_types: vec!["unit".to_string(), "integration".to_string()],
        });
    }

    if overall_level == RiskLevel::Critical {
        recs.push(Recommendation {
            category: "Regression".to_string(),
            priority: RiskLevel::Critical,
            text: "Overall risk is critical; run the full regression suite before release"
                .to_string(),
            suggested_test_types: vec![
                "unit".to_string(),
                "integration".to_string(),
                "api".to_string(),
                "e2e".to_string(),
            ],
        });
    }

    // Stable sort keeps insertion order within a priority band
    recs.sort_by(|a, b| b.priority.cmp(&a.priority));
    recs
}

fn integration_test_types(integration_type: IntegrationType) -> Vec<String> {
    let types: &[&str] = match integration_type {
        IntegrationType::EhrIntegration => &["integration", "e2e"],
        IntegrationType::Financial | IntegrationType::PaymentGateway => {
            &["integration", "e2e", "unit"]
        }
        IntegrationType::ExternalApi => &["integration", "api"],
        IntegrationType::Database => &["integration", "unit"],
        IntegrationType::Messaging => &["integration"],
        IntegrationType::InternalService => &["integration", "api"],
        IntegrationType::Ui => &["e2e"],
    };
    types.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(path: &str) -> AffectedComponent {
        AffectedComponent {
            path: path.to_string(),
            archetype_label: Archetype::classify(path).label().to_string(),
            depth: 1,
            changed_directly: false,
        }
    }

    fn financial_finding() -> IntegrationFinding {
        IntegrationFinding {
            integration_type: IntegrationType::Financial,
            risk_level: RiskLevel::Critical,
            weight: 5,
            example_file: "Services/PaymentService.cs".to_string(),
        }
    }

    #[test]
    fn test_no_impact_no_recommendations() {
        assert!(recommendations(RiskLevel::Low, &[], &[]).is_empty());
    }

    #[test]
    fn test_integration_finding_carries_its_level() {
        let recs = recommendations(RiskLevel::Medium, &[], &[financial_finding()]);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].category, "Integration");
        assert_eq!(recs[0].priority, RiskLevel::Critical);
        assert!(recs[0].text.contains("Services/PaymentService.cs"));
    }

    #[test]
    fn test_layer_recommendations_from_archetypes() {
        let components = vec![
            component("Controllers/PaymentController.cs"),
            component("Services/PaymentService.cs"),
            component("Data/PaymentRepository.cs"),
        ];
        let recs = recommendations(RiskLevel::Medium, &components, &[]);

        let categories: Vec<&str> = recs.iter().map(|r| r.category.as_str()).collect();
        assert!(categories.contains(&"API"));
        assert!(categories.contains(&"Data"));
        assert!(categories.contains(&"Business Logic"));
    }

    #[test]
    fn test_critical_adds_full_regression() {
        let recs = recommendations(RiskLevel::Critical, &[], &[financial_finding()]);
        let regression = recs.iter().find(|r| r.category == "Regression").unwrap();
        assert_eq!(regression.priority, RiskLevel::Critical);
        assert_eq!(regression.suggested_test_types.len(), 4);
    }

    #[test]
    fn test_sorted_highest_priority_first() {
        let components = vec![
            component("Services/BookingService.cs"),
            component("Controllers/BookingController.cs"),
        ];
        let recs = recommendations(RiskLevel::Critical, &components, &[financial_finding()]);

        for pair in recs.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
        assert_eq!(recs[0].priority, RiskLevel::Critical);
    }

    #[test]
    fn test_many_services_yield_one_business_logic_entry() {
        let components = vec![
            component("Services/A.cs"),
            component("Services/B.cs"),
            component("Services/C.cs"),
        ];
        let recs = recommendations(RiskLevel::Low, &components, &[]);
        let business: Vec<_> = recs
            .iter()
            .filter(|r| r.category == "Business Logic")
            .collect();
        assert_eq!(business.len(), 1);
    }
}
