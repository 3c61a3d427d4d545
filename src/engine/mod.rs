//! Blast-Radius Analysis Engine
//!
//! Orchestrates one analysis end to end: resolve the requested paths,
//! build (or reuse) the dependency graph, propagate impact outward by
//! bounded BFS, classify what was reached, score the risk, and emit
//! testing recommendations.
//!
//! ## Modules
//!
//! - [`classify`]: archetypes, integration detection, test detection
//! - [`risk`]: additive capped scoring and level banding
//! - [`recommend`]: testing guidance derived from the classified impact

mod classify;
mod recommend;
mod risk;

pub use classify::{Archetype, detect_integrations, detect_tests};
pub use recommend::recommendations;
pub use risk::assess;

use std::collections::{HashSet, VecDeque};

use chrono::Utc;
use tracing::{info, warn};

use crate::config::{AnalysisConfig, Config, RiskConfig};
use crate::graph::DependencyGraphBuilder;
use crate::resolver::FuzzyPathResolver;
use crate::types::{
    AffectedComponent, AnalyzeRequest, AppId, BlastRadiusReport, ImpactSummary, ResolvedFile,
    Result,
};
use crate::workspace::SharedFileStore;

/// The analysis pipeline, holding the shared resolver and graph caches
pub struct BlastRadiusEngine {
    resolver: FuzzyPathResolver,
    builder: DependencyGraphBuilder,
    analysis: AnalysisConfig,
    risk: RiskConfig,
}

impl BlastRadiusEngine {
    pub fn new(store: SharedFileStore, config: &Config) -> Self {
        Self {
            resolver: FuzzyPathResolver::new(store.clone(), config.cache.file_list_ttl()),
            builder: DependencyGraphBuilder::new(store, config.cache.graph_ttl()),
            analysis: config.analysis.clone(),
            risk: config.risk.clone(),
        }
    }

    /// Run one full analysis for the request
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<BlastRadiusReport> {
        let app = AppId::new(&request.application_id);
        let depth = self.analysis.effective_depth(request.depth);

        if request.changed_files.is_empty() {
            info!(app = %app, "empty change set, trivial report");
            return Ok(self.empty_report(&request.application_id));
        }

        // Listing capability down: take the requested paths verbatim and
        // let convention inference carry the analysis
        let listing = match self.resolver.file_listing(&app).await {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!(app = %app, error = %e, "file listing unavailable, degrading");
                None
            }
        };

        let changed_files: Vec<ResolvedFile> = match &listing {
            Some(listing) => request
                .changed_files
                .iter()
                .map(|path| self.resolver.resolve_against(path, listing))
                .collect(),
            None => request
                .changed_files
                .iter()
                .map(|path| {
                    ResolvedFile::matched(
                        path,
                        crate::types::normalize_separators(path),
                        crate::types::MatchStrategy::Exact,
                    )
                })
                .collect(),
        };

        // Seeds: resolved existing paths, deduplicated in request order
        let mut seen = HashSet::new();
        let seeds: Vec<String> = changed_files
            .iter()
            .filter(|f| f.exists)
            .map(|f| f.resolved_path.clone())
            .filter(|p| seen.insert(p.clone()))
            .collect();

        // The graph spans the whole application so that dependents of the
        // changed files are reachable
        let graph_paths = listing.unwrap_or_else(|| seeds.clone());
        let built = self.builder.build(&app, &graph_paths).await?;

        let components = propagate(&seeds, depth, |path| {
            built.dependents_of(path).into_iter().collect()
        });

        let integrations = detect_integrations(&components);
        let tests = detect_tests(&components);
        let assessment = assess(&self.risk, &components, &integrations, &tests);
        let recommendations = recommendations(assessment.level, &components, &integrations);

        let file_insights = seeds
            .iter()
            .filter_map(|path| {
                built
                    .insights
                    .get(path)
                    .map(|insight| (path.clone(), insight.clone()))
            })
            .collect();

        let impact = ImpactSummary {
            affected_components: components.iter().map(|c| c.path.clone()).collect(),
            affected_tests: tests.iter().map(|t| t.path.clone()).collect(),
            affected_integrations: integrations.iter().map(|f| f.integration_type).collect(),
            direct_dependency_count: components.iter().filter(|c| c.depth == 1).count(),
            transitive_dependency_count: components.iter().filter(|c| c.depth >= 2).count(),
        };

        info!(
            app = %app,
            changed = request.changed_files.len(),
            affected = impact.affected_components.len(),
            score = assessment.score,
            level = %assessment.level,
            "analysis complete"
        );

        Ok(BlastRadiusReport {
            application_id: request.application_id.clone(),
            risk: assessment,
            changed_files,
            impact,
            file_insights,
            recommendations,
            generated_at: Utc::now(),
        })
    }

    /// Drop cached state for an application, forcing a fresh listing and
    /// graph build on the next analysis
    pub fn invalidate(&self, app: &AppId) {
        self.builder.invalidate(app);
    }

    fn empty_report(&self, application_id: &str) -> BlastRadiusReport {
        BlastRadiusReport {
            application_id: application_id.to_string(),
            risk: assess(&self.risk, &[], &[], &[]),
            changed_files: Vec::new(),
            impact: ImpactSummary::default(),
            file_insights: Default::default(),
            recommendations: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

/// Multi-seed bounded BFS over the dependents relation. Seeds come back
/// first at depth 0 with `changed_directly` set; every other node appears
/// once at its shallowest depth.
fn propagate<F>(seeds: &[String], max_depth: usize, dependents: F) -> Vec<AffectedComponent>
where
    F: Fn(&str) -> Vec<String>,
{
    let mut reached = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();

    for seed in seeds {
        if visited.insert(seed.clone()) {
            reached.push(component(seed, 0, true));
            queue.push_back((seed.clone(), 0));
        }
    }

    while let Some((path, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for dependent in dependents(&path) {
            if visited.insert(dependent.clone()) {
                reached.push(component(&dependent, depth + 1, false));
                queue.push_back((dependent, depth + 1));
            }
        }
    }

    reached
}

fn component(path: &str, depth: usize, changed_directly: bool) -> AffectedComponent {
    AffectedComponent {
        path: path.to_string(),
        archetype_label: Archetype::classify(path).label().to_string(),
        depth,
        changed_directly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntegrationType, MatchStrategy, RiskLevel};
    use crate::workspace::MemoryFileStore;
    use std::sync::Arc;

    fn engine_with(store: MemoryFileStore) -> BlastRadiusEngine {
        BlastRadiusEngine::new(Arc::new(store), &Config::default())
    }

    fn request(app: &str, files: &[&str], depth: Option<usize>) -> AnalyzeRequest {
        AnalyzeRequest {
            application_id: app.to_string(),
            changed_files: files.iter().map(|s| s.to_string()).collect(),
            depth,
        }
    }

    #[tokio::test]
    async fn test_empty_change_set_scores_zero() {
        let engine = engine_with(MemoryFileStore::new());
        let report = engine.analyze(&request("app", &[], None)).await.unwrap();

        assert_eq!(report.risk.score, 0);
        assert_eq!(report.risk.level, RiskLevel::Low);
        assert!(report.changed_files.is_empty());
        assert!(report.impact.affected_components.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_payment_service_scenario() {
        let store = MemoryFileStore::new().with_file(
            "clinic",
            "Services/PaymentService.cs",
            "using System;\npublic class PaymentService {\n}",
        );
        let engine = engine_with(store);
        let report = engine
            .analyze(&request("clinic", &["Services/PaymentService.cs"], None))
            .await
            .unwrap();

        // Convention inference pulls in the controller at depth 1
        assert!(report
            .impact
            .affected_components
            .contains(&"Controllers/PaymentController.cs".to_string()));
        assert_eq!(report.impact.direct_dependency_count, 1);
        assert_eq!(report.impact.transitive_dependency_count, 0);

        // "payment" in the path marks the financial integration
        assert!(report
            .impact
            .affected_integrations
            .contains(&IntegrationType::Financial));

        // 2 components * 5 + weight 5 * 10 (capped to 50) = 60
        assert_eq!(report.risk.score, 60);
        assert_eq!(report.risk.level, RiskLevel::High);

        let categories: Vec<&str> = report
            .recommendations
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert!(categories.contains(&"Integration"));
        assert!(categories.contains(&"API"));
        assert!(categories.contains(&"Business Logic"));

        assert!(report
            .file_insights
            .contains_key("Services/PaymentService.cs"));
    }

    #[tokio::test]
    async fn test_depth_bounds_propagation() {
        let store = MemoryFileStore::new()
            .with_file("app", "a.ts", "import { B } from './b';")
            .with_file("app", "b.ts", "import { C } from './c';")
            .with_file("app", "c.ts", "export const C = 1;");
        let engine = engine_with(store);

        let shallow = engine
            .analyze(&request("app", &["c.ts"], Some(1)))
            .await
            .unwrap();
        assert!(shallow.impact.affected_components.contains(&"b.ts".to_string()));
        assert!(!shallow.impact.affected_components.contains(&"a.ts".to_string()));

        engine.invalidate(&AppId::new("app"));
        let deep = engine
            .analyze(&request("app", &["c.ts"], Some(2)))
            .await
            .unwrap();
        assert!(deep.impact.affected_components.contains(&"a.ts".to_string()));
        assert_eq!(deep.impact.direct_dependency_count, 1);
        assert_eq!(deep.impact.transitive_dependency_count, 1);
    }

    #[tokio::test]
    async fn test_unmatched_path_retained_but_not_propagated() {
        let store =
            MemoryFileStore::new().with_file("app", "src/util.ts", "export const x = 1;");
        let engine = engine_with(store);
        let report = engine
            .analyze(&request(
                "app",
                &["src/util.ts", "completely/unknown/Zzzzzzzzzzzzzz.xyz"],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(report.changed_files.len(), 2);
        assert!(report.changed_files[0].exists);
        assert!(!report.changed_files[1].exists);
        assert_eq!(
            report.changed_files[1].match_strategy,
            MatchStrategy::NotFound
        );
        // Only the real file seeds propagation
        assert_eq!(
            report.impact.affected_components,
            vec!["src/util.ts".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fuzzy_request_resolves_before_propagation() {
        let store = MemoryFileStore::new().with_file(
            "app",
            "Services/BookingService.cs",
            "public class BookingService {}",
        );
        let engine = engine_with(store);
        let report = engine
            .analyze(&request("app", &["services/bookingservice.cs"], None))
            .await
            .unwrap();

        assert_eq!(
            report.changed_files[0].match_strategy,
            MatchStrategy::CaseInsensitive
        );
        // Components carry the canonical resolved path
        assert!(report
            .impact
            .affected_components
            .contains(&"Services/BookingService.cs".to_string()));
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_stable() {
        let store = MemoryFileStore::new().with_file(
            "app",
            "Services/PaymentService.cs",
            "public class PaymentService {}",
        );
        let engine = engine_with(store);
        let req = request("app", &["Services/PaymentService.cs"], None);

        let first = engine.analyze(&req).await.unwrap();
        let second = engine.analyze(&req).await.unwrap();

        assert_eq!(first.risk.score, second.risk.score);
        assert_eq!(
            first.impact.affected_components,
            second.impact.affected_components
        );
        assert_eq!(first.recommendations.len(), second.recommendations.len());
    }

    #[tokio::test]
    async fn test_duplicate_changed_files_seed_once() {
        let store =
            MemoryFileStore::new().with_file("app", "src/util.ts", "export const x = 1;");
        let engine = engine_with(store);
        let report = engine
            .analyze(&request("app", &["src/util.ts", "src/util.ts"], None))
            .await
            .unwrap();

        assert_eq!(report.changed_files.len(), 2);
        assert_eq!(
            report.impact.affected_components,
            vec!["src/util.ts".to_string()]
        );
    }

    #[test]
    fn test_propagate_handles_cycles() {
        let reached = propagate(&["a".to_string()], 10, |p| match p {
            "a" => vec!["b".to_string()],
            "b" => vec!["a".to_string()],
            _ => vec![],
        });
        assert_eq!(reached.len(), 2);
        assert_eq!(reached[1].depth, 1);
    }
}
