//! Dependency Graph Builder
//!
//! Builds (and caches per application) the dependency graph and file
//! insights for a set of resolved paths. File scans are independent and
//! fan out concurrently; a single coordinating task owns the graph
//! mappings and merges scan results, so the maps are never mutated from
//! multiple contexts.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::TtlCache;
use crate::scanner::scan_file;
use crate::types::{AppId, FileInsight, ImportRecord, Result};
use crate::workspace::{ReadOutcome, SharedFileStore};

use super::inference::{infer_dependencies, infer_dependents};
use super::model::{DependencyGraph, Reached, bfs};

/// A completed graph build: the persisted mappings plus per-file insights
#[derive(Debug, Default)]
pub struct BuiltGraph {
    pub graph: DependencyGraph,
    pub insights: HashMap<String, FileInsight>,
}

impl BuiltGraph {
    /// Persisted dependents unioned with on-demand convention-inferred
    /// dependents. The inferred edges are never written back into the
    /// graph; `dependencies_of(dependents_of(x))` need not contain `x`.
    pub fn dependents_of(&self, path: &str) -> BTreeSet<String> {
        let mut dependents = self.graph.dependents_of(path);
        for inferred in infer_dependents(path) {
            dependents.insert(inferred);
        }
        dependents
    }

    /// Bounded BFS over the augmented dependents relation
    pub fn transitive_dependents(&self, origin: &str, max_depth: usize) -> Vec<Reached> {
        bfs(origin, max_depth, |p| self.dependents_of(p))
    }

    /// Bounded BFS over the persisted dependencies relation
    pub fn transitive_dependencies(&self, origin: &str, max_depth: usize) -> Vec<Reached> {
        self.graph.transitive_dependencies(origin, max_depth)
    }
}

/// Builds and caches dependency graphs per application
pub struct DependencyGraphBuilder {
    store: SharedFileStore,
    graphs: TtlCache<AppId, Arc<BuiltGraph>>,
}

impl DependencyGraphBuilder {
    pub fn new(store: SharedFileStore, graph_ttl: Duration) -> Self {
        Self {
            store,
            graphs: TtlCache::new(graph_ttl),
        }
    }

    /// Build the graph for the given resolved paths, reusing a live cached
    /// build when one exists. A rebuild replaces the cached state wholesale.
    pub async fn build(&self, app: &AppId, paths: &[String]) -> Result<Arc<BuiltGraph>> {
        if let Some(built) = self.graphs.get(app) {
            debug!(app = %app, "dependency graph cache hit");
            return Ok(built);
        }

        let scans = join_all(paths.iter().map(|path| self.scan_one(app, path))).await;

        // Single-writer merge: only this task touches the mappings.
        let mut built = BuiltGraph::default();
        let mut scanned = 0usize;
        for (path, insight) in scans {
            let insight = match insight {
                Some(insight) => {
                    scanned += 1;
                    insight
                }
                None => {
                    // Unreadable or unmounted: a no-op node with
                    // convention-inferred edges only
                    FileInsight::with_archetype("convention-inferred")
                }
            };

            built.graph.add_node(&path);
            let mut targets: BTreeSet<String> = insight
                .imports
                .iter()
                .filter_map(|record| resolve_import_target(&path, record, paths))
                .collect();
            targets.extend(infer_dependencies(&path));

            for target in targets {
                built.graph.add_edge(&path, &target);
            }
            built.insights.insert(path, insight);
        }

        info!(
            app = %app,
            files = paths.len(),
            scanned,
            edges = built.graph.edge_count(),
            "dependency graph built"
        );

        let built = Arc::new(built);
        self.graphs.insert(app.clone(), built.clone());
        Ok(built)
    }

    /// Drop the cached graph for an application
    pub fn invalidate(&self, app: &AppId) {
        self.graphs.invalidate(app);
    }

    async fn scan_one(&self, app: &AppId, path: &str) -> (String, Option<FileInsight>) {
        match self.store.read_file(app, path).await {
            Ok(ReadOutcome::Content(content)) => {
                (path.to_string(), Some(scan_file(path, &content)))
            }
            Ok(ReadOutcome::Unavailable(reason)) => {
                debug!(path, reason, "content unavailable, using convention inference");
                (path.to_string(), None)
            }
            Err(e) => {
                warn!(path, error = %e, "file store failure, using convention inference");
                (path.to_string(), None)
            }
        }
    }
}

/// Map an import record onto a known file path, if any.
///
/// Relative specifiers are normalized against the importing file's
/// directory and matched extension-insensitively; bare specifiers and
/// specifier-less references (template child components, class imports)
/// are matched by filename stem. Unresolved imports produce no edge.
fn resolve_import_target(
    importer: &str,
    record: &ImportRecord,
    known: &[String],
) -> Option<String> {
    if let Some(source) = record.source_module.as_deref() {
        if source.starts_with("./") || source.starts_with("../") {
            let base = match importer.rsplit_once('/') {
                Some((dir, _)) => dir,
                None => "",
            };
            let resolved = normalize_logical_path(base, source);
            return known
                .iter()
                .find(|k| *k == &resolved || strip_extension(k) == resolved)
                .cloned();
        }
        // Bare specifier: match by stem (covers `HealthApp.Services` and
        // package-relative module names); external packages fall through
        let stem = source.rsplit(['/', '.']).next().unwrap_or(source);
        return find_by_stem(known, stem);
    }
    find_by_stem(known, &record.imported_name)
}

fn find_by_stem(known: &[String], stem: &str) -> Option<String> {
    if stem.is_empty() {
        return None;
    }
    known
        .iter()
        .find(|k| {
            let name = k.rsplit('/').next().unwrap_or(k);
            let file_stem = name.split('.').next().unwrap_or(name);
            file_stem == stem
        })
        .cloned()
}

/// Join and normalize `base` + relative `specifier` without touching the
/// filesystem: `"src/views" + "../services/api"` → `"src/services/api"`
fn normalize_logical_path(base: &str, specifier: &str) -> String {
    let mut stack: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }
    stack.join("/")
}

fn strip_extension(path: &str) -> &str {
    match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportKind;
    use crate::workspace::MemoryFileStore;

    fn record(name: &str, source: Option<&str>) -> ImportRecord {
        ImportRecord::new(name, source.map(String::from), ImportKind::Named)
    }

    #[test]
    fn test_normalize_logical_path() {
        assert_eq!(
            normalize_logical_path("src/views", "../services/api"),
            "src/services/api"
        );
        assert_eq!(normalize_logical_path("", "./a/b"), "a/b");
        assert_eq!(normalize_logical_path("src", "./client.ts"), "src/client.ts");
    }

    #[test]
    fn test_resolve_relative_import_extension_insensitive() {
        let known = vec![
            "src/services/booking.service.ts".to_string(),
            "src/views/Booking.vue".to_string(),
        ];
        let target = resolve_import_target(
            "src/views/Booking.vue",
            &record("BookingService", Some("../services/booking.service")),
            &known,
        );
        assert_eq!(target.as_deref(), Some("src/services/booking.service.ts"));
    }

    #[test]
    fn test_resolve_bare_name_by_stem() {
        let known = vec!["src/components/PatientCard.vue".to_string()];
        let target = resolve_import_target(
            "src/views/Booking.vue",
            &record("PatientCard", None),
            &known,
        );
        assert_eq!(target.as_deref(), Some("src/components/PatientCard.vue"));
    }

    #[test]
    fn test_external_package_produces_no_edge() {
        let known = vec!["src/views/Booking.vue".to_string()];
        let target = resolve_import_target(
            "src/views/Booking.vue",
            &record("axios", Some("axios")),
            &known,
        );
        assert_eq!(target, None);
    }

    #[tokio::test]
    async fn test_build_links_component_to_service() {
        let store = MemoryFileStore::new()
            .with_file(
                "app",
                "src/views/Booking.vue",
                r#"<script>import { BookingService } from '../services/booking.service';</script>"#,
            )
            .with_file("app", "src/services/booking.service.ts", "export class BookingService {}");
        let builder =
            DependencyGraphBuilder::new(Arc::new(store), Duration::from_secs(300));
        let app = AppId::new("app");
        let paths = vec![
            "src/views/Booking.vue".to_string(),
            "src/services/booking.service.ts".to_string(),
        ];

        let built = builder.build(&app, &paths).await.unwrap();
        assert!(built
            .graph
            .dependencies_of("src/views/Booking.vue")
            .contains("src/services/booking.service.ts"));
        assert!(built
            .graph
            .dependents_of("src/services/booking.service.ts")
            .contains("src/views/Booking.vue"));
        assert!(built.insights.contains_key("src/views/Booking.vue"));
    }

    #[tokio::test]
    async fn test_unreadable_file_gets_convention_edges_only() {
        let store =
            MemoryFileStore::new().with_unreadable("app", "Controllers/PaymentController.cs");
        let builder = DependencyGraphBuilder::new(Arc::new(store), Duration::from_secs(300));
        let app = AppId::new("app");
        let paths = vec!["Controllers/PaymentController.cs".to_string()];

        let built = builder.build(&app, &paths).await.unwrap();
        assert!(built
            .graph
            .dependencies_of("Controllers/PaymentController.cs")
            .contains("Services/PaymentService.cs"));
        assert_eq!(
            built.insights["Controllers/PaymentController.cs"].archetype,
            "convention-inferred"
        );
    }

    #[tokio::test]
    async fn test_inferred_dependents_not_persisted() {
        let store = MemoryFileStore::new().with_file(
            "app",
            "Services/PaymentService.cs",
            "using System;\npublic class PaymentService {\n}",
        );
        let builder = DependencyGraphBuilder::new(Arc::new(store), Duration::from_secs(300));
        let app = AppId::new("app");
        let paths = vec!["Services/PaymentService.cs".to_string()];

        let built = builder.build(&app, &paths).await.unwrap();

        // Query-time union includes the inferred controller...
        assert!(built
            .dependents_of("Services/PaymentService.cs")
            .contains("Controllers/PaymentController.cs"));
        // ...but the persisted map does not
        assert!(built
            .graph
            .dependents_of("Services/PaymentService.cs")
            .is_empty());
        // and no forward edge was fabricated for the inferred dependent
        assert!(!built
            .graph
            .dependencies_of("Controllers/PaymentController.cs")
            .contains("Services/PaymentService.cs"));
    }

    #[tokio::test]
    async fn test_cached_build_reused() {
        let store = MemoryFileStore::new().with_file("app", "a.ts", "export const a = 1;");
        let builder = DependencyGraphBuilder::new(Arc::new(store), Duration::from_secs(300));
        let app = AppId::new("app");
        let paths = vec!["a.ts".to_string()];

        let first = builder.build(&app, &paths).await.unwrap();
        let second = builder.build(&app, &paths).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_transitive_dependents_use_inference_per_hop() {
        // Changed repository -> inferred service dependent -> inferred
        // controller dependent, two hops of pure convention
        let store = MemoryFileStore::new().with_unreadable("app", "Data/PatientRepository.cs");
        let builder = DependencyGraphBuilder::new(Arc::new(store), Duration::from_secs(300));
        let app = AppId::new("app");
        let built = builder
            .build(&app, &["Data/PatientRepository.cs".to_string()])
            .await
            .unwrap();

        let reached = built.transitive_dependents("Data/PatientRepository.cs", 2);
        let paths: Vec<&str> = reached.iter().map(|r| r.path.as_str()).collect();
        assert!(paths.contains(&"Data/PatientService.cs"));
        assert!(paths.contains(&"Data/PatientController.cs"));
    }
}
