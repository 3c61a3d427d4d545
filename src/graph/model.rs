//! Dependency Graph Structure
//!
//! Two mappings keyed by file path: outbound edges (`dependencies`) and
//! their mirror (`dependents`). Edges recorded through [`DependencyGraph::add_edge`]
//! are always mutual; convention-inferred reverse edges are layered on top
//! at query time by the builder and never stored here.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// A path reached by a bounded transitive walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached {
    pub path: String,
    pub depth: usize,
}

/// Bidirectional file dependency graph
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    dependencies: HashMap<String, BTreeSet<String>>,
    dependents: HashMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `from` depending on `to`, mirroring the reverse edge
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.dependencies
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.dependents
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
    }

    /// Ensure a node exists even when it contributes no edges
    pub fn add_node(&mut self, path: &str) {
        self.dependencies.entry(path.to_string()).or_default();
    }

    /// Outbound dependencies recorded for a path
    pub fn dependencies_of(&self, path: &str) -> BTreeSet<String> {
        self.dependencies.get(path).cloned().unwrap_or_default()
    }

    /// Persisted (scan-derived) dependents of a path
    pub fn dependents_of(&self, path: &str) -> BTreeSet<String> {
        self.dependents.get(path).cloned().unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        let mut nodes: HashSet<&String> = self.dependencies.keys().collect();
        nodes.extend(self.dependents.keys());
        nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(|s| s.len()).sum()
    }

    /// Breadth-first walk over outbound edges, bounded by `max_depth`,
    /// excluding the origin. Each path is visited at most once, at its
    /// shallowest depth.
    pub fn transitive_dependencies(&self, origin: &str, max_depth: usize) -> Vec<Reached> {
        bfs(origin, max_depth, |p| self.dependencies_of(p))
    }

    /// Breadth-first walk over persisted inbound edges
    pub fn transitive_dependents(&self, origin: &str, max_depth: usize) -> Vec<Reached> {
        bfs(origin, max_depth, |p| self.dependents_of(p))
    }
}

/// Visited-set BFS shared by both traversal directions. `neighbors` may
/// layer inferred edges over the persisted maps.
pub fn bfs<F>(origin: &str, max_depth: usize, neighbors: F) -> Vec<Reached>
where
    F: Fn(&str) -> BTreeSet<String>,
{
    let mut reached = Vec::new();
    let mut visited: HashSet<String> = HashSet::from([origin.to_string()]);
    let mut frontier: VecDeque<(String, usize)> = VecDeque::from([(origin.to_string(), 0)]);

    while let Some((path, depth)) = frontier.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for next in neighbors(&path) {
            if visited.insert(next.clone()) {
                reached.push(Reached {
                    path: next.clone(),
                    depth: depth + 1,
                });
                frontier.push_back((next, depth + 1));
            }
        }
    }

    reached
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> DependencyGraph {
        // a -> b -> c -> d
        let mut g = DependencyGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "c");
        g.add_edge("c", "d");
        g
    }

    #[test]
    fn test_edges_are_mutual() {
        let g = chain();
        assert!(g.dependencies_of("a").contains("b"));
        assert!(g.dependents_of("b").contains("a"));
    }

    #[test]
    fn test_self_edges_ignored() {
        let mut g = DependencyGraph::new();
        g.add_edge("a", "a");
        assert!(g.dependencies_of("a").is_empty());
    }

    #[test]
    fn test_transitive_dependencies_bounded() {
        let g = chain();
        let reached = g.transitive_dependencies("a", 2);
        let paths: Vec<&str> = reached.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["b", "c"]);
        assert_eq!(reached[0].depth, 1);
        assert_eq!(reached[1].depth, 2);
    }

    #[test]
    fn test_transitive_dependents_excludes_origin() {
        let g = chain();
        let reached = g.transitive_dependents("d", 10);
        let paths: Vec<&str> = reached.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_bfs_terminates_on_cycles() {
        let mut g = DependencyGraph::new();
        g.add_edge("a", "b");
        g.add_edge("b", "a");
        let reached = g.transitive_dependencies("a", 10);
        assert_eq!(reached.len(), 1);
        assert_eq!(reached[0].path, "b");
    }

    #[test]
    fn test_bfs_records_shallowest_depth() {
        // a -> b, a -> c, b -> c: c must be recorded at depth 1
        let mut g = DependencyGraph::new();
        g.add_edge("a", "b");
        g.add_edge("a", "c");
        g.add_edge("b", "c");
        let reached = g.transitive_dependencies("a", 5);
        let c = reached.iter().find(|r| r.path == "c").unwrap();
        assert_eq!(c.depth, 1);
    }

    #[test]
    fn test_counts() {
        let g = chain();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.node_count(), 4);
    }
}
