//! Per-File Structural Insights
//!
//! Lightweight facts extracted from a single source file by the lexical
//! scanners. One `FileInsight` is produced per file per graph build and is
//! cached alongside the dependency graph.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How an imported name was brought into scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    /// `import Foo from '...'`
    Default,
    /// `import { foo } from '...'`
    Named,
    /// `import * as foo from '...'`
    Namespace,
    /// `require('...')`
    Require,
    /// `import('...')` at call position
    Dynamic,
    /// `using Foo.Bar;` / `import com.foo.Bar;`
    Declaration,
}

/// A single import extracted from source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    /// Local name bound by the import (or the last path segment for
    /// declaration-style imports)
    pub imported_name: String,
    /// Module specifier the name came from, when the syntax carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_module: Option<String>,
    pub kind: ImportKind,
}

impl ImportRecord {
    pub fn new(name: impl Into<String>, source: Option<String>, kind: ImportKind) -> Self {
        Self {
            imported_name: name.into(),
            source_module: source,
            kind,
        }
    }
}

/// Facts extracted from one file by a scanner.
///
/// Ordered sets keep serialization and test assertions deterministic
/// regardless of regex match order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInsight {
    /// Imports in source order
    pub imports: Vec<ImportRecord>,
    /// Top-level exported symbol names
    pub exports: BTreeSet<String>,
    /// Outbound HTTP-style call targets, e.g. `"GET /api/patients"`
    pub api_calls: BTreeSet<String>,
    /// Emitted or observed event names
    pub events: BTreeSet<String>,
    /// State-store action names (dispatch/commit targets)
    pub store_actions: BTreeSet<String>,
    /// Coarse structural classification, e.g. "UI component"
    pub archetype: String,
    /// Free-text functionality tags
    pub tags: Vec<String>,
}

impl FileInsight {
    pub fn with_archetype(archetype: impl Into<String>) -> Self {
        Self {
            archetype: archetype.into(),
            ..Default::default()
        }
    }

    /// Merge another insight into this one (used when a component file
    /// combines a script block with template-level findings).
    pub fn merge(&mut self, other: FileInsight) {
        self.imports.extend(other.imports);
        self.exports.extend(other.exports);
        self.api_calls.extend(other.api_calls);
        self.events.extend(other.events);
        self.store_actions.extend(other.store_actions);
        for tag in other.tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Module specifiers of all imports that carry one
    pub fn import_sources(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .filter_map(|i| i.source_module.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_deduplicates_tags() {
        let mut a = FileInsight::with_archetype("UI component");
        a.tags.push("emits events".to_string());

        let mut b = FileInsight::default();
        b.tags.push("emits events".to_string());
        b.tags.push("calls APIs".to_string());
        b.events.insert("save".to_string());

        a.merge(b);
        assert_eq!(a.tags, vec!["emits events", "calls APIs"]);
        assert!(a.events.contains("save"));
    }

    #[test]
    fn test_import_sources_skips_bare_names() {
        let mut insight = FileInsight::default();
        insight.imports.push(ImportRecord::new(
            "axios",
            Some("axios".to_string()),
            ImportKind::Default,
        ));
        insight
            .imports
            .push(ImportRecord::new("PatientService", None, ImportKind::Declaration));

        let sources: Vec<&str> = insight.import_sources().collect();
        assert_eq!(sources, vec!["axios"]);
    }
}
