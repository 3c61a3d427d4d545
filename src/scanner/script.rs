//! General Script Scanner
//!
//! Extracts imports, exported symbols, HTTP-client call shapes, emitted
//! events, and state-store actions from JavaScript/TypeScript-style
//! source text using lexical patterns.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FileInsight, ImportKind, ImportRecord};

use super::traits::{Scanner, specifier_stem};
use super::FileKind;

static RE_IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(.+?)\s+from\s*['"]([^'"]+)['"]"#).expect("valid regex")
});
static RE_IMPORT_SIDE_EFFECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\s*['"]([^'"]+)['"]"#).expect("valid regex"));
static RE_REQUIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex"));
static RE_DYNAMIC_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"import\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex"));
static RE_EXPORT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\s+(\w+)",
    )
    .expect("valid regex")
});
static RE_EXPORT_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s*\{([^}]*)\}").expect("valid regex"));
static RE_HTTP_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:axios|fetch|https?|\$http|api|apiClient|client)\s*\.\s*(get|post|put|delete|patch)\s*\(\s*['"`]([^'"`]+)"#,
    )
    .expect("valid regex")
});
static RE_FETCH_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"fetch\(\s*['"`]([^'"`]+)"#).expect("valid regex"));
static RE_EMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\$?emit\(\s*['"]([^'"]+)['"]"#).expect("valid regex"));
static RE_STORE_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:dispatch|commit)\(\s*['"]([^'"]+)['"]"#).expect("valid regex")
});

pub struct ScriptScanner;

impl ScriptScanner {
    pub fn new() -> Self {
        Self
    }

    fn collect_imports(content: &str, insight: &mut FileInsight) {
        for cap in RE_IMPORT_FROM.captures_iter(content) {
            let clause = cap[1].trim();
            let source = cap[2].to_string();
            insight
                .imports
                .push(parse_import_clause(clause, source));
        }
        for cap in RE_IMPORT_SIDE_EFFECT.captures_iter(content) {
            let source = cap[1].to_string();
            // `import 'x'` without a clause; `import ... from 'x'` was
            // already captured above, skip those
            if insight.imports.iter().any(|i| i.source_module.as_deref() == Some(&source)) {
                continue;
            }
            insight.imports.push(ImportRecord::new(
                specifier_stem(&source).to_string(),
                Some(source),
                ImportKind::Default,
            ));
        }
        for cap in RE_REQUIRE.captures_iter(content) {
            let source = cap[1].to_string();
            insight.imports.push(ImportRecord::new(
                specifier_stem(&source).to_string(),
                Some(source),
                ImportKind::Require,
            ));
        }
        for cap in RE_DYNAMIC_IMPORT.captures_iter(content) {
            let source = cap[1].to_string();
            insight.imports.push(ImportRecord::new(
                specifier_stem(&source).to_string(),
                Some(source),
                ImportKind::Dynamic,
            ));
        }
    }

    fn collect_exports(content: &str, insight: &mut FileInsight) {
        for cap in RE_EXPORT_DECL.captures_iter(content) {
            insight.exports.insert(cap[1].to_string());
        }
        for cap in RE_EXPORT_LIST.captures_iter(content) {
            for name in cap[1].split(',') {
                // `export { foo as bar }` exports `bar`
                let name = name.split_whitespace().last().unwrap_or("");
                if !name.is_empty() {
                    insight.exports.insert(name.to_string());
                }
            }
        }
    }

    fn collect_calls(content: &str, insight: &mut FileInsight) {
        for cap in RE_HTTP_CALL.captures_iter(content) {
            let method = cap[1].to_uppercase();
            insight.api_calls.insert(format!("{} {}", method, &cap[2]));
        }
        for cap in RE_FETCH_CALL.captures_iter(content) {
            insight.api_calls.insert(format!("GET {}", &cap[1]));
        }
        for cap in RE_EMIT.captures_iter(content) {
            insight.events.insert(cap[1].to_string());
        }
        for cap in RE_STORE_ACTION.captures_iter(content) {
            insight.store_actions.insert(cap[1].to_string());
        }
    }
}

impl Default for ScriptScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for ScriptScanner {
    fn scan(&self, _path: &str, content: &str) -> FileInsight {
        let mut insight = FileInsight::default();
        Self::collect_imports(content, &mut insight);
        Self::collect_exports(content, &mut insight);
        Self::collect_calls(content, &mut insight);

        insight.archetype = if !insight.api_calls.is_empty() {
            "API client module".to_string()
        } else if !insight.store_actions.is_empty() {
            "state-store module".to_string()
        } else {
            "script module".to_string()
        };
        if !insight.api_calls.is_empty() {
            insight.tags.push("calls APIs".to_string());
        }
        if !insight.events.is_empty() {
            insight.tags.push("emits events".to_string());
        }
        if !insight.store_actions.is_empty() {
            insight.tags.push("uses state store".to_string());
        }
        insight
    }

    fn kind(&self) -> FileKind {
        FileKind::Script
    }
}

/// Split an `import <clause> from '...'` clause into its bound names
fn parse_import_clause(clause: &str, source: String) -> ImportRecord {
    if let Some(rest) = clause.strip_prefix("* as ") {
        return ImportRecord::new(rest.trim().to_string(), Some(source), ImportKind::Namespace);
    }
    if clause.starts_with('{') {
        let first = clause
            .trim_matches(['{', '}'])
            .split(',')
            .next()
            .map(|n| n.split_whitespace().last().unwrap_or("").to_string())
            .unwrap_or_default();
        return ImportRecord::new(first, Some(source), ImportKind::Named);
    }
    // `Default` or `Default, { named }`; the default binding names the import
    let default_name = clause.split(',').next().unwrap_or(clause).trim();
    ImportRecord::new(default_name.to_string(), Some(source), ImportKind::Default)
}
