//! Class-Oriented Source Scanner
//!
//! Handles class-per-file languages (`.cs`, `.java`, `.kt`): declared
//! imports, the class name with its inherited/implemented names, and
//! HTTP-route attributes mapped to `"METHOD path"` strings.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{FileInsight, ImportKind, ImportRecord};

use super::traits::Scanner;
use super::FileKind;

static RE_USING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*using\s+(?:static\s+)?([\w.]+)\s*;").expect("valid regex"));
static RE_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(?:static\s+)?([\w.]+)\s*;?\s*$").expect("valid regex")
});
static RE_CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bclass\s+(\w+)(?:\s*(?::|extends|implements)\s*([\w\s,<>.]+?))?\s*\{")
        .expect("valid regex")
});
static RE_ROUTE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[Http(Get|Post|Put|Delete|Patch)(?:\(\s*"([^"]*)"\s*\))?\]"#)
        .expect("valid regex")
});
static RE_MAPPING_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@(Get|Post|Put|Delete|Patch)Mapping(?:\(\s*(?:value\s*=\s*)?"([^"]*)"\s*\))?"#)
        .expect("valid regex")
});

pub struct ClassScanner;

impl ClassScanner {
    pub fn new() -> Self {
        Self
    }

    fn collect_imports(content: &str, insight: &mut FileInsight) {
        for cap in RE_USING.captures_iter(content).chain(RE_IMPORT.captures_iter(content)) {
            let namespace = cap[1].to_string();
            let name = namespace
                .rsplit('.')
                .next()
                .unwrap_or(&namespace)
                .to_string();
            insight.imports.push(ImportRecord::new(
                name,
                Some(namespace),
                ImportKind::Declaration,
            ));
        }
    }

    fn collect_class(content: &str, insight: &mut FileInsight) {
        for cap in RE_CLASS_DECL.captures_iter(content) {
            insight.exports.insert(cap[1].to_string());
            if let Some(bases) = cap.get(2) {
                for base in bases.as_str().split(',') {
                    // `extends Foo implements Bar` inside one clause
                    for word in base.split_whitespace() {
                        if word == "extends" || word == "implements" {
                            continue;
                        }
                        let name = word.split('<').next().unwrap_or(word).trim();
                        if !name.is_empty() {
                            insight.exports.insert(name.to_string());
                        }
                    }
                }
            }
        }
    }

    fn collect_routes(content: &str, insight: &mut FileInsight) {
        for cap in RE_ROUTE_ATTRIBUTE
            .captures_iter(content)
            .chain(RE_MAPPING_ANNOTATION.captures_iter(content))
        {
            let method = cap[1].to_uppercase();
            let path = cap.get(2).map(|m| m.as_str()).unwrap_or("");
            let route = if path.is_empty() {
                method
            } else {
                format!("{} {}", method, path)
            };
            insight.api_calls.insert(route);
        }
    }
}

impl Default for ClassScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner for ClassScanner {
    fn scan(&self, path: &str, content: &str) -> FileInsight {
        let mut insight = FileInsight::default();
        Self::collect_imports(content, &mut insight);
        Self::collect_class(content, &mut insight);
        Self::collect_routes(content, &mut insight);

        let name_lower = path.to_lowercase();
        insight.archetype = if !insight.api_calls.is_empty() {
            "API controller".to_string()
        } else if name_lower.contains("repository") {
            "data repository".to_string()
        } else if name_lower.contains("service") {
            "service class".to_string()
        } else {
            "class".to_string()
        };
        if !insight.api_calls.is_empty() {
            insight.tags.push("exposes HTTP routes".to_string());
        }
        insight
    }

    fn kind(&self) -> FileKind {
        FileKind::ClassFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSHARP_SAMPLE: &str = r#"
using System;
using HealthApp.Services;
using static HealthApp.Shared.Constants;

namespace HealthApp.Controllers
{
    public class PaymentController : ControllerBase, IPaymentHandler
    {
        [HttpGet("api/payments")]
        public IActionResult List() { return Ok(); }

        [HttpPost("api/payments/charge")]
        public IActionResult Charge() { return Ok(); }

        [HttpDelete]
        public IActionResult Purge() { return Ok(); }
    }
}
"#;

    const JAVA_SAMPLE: &str = r#"
import com.healthapp.billing.InvoiceService;
import static org.junit.Assert.assertTrue;

public class InvoiceController extends BaseController {
    @GetMapping("/invoices")
    public List<Invoice> list() { return null; }

    @PostMapping(value = "/invoices")
    public Invoice create() { return null; }
}
"#;

    #[test]
    fn test_csharp_usings() {
        let insight = ClassScanner::new().scan("Controllers/PaymentController.cs", CSHARP_SAMPLE);

        let sources: Vec<_> = insight.import_sources().collect();
        assert!(sources.contains(&"System"));
        assert!(sources.contains(&"HealthApp.Services"));
        assert!(sources.contains(&"HealthApp.Shared.Constants"));
        assert!(insight
            .imports
            .iter()
            .all(|i| i.kind == ImportKind::Declaration));
    }

    #[test]
    fn test_csharp_class_and_bases() {
        let insight = ClassScanner::new().scan("Controllers/PaymentController.cs", CSHARP_SAMPLE);
        assert!(insight.exports.contains("PaymentController"));
        assert!(insight.exports.contains("ControllerBase"));
        assert!(insight.exports.contains("IPaymentHandler"));
    }

    #[test]
    fn test_csharp_routes() {
        let insight = ClassScanner::new().scan("Controllers/PaymentController.cs", CSHARP_SAMPLE);
        assert!(insight.api_calls.contains("GET api/payments"));
        assert!(insight.api_calls.contains("POST api/payments/charge"));
        // Attribute without a path records the bare method
        assert!(insight.api_calls.contains("DELETE"));
        assert_eq!(insight.archetype, "API controller");
    }

    #[test]
    fn test_java_imports_and_mappings() {
        let insight = ClassScanner::new().scan("InvoiceController.java", JAVA_SAMPLE);

        assert!(insight
            .import_sources()
            .any(|s| s == "com.healthapp.billing.InvoiceService"));
        assert!(insight.exports.contains("InvoiceController"));
        assert!(insight.exports.contains("BaseController"));
        assert!(insight.api_calls.contains("GET /invoices"));
        assert!(insight.api_calls.contains("POST /invoices"));
    }

    #[test]
    fn test_service_archetype_from_path() {
        let insight = ClassScanner::new().scan(
            "Services/PaymentService.cs",
            "using System;\npublic class PaymentService {\n}",
        );
        assert_eq!(insight.archetype, "service class");
    }
}
