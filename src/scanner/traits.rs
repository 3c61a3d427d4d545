//! Scanner Trait and Shared Helpers

use crate::types::FileInsight;

use super::FileKind;

/// A lexical scanner for one family of source files.
///
/// Scanning is pure and total: any content, however malformed, yields a
/// (possibly empty) insight. Errors never propagate from a scan.
pub trait Scanner: Send + Sync {
    fn scan(&self, path: &str, content: &str) -> FileInsight;
    fn kind(&self) -> FileKind;
}

/// Stem of a module specifier or filename: last path segment with the
/// trailing extension stripped. `"../api/client.ts"` → `"client"`,
/// `"PatientCard.vue"` → `"PatientCard"`.
pub(crate) fn specifier_stem(specifier: &str) -> &str {
    let name = specifier.rsplit(['/', '\\']).next().unwrap_or(specifier);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifier_stem() {
        assert_eq!(specifier_stem("./services/payment"), "payment");
        assert_eq!(specifier_stem("../api/client.ts"), "client");
        assert_eq!(specifier_stem("axios"), "axios");
        assert_eq!(specifier_stem("PatientCard.vue"), "PatientCard");
        assert_eq!(specifier_stem(".env"), ".env");
    }
}
