//! Lexical File Scanners
//!
//! Lightweight regex-based extraction of structural facts from source
//! files. No syntax tree is built and no symbols are resolved; the
//! scanners trade precision for speed and language-agnosticism.
//!
//! The per-file-type logic is a closed set of variants behind the
//! [`Scanner`] trait, selected by file extension:
//!
//! - [`ComponentScanner`]: single-file components (`.vue`, `.svelte`)
//! - [`ScriptScanner`]: scripts and modules (`.ts`, `.js`, and friends)
//! - [`ClassScanner`]: class-oriented sources (`.cs`, `.java`, `.kt`)
//!
//! Use `scanner_for_path` to pick the variant for a file:
//!
//! ```rust,ignore
//! use blastmap::scanner::scanner_for_path;
//!
//! let scanner = scanner_for_path("src/components/PatientCard.vue");
//! let insight = scanner.scan("src/components/PatientCard.vue", content);
//! ```

mod class_file;
mod component;
mod script;
mod traits;

pub use class_file::ClassScanner;
pub use component::ComponentScanner;
pub use script::ScriptScanner;
pub use traits::Scanner;

use crate::types::FileInsight;

/// Scan strategy chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Single-file UI component with script and template blocks
    Component,
    /// Plain script or module source
    Script,
    /// Class-oriented source with declaration-style imports
    ClassFile,
}

impl FileKind {
    /// Classify by file extension. Unrecognized extensions get the
    /// general script scanner, which degrades to an empty insight on
    /// content it cannot read anything from.
    pub fn from_path(path: &str) -> Self {
        let ext = path
            .rsplit('.')
            .next()
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "vue" | "svelte" => Self::Component,
            "cs" | "java" | "kt" => Self::ClassFile,
            _ => Self::Script,
        }
    }
}

/// Create the scanner variant for the given file path
pub fn scanner_for_path(path: &str) -> Box<dyn Scanner> {
    match FileKind::from_path(path) {
        FileKind::Component => Box::new(ComponentScanner::new()),
        FileKind::Script => Box::new(ScriptScanner::new()),
        FileKind::ClassFile => Box::new(ClassScanner::new()),
    }
}

/// Convenience wrapper: pick a scanner and produce the file's insight
pub fn scan_file(path: &str, content: &str) -> FileInsight {
    scanner_for_path(path).scan(path, content)
}
