//! Fuzzy Path Resolution
//!
//! Maps a nominally-named changed file (renamed, relocated, case-drifted,
//! or mistyped) onto a real file in the target application. Strategies are
//! tried in strict order and the first success wins:
//!
//! 1. Exact match
//! 2. Case-insensitive match
//! 3. Filename-only match (unique)
//! 4. Filename case-insensitive match (unique)
//! 5. Partial-path suffix match (2..=4 trailing segments, unique)
//! 6. Levenshtein edit distance on filenames (minimum, bounded)
//! 7. Not found, with prefix-based suggestions
//!
//! Resolution never fails: an unmatched path comes back as a
//! [`ResolvedFile`] with `exists = false`.

mod distance;

pub use distance::levenshtein;

use std::time::Duration;

use tracing::debug;

use crate::cache::TtlCache;
use crate::constants::resolver::{
    MAX_EDIT_DISTANCE, MAX_SUFFIX_SEGMENTS, MAX_SUGGESTIONS, MIN_SUFFIX_SEGMENTS,
    SUGGESTION_PREFIX_LEN,
};
use crate::types::{
    AppId, MatchStrategy, ResolvedFile, Result, file_name, normalize_separators,
};
use crate::workspace::SharedFileStore;

/// Resolves inexact path strings against an application's file listing.
///
/// Listings come from the file-store capability and are cached per
/// application. Edit-distance ties are broken by file-listing order (the
/// first candidate at the minimum distance wins); `LocalFileStore` listings
/// are sorted, so the tie-break is deterministic.
pub struct FuzzyPathResolver {
    store: SharedFileStore,
    listings: TtlCache<AppId, Vec<String>>,
}

impl FuzzyPathResolver {
    pub fn new(store: SharedFileStore, listing_ttl: Duration) -> Self {
        Self {
            store,
            listings: TtlCache::new(listing_ttl),
        }
    }

    /// Fetch the application's file listing, consulting the cache first
    pub async fn file_listing(&self, app: &AppId) -> Result<Vec<String>> {
        if let Some(listing) = self.listings.get(app) {
            debug!(app = %app, "file listing cache hit");
            return Ok(listing);
        }
        let listing = self.store.list_files(app).await?;
        self.listings.insert(app.clone(), listing.clone());
        Ok(listing)
    }

    /// Resolve one requested path against the application's file set
    pub async fn resolve(&self, app: &AppId, requested: &str) -> Result<ResolvedFile> {
        let listing = self.file_listing(app).await?;
        Ok(self.resolve_against(requested, &listing))
    }

    /// Run the strategy cascade against an already-fetched listing
    pub fn resolve_against(&self, requested: &str, listing: &[String]) -> ResolvedFile {
        let normalized = normalize_separators(requested);

        // 1. Exact
        if listing.iter().any(|p| p == &normalized) {
            return ResolvedFile::matched(requested, normalized, MatchStrategy::Exact);
        }

        // 2. Case-insensitive full path
        let lowered = normalized.to_lowercase();
        if let Some(hit) = listing.iter().find(|p| p.to_lowercase() == lowered) {
            return ResolvedFile::matched(requested, hit.clone(), MatchStrategy::CaseInsensitive);
        }

        let requested_name = file_name(&normalized);

        // 3. Filename-only, unique
        if let Some(hit) = unique_match(listing, |p| file_name(p) == requested_name) {
            return ResolvedFile::matched(requested, hit, MatchStrategy::FilenameOnly);
        }

        // 4. Filename case-insensitive, unique
        let requested_name_lower = requested_name.to_lowercase();
        if let Some(hit) = unique_match(listing, |p| {
            file_name(p).to_lowercase() == requested_name_lower
        }) {
            return ResolvedFile::matched(requested, hit, MatchStrategy::FilenameCaseInsensitive);
        }

        // 5. Partial-path suffix, increasing length, first unique length wins
        if let Some(hit) = self.match_path_suffix(&normalized, listing) {
            return ResolvedFile::matched(requested, hit, MatchStrategy::PartialPath);
        }

        // 6. Edit distance on filenames
        if let Some((hit, dist)) = self.match_edit_distance(&requested_name_lower, listing) {
            debug!(requested, resolved = %hit, distance = dist, "edit-distance match");
            let mut resolved = ResolvedFile::matched(requested, hit, MatchStrategy::EditDistance);
            resolved.edit_distance = Some(dist);
            return resolved;
        }

        // 7. Not found
        let suggestions = self.suggestions(&requested_name_lower, listing);
        debug!(requested, suggestions = suggestions.len(), "path not resolved");
        ResolvedFile::not_found(requested, suggestions)
    }

    fn match_path_suffix(&self, normalized: &str, listing: &[String]) -> Option<String> {
        let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

        for len in MIN_SUFFIX_SEGMENTS..=MAX_SUFFIX_SEGMENTS.min(segments.len()) {
            let suffix = segments[segments.len() - len..].join("/");

            if let Some(hit) = unique_match(listing, |p| ends_with_suffix(p, &suffix)) {
                return Some(hit);
            }
            // Case-insensitive fallback at the same suffix length
            let suffix_lower = suffix.to_lowercase();
            if let Some(hit) = unique_match(listing, |p| {
                ends_with_suffix(&p.to_lowercase(), &suffix_lower)
            }) {
                return Some(hit);
            }
        }
        None
    }

    fn match_edit_distance(
        &self,
        requested_name_lower: &str,
        listing: &[String],
    ) -> Option<(String, usize)> {
        let mut best: Option<(&String, usize)> = None;
        for candidate in listing {
            let dist = levenshtein(requested_name_lower, &file_name(candidate).to_lowercase());
            // Strict < keeps the first-encountered candidate on ties
            if best.map(|(_, d)| dist < d).unwrap_or(true) {
                best = Some((candidate, dist));
            }
        }
        best.filter(|&(_, d)| d <= MAX_EDIT_DISTANCE)
            .map(|(p, d)| (p.clone(), d))
    }

    fn suggestions(&self, requested_name_lower: &str, listing: &[String]) -> Vec<String> {
        let prefix: String = requested_name_lower
            .chars()
            .take(SUGGESTION_PREFIX_LEN)
            .collect();
        if prefix.is_empty() {
            return Vec::new();
        }

        listing
            .iter()
            .filter(|candidate| {
                let name = file_name(candidate).to_lowercase();
                name.starts_with(&prefix) || requested_name_lower.starts_with(&prefix_of(&name))
            })
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }
}

/// First `SUGGESTION_PREFIX_LEN` characters of a name
fn prefix_of(name: &str) -> String {
    name.chars().take(SUGGESTION_PREFIX_LEN).collect()
}

/// Path ends with the suffix on a segment boundary
fn ends_with_suffix(path: &str, suffix: &str) -> bool {
    path == suffix || path.ends_with(&format!("/{}", suffix))
}

/// Return the single matching candidate, or None when zero or ambiguous
fn unique_match<F: Fn(&str) -> bool>(listing: &[String], pred: F) -> Option<String> {
    let mut iter = listing.iter().filter(|p| pred(p));
    let first = iter.next()?;
    if iter.next().is_some() {
        return None;
    }
    Some(first.clone())
}
