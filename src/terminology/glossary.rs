/*!
 * Glossary normalization and grouping.
 *
 * Raw glossary lines come from a hand-maintained, tab-delimited text file:
 *
 * ```text
 * source_term<TAB>target_term
 * ```
 *
 * A source term with several acceptable renderings is entered on several
 * lines. Normalization runs four steps in order:
 * - `clean`: trim whitespace and strip leading marker characters
 * - `validate_format`: keep lines with exactly two tab-separated fields
 * - `deduplicate`: drop repeated lines, first occurrence wins
 * - `group`: fold lines into source term → ordered target terms
 *
 * None of these steps fail. Malformed lines are noise, not errors.
 */

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Marker characters stripped from the start of glossary lines by default
pub const DEFAULT_MARKER_CHARS: &str = "*";

/// Options controlling glossary normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlossaryOptions {
    /// Lowercase both fields before deduplication and grouping
    #[serde(default)]
    pub fold_case: bool,

    /// Characters stripped from the start of each line
    #[serde(default = "default_marker_chars")]
    pub marker_chars: String,
}

fn default_marker_chars() -> String {
    DEFAULT_MARKER_CHARS.to_string()
}

impl Default for GlossaryOptions {
    fn default() -> Self {
        Self {
            fold_case: false,
            marker_chars: default_marker_chars(),
        }
    }
}

/// A source term together with its approved renderings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    /// Original-language phrase
    pub source_term: String,

    /// Approved target-language renderings, in insertion order
    pub target_terms: Vec<String>,
}

/// Immutable mapping from source term to approved target terms.
///
/// Iteration follows the order in which source terms first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Glossary {
    terms: IndexMap<String, Vec<String>>,
}

impl Glossary {
    /// Create an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a glossary from raw lines using the given options.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], options: &GlossaryOptions) -> Self {
        normalize(lines, options)
    }

    /// Add one source/target pair.
    ///
    /// Empty fields are ignored and a target already listed for the source
    /// term is not added twice.
    pub fn insert(&mut self, source_term: &str, target_term: &str) {
        let source_term = source_term.trim();
        let target_term = target_term.trim();
        if source_term.is_empty() || target_term.is_empty() {
            return;
        }

        let targets = self.terms.entry(source_term.to_string()).or_default();
        if !targets.iter().any(|t| t == target_term) {
            targets.push(target_term.to_string());
        }
    }

    /// Approved target terms for a source term.
    pub fn get(&self, source_term: &str) -> Option<&[String]> {
        self.terms.get(source_term).map(Vec::as_slice)
    }

    /// Whether the source term has an entry.
    pub fn contains(&self, source_term: &str) -> bool {
        self.terms.contains_key(source_term)
    }

    /// Number of distinct source terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over (source term, target terms) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.terms.iter().map(|(s, t)| (s.as_str(), t.as_slice()))
    }

    /// Owned entries, in glossary order.
    pub fn entries(&self) -> Vec<GlossaryEntry> {
        self.terms
            .iter()
            .map(|(source_term, target_terms)| GlossaryEntry {
                source_term: source_term.clone(),
                target_terms: target_terms.clone(),
            })
            .collect()
    }

    /// Total number of approved target terms across all entries.
    pub fn target_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }
}

/// Trim each line, then strip the default leading marker characters.
///
/// Line count and order are preserved.
pub fn clean<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    clean_with_markers(lines, DEFAULT_MARKER_CHARS)
}

/// Trim each line, then strip any leading characters found in `markers`.
pub fn clean_with_markers<S: AsRef<str>>(lines: &[S], markers: &str) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.as_ref()
                .trim()
                .trim_start_matches(|c: char| markers.contains(c))
                .to_string()
        })
        .collect()
}

/// Keep only lines made of exactly two tab-delimited fields.
pub fn validate_format<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line.split('\t').count() == 2)
        .map(str::to_string)
        .collect()
}

/// Remove exact duplicate lines, keeping first-occurrence order.
pub fn deduplicate<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Fold `source<TAB>target` lines into a glossary.
///
/// Lines without a tab are skipped, so `group` is safe on unvalidated input.
pub fn group<S: AsRef<str>>(lines: &[S]) -> Glossary {
    let mut glossary = Glossary::new();
    for line in lines {
        if let Some((source_term, target_term)) = line.as_ref().split_once('\t') {
            glossary.insert(source_term, target_term);
        }
    }
    glossary
}

/// Run the whole normalization pipeline over raw glossary lines.
pub fn normalize<S: AsRef<str>>(lines: &[S], options: &GlossaryOptions) -> Glossary {
    let mut cleaned = clean_with_markers(lines, &options.marker_chars);
    if options.fold_case {
        cleaned = cleaned.into_iter().map(|line| line.to_lowercase()).collect();
    }

    let formatted = validate_format(&cleaned);
    let unique = deduplicate(&formatted);
    group(&unique)
}
