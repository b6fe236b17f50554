/*!
 * Segment store for a single checking run.
 *
 * A `Translation` owns every `Segment` of the document in document order.
 * Each segment carries the results written by the checking stages:
 * missing terms (set by the literal stage, only narrowed afterwards) and
 * hyphenation notes (annotations only).
 */

use indexmap::IndexMap;
use serde::Serialize;

/// Source term → approved target terms that were not found.
pub type MissingTerms = IndexMap<String, Vec<String>>;

/// Source term → hyphenated rendering found in the target text.
pub type HyphenatedForms = IndexMap<String, String>;

/// One aligned source/target unit of a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub source_text: String,
    pub target_text: String,

    /// Terms whose approved rendering is absent from the target text
    pub missing_terms: MissingTerms,

    /// Hyphenated renderings found for still-missing terms
    pub hyphenated_forms: HyphenatedForms,
}

impl Segment {
    /// Create a segment with empty results.
    pub fn new(source_text: impl Into<String>, target_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
            missing_terms: MissingTerms::new(),
            hyphenated_forms: HyphenatedForms::new(),
        }
    }

    /// Whether both texts hold something other than whitespace.
    ///
    /// Segments without content are skipped by every checking stage.
    pub fn has_content(&self) -> bool {
        !self.source_text.trim().is_empty() && !self.target_text.trim().is_empty()
    }

    pub fn has_missing_terms(&self) -> bool {
        !self.missing_terms.is_empty()
    }

    /// Drop all results from earlier runs.
    pub fn reset(&mut self) {
        self.missing_terms.clear();
        self.hyphenated_forms.clear();
    }
}

/// Ordered collection of segments making up one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Language code of the source side, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,

    /// Language code of the target side, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,

    pub segments: Vec<Segment>,
}

impl Translation {
    /// Create an empty translation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a translation from plain (source, target) pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            source_language: None,
            target_language: None,
            segments: pairs
                .into_iter()
                .map(|(source, target)| Segment::new(source, target))
                .collect(),
        }
    }

    /// Set the language codes of both sides.
    pub fn with_languages(mut self, source: Option<String>, target: Option<String>) -> Self {
        self.source_language = source;
        self.target_language = target;
        self
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Segment> {
        self.segments.iter_mut()
    }

    /// Whether any segment currently has missing terms.
    pub fn has_missing_terms(&self) -> bool {
        self.segments.iter().any(Segment::has_missing_terms)
    }

    /// Segments with missing terms, paired with their 0-based position.
    pub fn flagged(&self) -> impl Iterator<Item = (usize, &Segment)> {
        self.segments
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.has_missing_terms())
    }

    /// Total number of missing (segment, term) findings.
    pub fn missing_term_count(&self) -> usize {
        self.segments.iter().map(|s| s.missing_terms.len()).sum()
    }

    /// Clear the results of every segment.
    pub fn reset(&mut self) {
        self.segments.iter_mut().for_each(Segment::reset);
    }

    /// Source/target text pairs, in document order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.segments
            .iter()
            .map(|s| (s.source_text.as_str(), s.target_text.as_str()))
            .collect()
    }
}
