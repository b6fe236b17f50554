/*!
 * Terminology check pipeline.
 *
 * Runs the stages in a fixed order over one translation:
 * literal → morphological → hyphenation. Each stage only narrows or
 * annotates the missing terms found by the literal stage.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::glossary::Glossary;
use super::hyphenation::HyphenationAnnotator;
use super::literal::{LiteralMatcher, MatchPolicy};
use super::morphology::{Lemmatizer, MorphologicalMatcher};
use super::segment::Translation;

/// Which stages run and how the literal stage judges presence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckOptions {
    pub policy: MatchPolicy,
    pub morphology: bool,
    pub hyphenation: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::Presence,
            morphology: true,
            hyphenation: true,
        }
    }
}

/// Counts gathered while checking one translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// Segments in the translation
    pub segments_total: usize,
    /// Segments skipped for lack of source or target text
    pub segments_skipped: usize,
    /// Distinct source terms in the glossary
    pub glossary_entries: usize,
    /// (segment, term) misses found by the literal stage
    pub literal_misses: usize,
    /// Misses cleared by the morphological stage
    pub morphological_matches: usize,
    /// Hyphenation notes recorded
    pub hyphenation_notes: usize,
    /// Segments still flagged at the end
    pub segments_flagged: usize,
    /// (segment, term) misses left at the end
    pub missing_terms: usize,
}

impl CheckSummary {
    pub fn has_errors(&self) -> bool {
        self.missing_terms > 0
    }
}

/// Checks a translation against a glossary.
pub struct TerminologyChecker<'a> {
    glossary: &'a Glossary,
    lemmatizer: Option<&'a dyn Lemmatizer>,
    options: CheckOptions,
}

impl<'a> TerminologyChecker<'a> {
    /// Create a checker. Without a lemmatizer the morphological stage is skipped.
    pub fn new(glossary: &'a Glossary, lemmatizer: Option<&'a dyn Lemmatizer>, options: CheckOptions) -> Self {
        Self {
            glossary,
            lemmatizer,
            options,
        }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Run every enabled stage over the translation.
    pub fn run(&self, translation: &mut Translation) -> CheckSummary {
        let mut summary = CheckSummary {
            segments_total: translation.len(),
            segments_skipped: translation.iter().filter(|s| !s.has_content()).count(),
            glossary_entries: self.glossary.len(),
            ..CheckSummary::default()
        };

        let literal = LiteralMatcher::new(self.options.policy);
        let any_missing = literal.check(self.glossary, translation);
        summary.literal_misses = translation.missing_term_count();
        debug!(
            "Literal stage ({}): {} misses in {} segments",
            self.options.policy, summary.literal_misses, summary.segments_total
        );

        if any_missing && self.options.morphology {
            if let Some(lemmatizer) = self.lemmatizer {
                summary.morphological_matches = MorphologicalMatcher::new(lemmatizer)
                    .with_policy(self.options.policy)
                    .check(translation);
                debug!(
                    "Morphological stage ({}): {} misses cleared",
                    lemmatizer.name(),
                    summary.morphological_matches
                );
            }
        }

        if translation.has_missing_terms() && self.options.hyphenation {
            summary.hyphenation_notes = HyphenationAnnotator::new().annotate(translation);
            debug!("Hyphenation stage: {} notes", summary.hyphenation_notes);
        }

        summary.segments_flagged = translation.flagged().count();
        summary.missing_terms = translation.missing_term_count();
        debug!(
            "Checked {} segments against {} glossary entries: {} flagged",
            summary.segments_total, summary.glossary_entries, summary.segments_flagged
        );
        summary
    }
}
