/*!
 * Literal terminology matching.
 *
 * First and cheapest stage of the check. For every glossary source term found
 * in a segment's source text, at least one approved target term must appear
 * in the target text. Both comparisons ignore case. Terms that fail are
 * recorded in the segment's `missing_terms` with their full approved list.
 */

use log::trace;
use serde::{Deserialize, Serialize};

use super::glossary::Glossary;
use super::segment::{MissingTerms, Segment, Translation};

/// How the presence of a target term is judged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// One occurrence of any approved target term is enough
    #[default]
    Presence,
    /// Approved target terms must occur at least as often as the source term
    OccurrenceCount,
}

impl MatchPolicy {
    // @returns: Config/CLI identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::OccurrenceCount => "occurrence-count",
        }
    }
}

impl std::fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MatchPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "presence" => Ok(Self::Presence),
            "occurrence-count" | "count" => Ok(Self::OccurrenceCount),
            _ => Err(anyhow::anyhow!("Invalid match policy: {}", s)),
        }
    }
}

/// Case-insensitive substring matcher over glossary terms.
#[derive(Debug, Clone, Default)]
pub struct LiteralMatcher {
    policy: MatchPolicy,
}

impl LiteralMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Check every segment of the translation.
    ///
    /// Previous results are discarded first, so repeated runs give the same
    /// outcome. Returns whether any segment ended up with missing terms.
    pub fn check(&self, glossary: &Glossary, translation: &mut Translation) -> bool {
        let mut any_missing = false;
        for segment in translation.iter_mut() {
            any_missing |= self.check_segment(glossary, segment);
        }
        any_missing
    }

    /// Check one segment. Returns whether it has missing terms afterwards.
    pub fn check_segment(&self, glossary: &Glossary, segment: &mut Segment) -> bool {
        segment.reset();
        if !segment.has_content() {
            return false;
        }
        segment.missing_terms = self.find_missing(glossary, &segment.source_text, &segment.target_text);
        segment.has_missing_terms()
    }

    /// Compute the missing terms for a source/target pair without touching any segment.
    pub fn find_missing(&self, glossary: &Glossary, source_text: &str, target_text: &str) -> MissingTerms {
        let source_lower = source_text.to_lowercase();
        let target_lower = target_text.to_lowercase();
        let mut missing = MissingTerms::new();

        for (source_term, target_terms) in glossary.iter() {
            let source_count = count_occurrences(&source_lower, &source_term.to_lowercase());
            if source_count == 0 {
                continue;
            }

            let satisfied = match self.policy {
                MatchPolicy::Presence => target_terms
                    .iter()
                    .any(|t| contains_ignore_case(&target_lower, t)),
                MatchPolicy::OccurrenceCount => {
                    let target_count: usize = target_terms
                        .iter()
                        .map(|t| count_occurrences(&target_lower, &t.to_lowercase()))
                        .sum();
                    target_count >= source_count
                }
            };

            if !satisfied {
                trace!("Literal miss for '{}' ({} in source)", source_term, source_count);
                missing.insert(source_term.to_string(), target_terms.to_vec());
            }
        }

        missing
    }
}

/// Whether `needle` occurs in the already-lowercased `haystack_lower`.
fn contains_ignore_case(haystack_lower: &str, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    !needle.is_empty() && haystack_lower.contains(&needle)
}

/// Non-overlapping occurrences of `needle` in `haystack`.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
