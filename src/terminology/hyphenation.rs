/*!
 * Hyphenation notes for terms that are still missing.
 *
 * A multi-word rendering is sometimes written hyphenated in the target text
 * ("exemplary-embodiment" for "exemplary embodiment"). Such a segment is
 * probably fine but still worth a human look, so the hyphenated form is
 * recorded as a note and the term stays in `missing_terms`.
 *
 * The comparison is case-sensitive, unlike the other stages.
 */

use log::debug;

use super::segment::{Segment, Translation};

/// Hyphen-joined form of a multi-word term, or `None` for single words.
pub fn hyphenated_form(term: &str) -> Option<String> {
    let words: Vec<&str> = term.split_whitespace().collect();
    if words.len() < 2 {
        return None;
    }
    Some(words.join("-"))
}

/// Annotates still-missing terms whose hyphenated rendering is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenationAnnotator;

impl HyphenationAnnotator {
    pub fn new() -> Self {
        Self
    }

    /// Annotate one segment. Returns the number of notes recorded.
    pub fn annotate_segment(&self, segment: &mut Segment) -> usize {
        segment.hyphenated_forms.clear();
        if !segment.has_content() {
            return 0;
        }

        for (source_term, target_terms) in &segment.missing_terms {
            let found = target_terms
                .iter()
                .filter_map(|t| hyphenated_form(t))
                .find(|form| segment.target_text.contains(form.as_str()));

            if let Some(form) = found {
                debug!("Hyphenated form '{}' found for '{}'", form, source_term);
                segment.hyphenated_forms.insert(source_term.clone(), form);
            }
        }
        segment.hyphenated_forms.len()
    }

    /// Annotate every segment. Returns the number of notes recorded.
    pub fn annotate(&self, translation: &mut Translation) -> usize {
        translation
            .iter_mut()
            .map(|segment| self.annotate_segment(segment))
            .sum()
    }
}
