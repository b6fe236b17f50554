/*!
 * Tests for hyphenation notes
 */

use termaudit::terminology::hyphenation::hyphenated_form;
use termaudit::terminology::{HyphenationAnnotator, Segment, Translation};
use crate::common;

/// Test that a hyphenated rendering is noted and the term stays missing
#[test]
fn test_annotateSegment_withHyphenatedRendering_shouldRecordNote() {
    let mut segment = Segment::new("本実施形態では", "In the exemplary-embodiment, ...");
    segment
        .missing_terms
        .insert("実施形態".to_string(), common::terms(&["exemplary embodiment"]));

    let notes = HyphenationAnnotator::new().annotate_segment(&mut segment);

    assert_eq!(notes, 1);
    assert_eq!(segment.hyphenated_forms["実施形態"], "exemplary-embodiment");
    assert_eq!(segment.missing_terms["実施形態"], common::terms(&["exemplary embodiment"]));
}

/// Test that single-word renderings never produce a note
#[test]
fn test_annotateSegment_withSingleWordTerm_shouldRecordNothing() {
    let mut segment = Segment::new("実施例", "an ex-ample");
    segment.missing_terms.insert("実施例".to_string(), common::terms(&["example"]));

    assert_eq!(HyphenationAnnotator::new().annotate_segment(&mut segment), 0);
    assert!(segment.hyphenated_forms.is_empty());
}

/// Test that the first matching alternative is recorded
#[test]
fn test_annotateSegment_withSeveralAlternatives_shouldUseFirstFound() {
    let mut segment = Segment::new("平面模式図", "a top-view drawing");
    segment
        .missing_terms
        .insert("平面模式図".to_string(), common::terms(&["plan schematic view", "top view"]));

    HyphenationAnnotator::new().annotate_segment(&mut segment);

    assert_eq!(segment.hyphenated_forms["平面模式図"], "top-view");
}

/// Test that annotate walks all segments and skips those without findings
#[test]
fn test_annotate_overTranslation_shouldCountNotes() {
    let mut translation = Translation::from_pairs(vec![
        ("実施形態", "exemplary-embodiment"),
        ("実施形態", "exemplary embodiment"),
        ("実施形態", ""),
    ]);
    for segment in translation.iter_mut() {
        segment
            .missing_terms
            .insert("実施形態".to_string(), common::terms(&["exemplary embodiment"]));
    }

    let notes = HyphenationAnnotator::new().annotate(&mut translation);

    assert_eq!(notes, 1);
    assert!(translation.segments[1].hyphenated_forms.is_empty());
    assert!(translation.segments[2].hyphenated_forms.is_empty());
    assert_eq!(translation.missing_term_count(), 3);
}

/// Test hyphen joining collapses whitespace runs
#[test]
fn test_hyphenatedForm_withExtraSpaces_shouldJoinWords() {
    assert_eq!(hyphenated_form("cross  sectional view"), Some("cross-sectional-view".to_string()));
    assert_eq!(hyphenated_form("view"), None);
    assert_eq!(hyphenated_form(""), None);
}
