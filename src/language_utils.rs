use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the language tags found in TMX documents
///
/// TMX writes languages as RFC 4646 style tags (`EN-US`, `ja`, `zh-Hant-TW`).
/// Only the primary subtag is an ISO 639 code; the helpers here resolve it
/// through ISO 639-1 and ISO 639-2 so that `JA`, `ja-JP` and `jpn` compare equal.

// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"), ("ger", "deu"), ("dut", "nld"), ("gre", "ell"),
    ("chi", "zho"), ("cze", "ces"), ("ice", "isl"), ("alb", "sqi"),
    ("arm", "hye"), ("baq", "eus"), ("bur", "mya"), ("per", "fas"),
    ("geo", "kat"), ("may", "msa"), ("mac", "mkd"), ("rum", "ron"),
    ("slo", "slk"), ("wel", "cym"),
];

/// Primary subtag of a language tag, lowercased (`EN-US` -> `en`)
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Region or script subtags following the primary subtag, if any
pub fn subtags(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    let pos = trimmed.find(['-', '_'])?;
    let rest = &trimmed[pos + 1..];
    (!rest.is_empty()).then(|| rest.to_string())
}

/// Resolve the primary subtag of a tag to an ISO 639-2/T (3-letter) code
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    let code = primary_subtag(tag);

    match code.len() {
        2 => {
            if let Some(lang) = Language::from_639_1(&code) {
                return Ok(lang.to_639_3().to_string());
            }
        }
        3 => {
            if Language::from_639_3(&code).is_some() {
                return Ok(code);
            }
            if let Some((_, terminology)) = BIBLIOGRAPHIC_CODES.iter().find(|(b, _)| *b == code) {
                return Ok((*terminology).to_string());
            }
        }
        _ => {}
    }

    Err(anyhow!("Cannot normalize invalid language tag: {}", tag))
}

/// Check if two language tags name the same language
///
/// Region subtags are ignored. Tags that are not ISO codes (e.g. `x-custom`)
/// only match when their primary subtags are identical.
pub fn language_tags_match(tag1: &str, tag2: &str) -> bool {
    if tag1.trim().eq_ignore_ascii_case(tag2.trim()) {
        return true;
    }

    match (normalize_to_part2t(tag1), normalize_to_part2t(tag2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => {
            let a = primary_subtag(tag1);
            !a.is_empty() && a == primary_subtag(tag2)
        }
    }
}

/// Get the English language name for a tag, with any region in parentheses
pub fn get_language_name(tag: &str) -> Result<String> {
    let normalized = normalize_to_part2t(tag)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(match subtags(tag) {
        Some(region) => format!("{} ({})", lang.to_name(), region.to_uppercase()),
        None => lang.to_name().to_string(),
    })
}

/// Language name for display, falling back to the raw tag
pub fn describe_language(tag: &str) -> String {
    get_language_name(tag).unwrap_or_else(|_| tag.trim().to_string())
}
