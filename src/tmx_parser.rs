use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::errors::TmxError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::terminology::{Segment, Translation};

// @module: TMX (translation memory exchange) reading and conversion
//
// Basic TMX structure:
//
// <tmx version="1.4">
//   <header srclang="JA" .../>
//   <body>
//     <tu>
//       <tuv xml:lang="JA"><seg>変換部5の画像変換処理</seg></tuv>
//       <tuv xml:lang="EN-US"><seg>Image conversion processing</seg></tuv>
//     </tu>
//   </body>
// </tmx>

// @const: Root element
static ROOT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<tmx\b").unwrap());

// @const: Header source language attribute
static SRCLANG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<header\b[^>]*?\bsrclang\s*=\s*["']([^"']*)["']"#).unwrap()
});

// @const: Body content (or an empty self-closing body)
static BODY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body\b[^>]*?(?:/>|>(.*)</body\s*>)").unwrap()
});

// @const: Translation unit (an empty self-closing unit has no group 1)
static TU_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<tu\b(?:[^>]*?/>|[^>]*>(.*?)</tu\s*>)").unwrap()
});

// @const: Translation unit variant with its attributes
static TUV_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<tuv\b([^>]*?)(?:/>|>(.*?)</tuv\s*>)").unwrap()
});

// @const: Language attribute (TMX 1.4 xml:lang or TMX 1.1 lang)
static LANG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|\s)(?:xml:)?lang\s*=\s*["']([^"']*)["']"#).unwrap()
});

// @const: Segment text
static SEG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<seg\b[^>]*>(.*?)</seg\s*>").unwrap());

// @const: CDATA sections, kept verbatim
static CDATA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").unwrap());

// @const: Inline native-code elements whose content is dropped
static NATIVE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?is)<(?:bpt|ept|ph|it|ut)\b[^>]*/>",
        r"|<bpt\b[^>]*>.*?</bpt\s*>",
        r"|<ept\b[^>]*>.*?</ept\s*>",
        r"|<ph\b[^>]*>.*?</ph\s*>",
        r"|<it\b[^>]*>.*?</it\s*>",
        r"|<ut\b[^>]*>.*?</ut\s*>",
    ))
    .unwrap()
});

// @const: Any remaining tag (hi, sub, ...), content kept
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

// @const: XML comments
static COMMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

// @const: Entity and character references
static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(#[xX][0-9A-Fa-f]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);").unwrap());

/// Reader for TMX documents
pub struct TmxParser;

impl TmxParser {
    /// Read and parse a TMX file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Translation> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        let translation = Self::parse_str(&content)
            .with_context(|| format!("Failed to parse TMX file: {:?}", path))?;
        debug!("Parsed {} segments from {:?}", translation.len(), path);
        Ok(translation)
    }

    /// Parse TMX content into an ordered translation
    ///
    /// The header's `srclang` picks the source variant of each unit; without
    /// it (or with `*all*`) the first variant is the source. Units without a
    /// target variant give an empty target text.
    pub fn parse_str(content: &str) -> Result<Translation, TmxError> {
        let content = COMMENT_REGEX.replace_all(content, "");
        if !ROOT_REGEX.is_match(&content) {
            return Err(TmxError::MissingRoot);
        }

        let body = BODY_REGEX
            .captures(&content)
            .ok_or(TmxError::MissingBody)?
            .get(1)
            .map_or("", |m| m.as_str());

        let source_language = SRCLANG_REGEX
            .captures(&content)
            .map(|c| c[1].trim().to_string())
            .filter(|lang| !lang.is_empty() && lang != "*all*");

        let mut target_language: Option<String> = None;
        let mut translation = Translation::new();

        for tu in TU_REGEX.captures_iter(body) {
            let variants = Self::parse_variants(tu.get(1).map_or("", |m| m.as_str()))?;
            if variants.is_empty() {
                warn!("Skipping translation unit without variants");
                continue;
            }

            let source_index = source_language
                .as_deref()
                .and_then(|src| Self::source_variant(&variants, src))
                .unwrap_or(0);

            let source_text = variants[source_index].1.clone();
            let target = variants
                .iter()
                .enumerate()
                .find(|(i, _)| *i != source_index);

            let target_text = match target {
                Some((_, (lang, text))) => {
                    if target_language.is_none() {
                        target_language = lang.clone();
                    }
                    text.clone()
                }
                None => String::new(),
            };

            translation.push(Segment::new(source_text, target_text));
        }

        Ok(translation.with_languages(source_language, target_language))
    }

    /// Index of the variant written in `srclang`
    ///
    /// An exact tag match (ignoring case) wins; a variant of the same language
    /// in another region is used only when no exact match exists.
    fn source_variant(variants: &[(Option<String>, String)], srclang: &str) -> Option<usize> {
        variants
            .iter()
            .position(|(lang, _)| lang.as_deref().is_some_and(|l| l.eq_ignore_ascii_case(srclang)))
            .or_else(|| {
                variants.iter().position(|(lang, _)| {
                    lang.as_deref()
                        .is_some_and(|l| language_utils::language_tags_match(l, srclang))
                })
            })
    }

    /// Language and plain text of every `<tuv>` in a unit
    fn parse_variants(tu_content: &str) -> Result<Vec<(Option<String>, String)>, TmxError> {
        TUV_REGEX
            .captures_iter(tu_content)
            .map(|tuv| -> Result<_, TmxError> {
                let lang = LANG_REGEX
                    .captures(&tuv[1])
                    .map(|c| c[1].trim().to_string());
                let text = match tuv.get(2).and_then(|inner| SEG_REGEX.captures(inner.as_str())) {
                    Some(seg) => Self::segment_text(&seg[1])?,
                    None => String::new(),
                };
                Ok((lang, text))
            })
            .collect()
    }

    /// Plain text of `<seg>` content: inline markup removed, entities decoded
    pub fn segment_text(raw: &str) -> Result<String, TmxError> {
        let mut text = String::new();
        let mut last = 0;

        for cdata in CDATA_REGEX.captures_iter(raw) {
            let whole = cdata.get(0).map_or(0..0, |m| m.range());
            text.push_str(&Self::markup_text(&raw[last..whole.start])?);
            text.push_str(&cdata[1]);
            last = whole.end;
        }
        text.push_str(&Self::markup_text(&raw[last..])?);

        Ok(text)
    }

    fn markup_text(raw: &str) -> Result<String, TmxError> {
        let without_codes = NATIVE_CODE_REGEX.replace_all(raw, "");
        let without_tags = TAG_REGEX.replace_all(&without_codes, "");
        decode_entities(&without_tags)
    }

    /// Tab-delimited `source<TAB>target` lines, one per segment
    ///
    /// Tabs and line breaks inside the texts become spaces so that every
    /// segment stays on one line.
    pub fn to_tab_delimited(translation: &Translation) -> String {
        let flatten = |text: &str| -> String {
            text.chars()
                .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
                .collect()
        };

        let mut output = String::new();
        for segment in translation.iter() {
            output.push_str(&flatten(&segment.source_text));
            output.push('\t');
            output.push_str(&flatten(&segment.target_text));
            output.push('\n');
        }
        output
    }
}

/// Decode XML entity and character references
///
/// Unknown named entities are left as written.
pub fn decode_entities(text: &str) -> Result<String, TmxError> {
    let mut decoded = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ENTITY_REGEX.captures_iter(text) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        decoded.push_str(&text[last..whole.start]);

        let name = &caps[1];
        let replacement = match name {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ if name.starts_with("#x") || name.starts_with("#X") => Some(
                u32::from_str_radix(&name[2..], 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| TmxError::InvalidEntity(name.to_string()))?,
            ),
            _ if name.starts_with('#') => Some(
                name[1..]
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| TmxError::InvalidEntity(name.to_string()))?,
            ),
            _ => None,
        };

        match replacement {
            Some(c) => decoded.push(c),
            None => decoded.push_str(&text[whole.clone()]),
        }
        last = whole.end;
    }
    decoded.push_str(&text[last..]);

    Ok(decoded)
}
