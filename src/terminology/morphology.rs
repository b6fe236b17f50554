/*!
 * Morphological terminology matching.
 *
 * Literal matching reports a term as missing when the approved rendering is
 * present but inflected ("device" in the glossary, "devices" in the text).
 * This stage re-checks flagged terms on lemmas and removes those false
 * positives. It never adds a term.
 *
 * Lemmas come from a `Lemmatizer`, a black-box oracle that tokenizes text and
 * maps a token to its base form. Two engines are provided:
 * - `RuleLemmatizer`: English suffix rules plus irregular-form tables,
 *   producing dictionary forms
 * - `SnowballLemmatizer`: the Snowball English stemmer; stems stand in for
 *   lemmas
 */

use log::trace;
use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

use super::literal::{count_occurrences, MatchPolicy};
use super::segment::{Segment, Translation};

/// A token and its byte offset in the text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub text: String,
}

impl Token {
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    /// Byte offset just past the token.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Morphological oracle used by the matcher.
pub trait Lemmatizer {
    /// Engine name for logs and reports.
    fn name(&self) -> &'static str;

    /// Base form of a single token.
    fn lemma(&self, word: &str) -> String;

    /// Split text into tokens. Whitespace is never returned as a token.
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_word_bound_indices()
            .filter(|(_, piece)| !piece.trim().is_empty())
            .map(|(start, piece)| Token::new(start, piece))
            .collect()
    }
}

/// Available lemmatizer engines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LemmatizerEngine {
    /// English suffix rules with irregular-form tables
    #[default]
    Rules,
    /// Snowball English stemmer
    Snowball,
}

impl LemmatizerEngine {
    /// Create the engine. Call once per run and share the result.
    pub fn build(&self) -> Box<dyn Lemmatizer> {
        match self {
            Self::Rules => Box::new(RuleLemmatizer::new()),
            Self::Snowball => Box::new(SnowballLemmatizer::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Snowball => "snowball",
        }
    }
}

impl std::fmt::Display for LemmatizerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LemmatizerEngine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "rules" => Ok(Self::Rules),
            "snowball" => Ok(Self::Snowball),
            _ => Err(anyhow::anyhow!("Invalid lemmatizer engine: {}", s)),
        }
    }
}

// @const: Inflected forms that suffix rules get wrong
static IRREGULAR_FORMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        // nouns
        ("children", "child"), ("men", "man"), ("women", "woman"), ("people", "person"),
        ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"), ("mice", "mouse"),
        ("indices", "index"), ("matrices", "matrix"), ("vertices", "vertex"),
        ("analyses", "analysis"), ("axes", "axis"), ("criteria", "criterion"),
        ("phenomena", "phenomenon"), ("knives", "knife"), ("halves", "half"),
        ("lives", "life"), ("wives", "wife"), ("shelves", "shelf"),
        // verbs
        ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
        ("being", "be"), ("am", "be"), ("has", "have"), ("had", "have"),
        ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("went", "go"), ("gone", "go"), ("made", "make"), ("took", "take"),
        ("taken", "take"), ("gave", "give"), ("given", "give"), ("got", "get"),
        ("gotten", "get"), ("ran", "run"), ("saw", "see"), ("seen", "see"),
        ("came", "come"), ("held", "hold"), ("kept", "keep"), ("left", "leave"),
        ("led", "lead"), ("built", "build"), ("sent", "send"), ("found", "find"),
        ("thought", "think"), ("brought", "bring"), ("bought", "buy"),
        ("caught", "catch"), ("taught", "teach"), ("told", "tell"), ("said", "say"),
        ("paid", "pay"), ("laid", "lay"), ("wrote", "write"), ("written", "write"),
        ("drove", "drive"), ("driven", "drive"), ("chose", "choose"),
        ("chosen", "choose"), ("rose", "rise"), ("risen", "rise"), ("fell", "fall"),
        ("fallen", "fall"), ("began", "begin"), ("begun", "begin"), ("shown", "show"),
        ("knew", "know"), ("known", "know"), ("grew", "grow"), ("grown", "grow"),
        ("drew", "draw"), ("drawn", "draw"), ("threw", "throw"), ("thrown", "throw"),
        ("flew", "fly"), ("flown", "fly"), ("lying", "lie"), ("dying", "die"),
        ("tying", "tie"), ("created", "create"), ("creating", "create"), ("used", "use"), ("using", "use"), ("uses", "use"),
        ("meant", "mean"), ("stood", "stand"), ("understood", "understand"),
        ("spent", "spend"), ("lost", "lose"), ("met", "meet"), ("felt", "feel"),
        ("dealt", "deal"), ("sold", "sell"), ("won", "win"), ("struck", "strike"),
        ("bent", "bend"), ("fed", "feed"), ("fled", "flee"), ("bound", "bind"),
        ("wound", "wind"), ("ground", "grind"), ("hung", "hang"),
    ]
    .into_iter()
    .collect()
});

// @const: Words that look inflected but are base forms
static INVARIANT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "this", "thus", "its", "always", "perhaps", "whereas", "across", "various",
        "previous", "series", "species", "means", "news", "physics", "mathematics",
        "analysis", "basis", "status", "apparatus", "process", "access", "less",
        "unless", "gas", "lens", "bus", "plus", "yes", "bias", "axis", "corpus",
        "focus", "radius", "nucleus", "stimulus", "virus", "campus", "census",
        "thing", "nothing", "something", "anything", "everything", "during",
        "morning", "evening", "ceiling", "string", "spring", "bring", "king",
        "ring", "wing", "sing", "swing", "sting", "need", "seed", "feed", "speed",
        "indeed", "exceed", "proceed", "succeed", "breed", "bleed", "greed",
        "weed", "deed", "hundred", "embed", "shed", "bed", "red", "wed", "sled",
        "bred", "sacred", "naked", "wicked", "kindred", "rugged", "ragged",
        // -ing nouns
        "housing", "opening", "setting", "building", "bearing", "coating", "casing",
        "wiring", "fitting", "coupling", "bushing", "heading", "drawing", "painting",
        "lining", "winding", "spacing", "sealing", "mounting", "meaning", "finding",
        "marking", "recording", "reading", "timing", "warning", "training",
        "engineering", "clothing", "packaging", "landing", "bedding", "filling",
    ]
    .into_iter()
    .collect()
});

/// English rule-based lemmatizer.
///
/// Tokens that are not plain ASCII words (numbers, CJK, punctuation) are
/// returned lowercased and otherwise unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        // Force the tables now so the first lookup does not pay for it
        Lazy::force(&IRREGULAR_FORMS);
        Lazy::force(&INVARIANT_WORDS);
        Self
    }

    fn lemmatize_lower(word: &str) -> String {
        if let Some(base) = word.strip_suffix("'s").or_else(|| word.strip_suffix("s'")) {
            if !base.is_empty() {
                return Self::lemmatize_lower(base);
            }
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return word.to_string();
        }
        if let Some(base) = IRREGULAR_FORMS.get(word) {
            return (*base).to_string();
        }
        if word.len() <= 3 || INVARIANT_WORDS.contains(word) {
            return word.to_string();
        }

        // plural nouns and third-person verbs
        if let Some(stem) = word.strip_suffix("ies") {
            if word.len() > 4 {
                return format!("{}y", stem);
            }
        }
        if word.ends_with("sses")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("xes")
            || word.ends_with("zzes")
        {
            return word[..word.len() - 2].to_string();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }
        if let Some(stem) = word.strip_suffix('s') {
            return stem.to_string();
        }

        // past tense and participles
        if let Some(stem) = word.strip_suffix("ied") {
            if word.len() > 4 {
                return format!("{}y", stem);
            }
        }
        if word.ends_with("eed") {
            return word[..word.len() - 1].to_string();
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if has_vowel(stem) {
                return restore_stem(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if stem.len() >= 3 && has_vowel(stem) {
                return restore_stem(stem);
            }
        }

        word.to_string()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn name(&self) -> &'static str {
        "rules"
    }

    /// Rules are reapplied until the form is stable, so a lemma is its own lemma.
    fn lemma(&self, word: &str) -> String {
        let mut current = word.to_lowercase();
        // every rule shortens the word or maps it to a table base form
        for _ in 0..word.len() {
            let next = Self::lemmatize_lower(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn has_vowel(stem: &str) -> bool {
    stem.bytes().any(|c| is_vowel(c) || c == b'y')
}

/// Undo the spelling changes made when a verb took -ed or -ing.
fn restore_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n < 2 {
        return stem.to_string();
    }
    let last = bytes[n - 1];
    let prev = bytes[n - 2];

    // stopped -> stop, running -> run; added, egged and stuffed keep the pair
    let base_pair = (n == 3 && is_vowel(bytes[0])) || matches!(last, b'l' | b's' | b'z' | b'f');
    if last == prev && !is_vowel(last) && !base_pair {
        return stem[..n - 1].to_string();
    }

    // created -> create, enabled -> enable, organized -> organize
    let needs_e = stem.ends_with("bl")
        || stem.ends_with("iz")
        || (stem.ends_with("at") && n >= 3 && !is_vowel(bytes[n - 3]))
        || (stem.ends_with("ur") && n >= 3 && !is_vowel(bytes[n - 3]))
        || matches!(last, b'v' | b'c')
        || stem.ends_with("rg")
        || stem.ends_with("dg");
    if needs_e {
        return format!("{}e", stem);
    }

    // short consonant-vowel-consonant stems: hoped -> hope, making -> make
    if n == 3 && !is_vowel(bytes[0]) && is_vowel(bytes[1]) && !is_vowel(last) && !matches!(last, b'w' | b'x' | b'y') {
        return format!("{}e", stem);
    }

    stem.to_string()
}

/// Snowball stemmer wrapped as a lemmatizer.
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl SnowballLemmatizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for SnowballLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn name(&self) -> &'static str {
        "snowball"
    }

    /// Stem a word (lowercased first)
    fn lemma(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).to_string()
    }
}

/// Collapse whitespace runs and lowercase, for phrase comparison.
fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Target text tokenized once, with lowercased lemmas per token.
struct LemmatizedText<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    lemmas: Vec<String>,
}

impl<'t> LemmatizedText<'t> {
    fn new(text: &'t str, lemmatizer: &dyn Lemmatizer) -> Self {
        let tokens = lemmatizer.tokenize(text);
        let lemmas = tokens
            .iter()
            .map(|t| lemmatizer.lemma(&t.text).to_lowercase())
            .collect();
        Self { text, tokens, lemmas }
    }
}

/// Lemma-based re-check of literal misses.
///
/// Under `MatchPolicy::OccurrenceCount` a term is cleared only when its
/// inflected renderings occur at least as often as the source term.
pub struct MorphologicalMatcher<'a> {
    lemmatizer: &'a dyn Lemmatizer,
    policy: MatchPolicy,
}

impl<'a> MorphologicalMatcher<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer) -> Self {
        Self {
            lemmatizer,
            policy: MatchPolicy::Presence,
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// The term with only its final word lemmatized.
    ///
    /// "printing devices" becomes "printing device", not "print device".
    pub fn term_lemma(&self, term: &str) -> String {
        let term = term.trim();
        match self.lemmatizer.tokenize(term).last() {
            Some(last) => format!("{}{}", &term[..last.start], self.lemmatizer.lemma(&last.text)),
            None => term.to_string(),
        }
    }

    /// Whether an inflected form of `term` occurs in `text`.
    pub fn contains_term(&self, text: &str, term: &str) -> bool {
        let lemmatized = LemmatizedText::new(text, self.lemmatizer);
        self.count_in(&lemmatized, term, 1) > 0
    }

    /// Non-overlapping inflected occurrences of `term` in `text`.
    pub fn count_term(&self, text: &str, term: &str) -> usize {
        let lemmatized = LemmatizedText::new(text, self.lemmatizer);
        self.count_in(&lemmatized, term, usize::MAX)
    }

    /// Count phrase matches, stopping once `limit` is reached.
    fn count_in(&self, lemmatized: &LemmatizedText<'_>, term: &str, limit: usize) -> usize {
        let term_tokens = self.lemmatizer.tokenize(term.trim());
        let Some(last) = term_tokens.last() else {
            return 0;
        };
        let subword_count = term_tokens.len();
        let head_lemma = self.lemmatizer.lemma(&last.text).to_lowercase();
        let expected = normalize_phrase(&self.term_lemma(term));

        let mut count = 0;
        // first token index a new match may start at
        let mut free_from = 0;
        for (i, lemma) in lemmatized.lemmas.iter().enumerate() {
            if *lemma != head_lemma {
                continue;
            }
            // Too few preceding tokens to hold the whole term
            if i + 1 < subword_count || i + 1 - subword_count < free_from {
                continue;
            }

            let first = &lemmatized.tokens[i + 1 - subword_count];
            let matched = &lemmatized.tokens[i];
            let phrase = format!("{}{}", &lemmatized.text[first.start..matched.start], lemma);
            if normalize_phrase(&phrase) == expected {
                trace!("Morphological match for '{}' at token {}", term, i);
                count += 1;
                free_from = i + 1;
                if count >= limit {
                    break;
                }
            }
        }

        count
    }

    /// Whether the flagged term is satisfied by inflected renderings.
    fn satisfied(
        &self,
        source_lower: &str,
        lemmatized: &LemmatizedText<'_>,
        source_term: &str,
        targets: &[String],
    ) -> bool {
        match self.policy {
            MatchPolicy::Presence => targets.iter().any(|t| self.count_in(lemmatized, t, 1) > 0),
            MatchPolicy::OccurrenceCount => {
                let needed = count_occurrences(source_lower, &source_term.to_lowercase());
                let found: usize = targets
                    .iter()
                    .map(|t| self.count_in(lemmatized, t, usize::MAX))
                    .sum();
                found >= needed
            }
        }
    }

    /// Re-check one segment. Returns the number of terms cleared.
    pub fn check_segment(&self, segment: &mut Segment) -> usize {
        if !segment.has_content() || !segment.has_missing_terms() {
            return 0;
        }

        let source_lower = segment.source_text.to_lowercase();
        let lemmatized = LemmatizedText::new(&segment.target_text, self.lemmatizer);
        let cleared: Vec<String> = segment
            .missing_terms
            .iter()
            .filter(|(source, targets)| self.satisfied(&source_lower, &lemmatized, source, targets))
            .map(|(source, _)| source.clone())
            .collect();

        for source in &cleared {
            trace!("Cleared '{}' by morphological match", source);
            segment.missing_terms.shift_remove(source);
        }
        cleared.len()
    }

    /// Re-check every flagged segment. Returns the number of terms cleared.
    pub fn check(&self, translation: &mut Translation) -> usize {
        translation
            .iter_mut()
            .map(|segment| self.check_segment(segment))
            .sum()
    }
}
