/*!
 * Rendering of check results.
 *
 * The text report lists, for every flagged segment, each missing source term
 * with its approved renderings, any hyphenation note, then the source and
 * target text verbatim. The JSON report carries the same findings plus the
 * run summary.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::checker::CheckSummary;
use super::segment::{HyphenatedForms, MissingTerms, Segment, Translation};

const RED: &str = "\x1B[31m";
const CYAN: &str = "\x1B[36m";
const YELLOW: &str = "\x1B[33m";
const RESET: &str = "\x1B[0m";

/// Report output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid report format: {}", s)),
        }
    }
}

/// Quote each term and join them as an "or" list: `'a', 'b', or 'c'`.
pub fn format_alternatives(terms: &[String]) -> String {
    let quoted: Vec<String> = terms.iter().map(|t| format!("'{}'", t)).collect();
    match quoted.len() {
        0 => String::new(),
        1 => quoted[0].clone(),
        2 => format!("{} or {}", quoted[0], quoted[1]),
        n => format!("{}, or {}", quoted[..n - 1].join(", "), quoted[n - 1]),
    }
}

#[derive(Serialize)]
struct JsonSegment<'a> {
    /// 1-based position in the document
    index: usize,
    source_text: &'a str,
    target_text: &'a str,
    missing_terms: &'a MissingTerms,
    #[serde(skip_serializing_if = "no_notes")]
    hyphenated_forms: &'a HyphenatedForms,
}

fn no_notes(forms: &&HyphenatedForms) -> bool {
    forms.is_empty()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_language: Option<&'a str>,
    summary: &'a CheckSummary,
    segments: Vec<JsonSegment<'a>>,
}

/// Renders findings without touching segment state.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    format: ReportFormat,
    color: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, color: bool) -> Self {
        Self { format, color }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Render the report as a string.
    pub fn render(&self, translation: &Translation, summary: &CheckSummary) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(self.render_text(translation)),
            ReportFormat::Json => self.render_json(translation, summary),
        }
    }

    /// Render the report into a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W, translation: &Translation, summary: &CheckSummary) -> Result<()> {
        let rendered = self.render(translation, summary)?;
        writer
            .write_all(rendered.as_bytes())
            .context("Failed to write report")?;
        writer.flush().context("Failed to flush report")?;
        Ok(())
    }

    fn render_text(&self, translation: &Translation) -> String {
        let mut out = String::new();
        let mut errors_found = false;

        for (_, segment) in translation.flagged() {
            errors_found = true;
            out.push('\n');
            self.render_segment(&mut out, segment);
        }

        if !errors_found {
            out.push('\n');
            out.push_str(&self.paint(CYAN, "No terminology errors found."));
            out.push('\n');
        }
        out
    }

    fn render_segment(&self, out: &mut String, segment: &Segment) {
        for (source_term, target_terms) in &segment.missing_terms {
            let line = format!(
                "'{}' should be translated as {}",
                source_term,
                format_alternatives(target_terms)
            );
            out.push_str(&self.paint(RED, &line));
            out.push('\n');

            if let Some(form) = segment.hyphenated_forms.get(source_term) {
                let note = format!("  hyphenated form '{}' found in target text", form);
                out.push_str(&self.paint(YELLOW, &note));
                out.push('\n');
            }
        }

        out.push_str(&self.paint(CYAN, "Source text:"));
        out.push('\n');
        out.push_str(&segment.source_text);
        out.push('\n');
        out.push_str(&self.paint(CYAN, "Target text:"));
        out.push('\n');
        out.push_str(&segment.target_text);
        out.push('\n');
    }

    fn render_json(&self, translation: &Translation, summary: &CheckSummary) -> Result<String> {
        let report = JsonReport {
            source_language: translation.source_language.as_deref(),
            target_language: translation.target_language.as_deref(),
            summary,
            segments: translation
                .flagged()
                .map(|(i, segment)| JsonSegment {
                    index: i + 1,
                    source_text: &segment.source_text,
                    target_text: &segment.target_text,
                    missing_terms: &segment.missing_terms,
                    hyphenated_forms: &segment.hyphenated_forms,
                })
                .collect(),
        };
        let mut json = serde_json::to_string_pretty(&report).context("Failed to serialize report to JSON")?;
        json.push('\n');
        Ok(json)
    }
}
