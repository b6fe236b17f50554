/*!
 * Terminology compliance checking.
 *
 * Checks a bilingual translation against a controlled glossary and flags
 * segments where a glossary source term appears but none of its approved
 * renderings does.
 *
 * # Architecture
 *
 * - `glossary`: Normalizes raw glossary lines into a source → targets mapping
 * - `segment`: Segment store with per-segment results
 * - `literal`: Case-insensitive substring check (first stage)
 * - `morphology`: Lemma-based re-check removing inflection false positives
 * - `hyphenation`: Notes hyphenated renderings of still-missing terms
 * - `checker`: Runs the stages in order
 * - `report`: Text and JSON rendering of the findings
 */

pub mod glossary;
pub mod segment;
pub mod literal;
pub mod morphology;
pub mod hyphenation;
pub mod checker;
pub mod report;

// Re-export main types
pub use glossary::{Glossary, GlossaryEntry, GlossaryOptions};
pub use segment::{Segment, Translation};
pub use literal::{LiteralMatcher, MatchPolicy};
pub use morphology::{Lemmatizer, LemmatizerEngine, MorphologicalMatcher, RuleLemmatizer, SnowballLemmatizer};
pub use hyphenation::HyphenationAnnotator;
pub use checker::{CheckOptions, CheckSummary, TerminologyChecker};
pub use report::{ReportFormat, Reporter};
