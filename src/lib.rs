/*!
 * # termaudit - terminology compliance checker
 *
 * A Rust library for auditing bilingual translations against a controlled
 * glossary.
 *
 * ## Features
 *
 * - Read TMX translation memories into ordered segment pairs
 * - Normalize tab-delimited glossaries into a source → targets mapping
 * - Flag segments where a glossary source term appears but no approved
 *   target term does, in three stages:
 *   - literal case-insensitive substring check
 *   - lemma-based re-check tolerant of inflection
 *   - notes on hyphenated renderings
 * - Text and JSON reports
 * - Batch conversion of TMX files into tab-delimited text
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `terminology`: The compliance engine:
 *   - `terminology::glossary`: Glossary normalization
 *   - `terminology::segment`: Segment store
 *   - `terminology::literal`: Literal matching
 *   - `terminology::morphology`: Lemmatizers and morphological matching
 *   - `terminology::hyphenation`: Hyphenation notes
 *   - `terminology::checker`: Stage pipeline
 *   - `terminology::report`: Report rendering
 * - `tmx_parser`: TMX reading and tab-delimited conversion
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod terminology;
pub mod tmx_parser;
pub mod app_controller;
pub mod language_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{CheckInputs, Controller};
pub use terminology::{CheckOptions, CheckSummary, Glossary, Segment, TerminologyChecker, Translation};
pub use tmx_parser::TmxParser;
pub use language_utils::{language_tags_match, normalize_to_part2t, get_language_name};
pub use errors::{AppError, TmxError};
