/*!
 * Integration tests for the terminology check workflow
 */

use anyhow::Result;
use termaudit::app_config::Config;
use termaudit::app_controller::{CheckInputs, Controller};
use termaudit::file_utils::FileManager;
use termaudit::terminology::{
    glossary, CheckOptions, GlossaryOptions, LemmatizerEngine, MatchPolicy, ReportFormat, TerminologyChecker,
};
use termaudit::tmx_parser::TmxParser;
use crate::common;

fn plain_config() -> Config {
    let mut config = Config::default();
    config.output.color = false;
    config
}

/// Test the full pipeline over the figure captions
#[test]
fn test_check_withFigureCaptions_shouldFlagTwoSegments() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let glossary_path = common::create_sample_glossary(temp_dir.path(), "glossary.txt")?;
    let tmx_path = common::create_figure_tmx(temp_dir.path(), "figures.tmx")?;

    let lines = FileManager::read_lines(&glossary_path)?;
    let glossary = glossary::normalize(&lines, &GlossaryOptions::default());
    let mut translation = TmxParser::parse_file(&tmx_path)?;
    let lemmatizer = LemmatizerEngine::Rules.build();
    let checker = TerminologyChecker::new(&glossary, Some(lemmatizer.as_ref()), CheckOptions::default());

    let summary = checker.run(&mut translation);

    let missing: Vec<Vec<&str>> = translation
        .iter()
        .map(|s| s.missing_terms.keys().map(String::as_str).collect())
        .collect();
    assert_eq!(
        missing,
        vec![vec!["断面模式図"], vec![], vec![], vec![], vec![], vec![], vec!["平面模式図"]]
    );
    assert_eq!(
        translation.segments[6].missing_terms["平面模式図"],
        common::terms(&["plan schematic view"])
    );
    assert_eq!(summary.segments_total, 7);
    assert_eq!(summary.glossary_entries, 8);
    assert_eq!(summary.literal_misses, 4);
    assert_eq!(summary.morphological_matches, 2);
    assert_eq!(summary.hyphenation_notes, 0);
    assert_eq!(summary.segments_flagged, 2);
    assert!(summary.has_errors());
    Ok(())
}

/// Test that without the morphological stage inflected renderings stay flagged
#[test]
fn test_check_withoutMorphology_shouldKeepInflectedMisses() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = plain_config();
    config.matching.morphology = false;
    let controller = Controller::with_config(config)?;
    let inputs = CheckInputs {
        glossary_path: common::create_sample_glossary(temp_dir.path(), "glossary.txt")?,
        translation_path: common::create_figure_tmx(temp_dir.path(), "figures.tmx")?,
    };
    let mut output: Vec<u8> = Vec::new();

    let summary = controller.check(&inputs, &mut output)?;

    assert_eq!(summary.morphological_matches, 0);
    assert_eq!(summary.segments_flagged, 4);
    assert!(String::from_utf8(output)?.contains("'説明' should be translated as 'illustrate'"));
    Ok(())
}

/// Test the text report written by the controller
#[test]
fn test_controllerCheck_withTextFormat_shouldReportFlaggedSegments() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(plain_config())?;
    let inputs = controller.classify_arguments(&[
        common::create_figure_tmx(temp_dir.path(), "figures.tmx")?,
        common::create_sample_glossary(temp_dir.path(), "glossary.txt")?,
    ])?;
    let mut output: Vec<u8> = Vec::new();

    controller.check(&inputs, &mut output)?;
    let report = String::from_utf8(output)?;

    assert!(report.contains(
        "'断面模式図' should be translated as 'cross-sectional schematic view'\n\
Source text:\n\
[図1]...を示す断面模式図である。\n\
Target text:\n\
Fig. 1 is a schematic view depicting ...\n"
    ));
    assert!(report.contains("'平面模式図' should be translated as 'plan schematic view'"));
    assert!(!report.contains("Fig. 3"));
    assert!(!report.contains('\x1B'));
    Ok(())
}

/// Test the JSON report and hyphenation notes end to end
#[test]
fn test_controllerCheck_withJsonFormat_shouldCarryNotes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = plain_config();
    config.output.format = ReportFormat::Json;
    let controller = Controller::with_config(config)?;
    let pairs = [
        ("本実施形態では", "In this exemplary-embodiment, ..."),
        ("要約書", "Abstract"),
    ];
    let inputs = CheckInputs {
        glossary_path: common::create_test_file(
            temp_dir.path(),
            "glossary.txt",
            "実施形態\texemplary embodiment\n要約書\tAbstract\n",
        )?,
        translation_path: common::create_test_file(
            temp_dir.path(),
            "job.tmx",
            &common::tmx_document("JA", "EN-US", &pairs),
        )?,
    };
    let mut output: Vec<u8> = Vec::new();

    controller.check(&inputs, &mut output)?;
    let json: serde_json::Value = serde_json::from_slice(&output)?;

    assert_eq!(json["summary"]["hyphenation_notes"], 1);
    assert_eq!(json["target_language"], "EN-US");
    assert_eq!(json["segments"][0]["index"], 1);
    assert_eq!(json["segments"][0]["hyphenated_forms"]["実施形態"], "exemplary-embodiment");
    assert_eq!(json["segments"][0]["missing_terms"]["実施形態"][0], "exemplary embodiment");
    assert_eq!(json["segments"].as_array().map(Vec::len), Some(1));
    Ok(())
}

/// Test that a clean translation prints the all-clear line
#[test]
fn test_controllerCheck_withCompliantTranslation_shouldPrintNoErrors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(plain_config())?;
    let pairs = [("[図3]...を示す断面模式図である。", "Fig. 3 is a Cross-Sectional Schematic View depicting ...")];
    let inputs = CheckInputs {
        glossary_path: common::create_sample_glossary(temp_dir.path(), "glossary.txt")?,
        translation_path: common::create_test_file(
            temp_dir.path(),
            "job.tmx",
            &common::tmx_document("JA", "EN-US", &pairs),
        )?,
    };
    let mut output: Vec<u8> = Vec::new();

    let summary = controller.check(&inputs, &mut output)?;

    assert!(!summary.has_errors());
    assert_eq!(String::from_utf8(output)?.trim(), "No terminology errors found.");
    Ok(())
}

/// Test the occurrence-count policy end to end
#[test]
fn test_controllerCheck_withOccurrenceCount_shouldFlagUndercount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = plain_config();
    config.matching.policy = MatchPolicy::OccurrenceCount;
    assert!(config.matching.morphology);
    let controller = Controller::with_config(config)?;
    let pairs = [("解決と解決", "to solve it")];
    let inputs = CheckInputs {
        glossary_path: common::create_sample_glossary(temp_dir.path(), "glossary.txt")?,
        translation_path: common::create_test_file(
            temp_dir.path(),
            "job.tmx",
            &common::tmx_document("JA", "EN-US", &pairs),
        )?,
    };
    let mut output: Vec<u8> = Vec::new();

    let summary = controller.check(&inputs, &mut output)?;

    assert_eq!(summary.segments_flagged, 1);
    assert!(String::from_utf8(output)?.contains("'解決' should be translated as 'address' or 'solve'"));
    Ok(())
}

/// Test that an unreadable glossary aborts the run
#[test]
fn test_controllerCheck_withMissingGlossary_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(plain_config())?;
    let inputs = CheckInputs {
        glossary_path: temp_dir.path().join("missing.txt"),
        translation_path: common::create_figure_tmx(temp_dir.path(), "figures.tmx")?,
    };
    let mut output: Vec<u8> = Vec::new();

    assert!(controller.check(&inputs, &mut output).is_err());
    assert!(output.is_empty());
    Ok(())
}
