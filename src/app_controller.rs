use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::{normalize_extension, Config};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::terminology::{glossary, CheckSummary, Glossary, Reporter, TerminologyChecker, Translation};
use crate::tmx_parser::TmxParser;

// @module: Application controller for terminology checks

/// The two input files of a check, after classification by extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInputs {
    pub glossary_path: PathBuf,
    pub translation_path: PathBuf,
}

/// Counts from a batch conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Usage line naming the expected extensions
    pub fn usage(&self) -> String {
        format!(
            "Usage: termaudit <glossary.{}> <translation.{}>\n\
             The two files may be given in either order.",
            normalize_extension(&self.config.glossary_extension),
            normalize_extension(&self.config.translation_extension)
        )
    }

    /// Classify two command-line paths as glossary and translation by extension
    pub fn classify_arguments<P: AsRef<Path>>(&self, args: &[P]) -> Result<CheckInputs, AppError> {
        let [first, second] = args else {
            return Err(AppError::Invocation(format!(
                "expected 2 arguments, got {}",
                args.len()
            )));
        };
        let (first, second) = (first.as_ref(), second.as_ref());

        let glossary_ext = &self.config.glossary_extension;
        let translation_ext = &self.config.translation_extension;

        let (glossary_path, translation_path) = if FileManager::has_extension(first, glossary_ext)
            && FileManager::has_extension(second, translation_ext)
        {
            (first, second)
        } else if FileManager::has_extension(first, translation_ext)
            && FileManager::has_extension(second, glossary_ext)
        {
            (second, first)
        } else {
            return Err(AppError::Invocation(format!(
                "need one .{} glossary and one .{} translation, got {:?} and {:?}",
                normalize_extension(glossary_ext),
                normalize_extension(translation_ext),
                first,
                second
            )));
        };

        Ok(CheckInputs {
            glossary_path: glossary_path.to_path_buf(),
            translation_path: translation_path.to_path_buf(),
        })
    }

    /// Read and normalize a glossary file
    pub fn load_glossary<P: AsRef<Path>>(&self, path: P) -> Result<Glossary> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::File(format!("Glossary file does not exist: {:?}", path)).into());
        }

        let lines = FileManager::read_lines(path)?;
        let glossary = glossary::normalize(&lines, &self.config.glossary);
        debug!(
            "Loaded glossary {:?}: {} lines, {} source terms, {} target terms",
            path,
            lines.len(),
            glossary.len(),
            glossary.target_count()
        );
        if glossary.is_empty() {
            warn!("Glossary {:?} has no valid entries", path);
        }
        Ok(glossary)
    }

    /// Read and parse a translation file
    pub fn load_translation<P: AsRef<Path>>(&self, path: P) -> Result<Translation> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(AppError::File(format!("Translation file does not exist: {:?}", path)).into());
        }

        let translation = TmxParser::parse_file(path)?;
        if let (Some(source), Some(target)) = (&translation.source_language, &translation.target_language) {
            info!(
                "Translation {:?}: {} → {}",
                path.file_name().unwrap_or_default(),
                language_utils::describe_language(source),
                language_utils::describe_language(target)
            );
        }
        Ok(translation)
    }

    /// Check a translation against a glossary and write the report to `writer`
    pub fn check<W: Write>(&self, inputs: &CheckInputs, writer: &mut W) -> Result<CheckSummary> {
        let glossary = self.load_glossary(&inputs.glossary_path)?;
        let mut translation = self.load_translation(&inputs.translation_path)?;

        let matching = &self.config.matching;
        let lemmatizer = matching.morphology.then(|| matching.engine.build());
        let checker = TerminologyChecker::new(&glossary, lemmatizer.as_deref(), self.config.check_options());
        let summary = checker.run(&mut translation);

        let reporter = Reporter::new(self.config.output.format, self.config.output.color);
        reporter.write_to(writer, &translation, &summary)?;

        info!(
            "{} segments checked, {} flagged, {} glossary entries",
            summary.segments_total, summary.segments_flagged, summary.glossary_entries
        );
        Ok(summary)
    }

    /// Run a check and print the report to stdout
    pub fn run_check(&self, inputs: &CheckInputs) -> Result<CheckSummary> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.check(inputs, &mut handle)
    }

    /// Convert one TMX file into a tab-delimited text file
    ///
    /// Returns the output path, or `None` when the output exists and
    /// `force_overwrite` is off.
    pub fn convert_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input_file: P1,
        output_dir: P2,
        force_overwrite: bool,
    ) -> Result<Option<PathBuf>> {
        let input_file = input_file.as_ref();
        let output_path = FileManager::generate_output_path(
            input_file,
            output_dir,
            normalize_extension(&self.config.glossary_extension),
        );

        if FileManager::file_exists(&output_path) && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_path);
            return Ok(None);
        }

        let translation = self.load_translation(input_file)?;
        FileManager::write_to_file(&output_path, &TmxParser::to_tab_delimited(&translation))
            .with_context(|| format!("Failed to write converted file for {:?}", input_file))?;

        info!("Converted {:?} ({} segments) → {:?}", input_file, translation.len(), output_path);
        Ok(Some(output_path))
    }

    /// Convert every TMX file under a directory
    ///
    /// Each output goes next to its input, or under `output_dir` at the same
    /// relative location. A file that fails is logged and counted; the rest
    /// are still converted.
    pub fn convert_folder<P: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<ConversionSummary> {
        let input_dir = input_dir.as_ref();
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let tmx_files = FileManager::find_files(input_dir, &self.config.translation_extension)?;
        if tmx_files.is_empty() {
            warn!("No .{} files found in directory: {:?}", normalize_extension(&self.config.translation_extension), input_dir);
        }

        let mut summary = ConversionSummary::default();
        for tmx_file in &tmx_files {
            let parent = tmx_file.parent().unwrap_or(input_dir);
            let target_dir = match output_dir {
                Some(out) => out.join(parent.strip_prefix(input_dir).unwrap_or(Path::new(""))),
                None => parent.to_path_buf(),
            };

            match self.convert_file(tmx_file, &target_dir, force_overwrite) {
                Ok(Some(_)) => summary.converted += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    error!("Error converting {:?}: {:#}", tmx_file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished converting {} files: {} converted, {} skipped, {} failed",
            tmx_files.len(),
            summary.converted,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }
}
