// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use termaudit::app_config::{self, Config};
use termaudit::app_controller::Controller;
use termaudit::file_utils::FileManager;
use termaudit::terminology::{LemmatizerEngine, MatchPolicy, ReportFormat};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ReportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliReportFormat {
    Text,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(cli_format: CliReportFormat) -> Self {
        match cli_format {
            CliReportFormat::Text => ReportFormat::Text,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// CLI Wrapper for MatchPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMatchPolicy {
    Presence,
    OccurrenceCount,
}

impl From<CliMatchPolicy> for MatchPolicy {
    fn from(cli_policy: CliMatchPolicy) -> Self {
        match cli_policy {
            CliMatchPolicy::Presence => MatchPolicy::Presence,
            CliMatchPolicy::OccurrenceCount => MatchPolicy::OccurrenceCount,
        }
    }
}

/// CLI Wrapper for LemmatizerEngine to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLemmatizerEngine {
    Rules,
    Snowball,
}

impl From<CliLemmatizerEngine> for LemmatizerEngine {
    fn from(cli_engine: CliLemmatizerEngine) -> Self {
        match cli_engine {
            CliLemmatizerEngine::Rules => LemmatizerEngine::Rules,
            CliLemmatizerEngine::Snowball => LemmatizerEngine::Snowball,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a TMX translation against a glossary (default command)
    Check(CheckArgs),

    /// Convert TMX files into tab-delimited text files
    Convert(ConvertArgs),

    /// Generate shell completions for termaudit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Glossary file and translation file, in either order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<CliReportFormat>,

    /// How the literal stage judges target terms
    #[arg(long, value_enum)]
    policy: Option<CliMatchPolicy>,

    /// Lemmatizer for the morphological stage
    #[arg(long, value_enum)]
    engine: Option<CliLemmatizerEngine>,

    /// Skip the morphological stage
    #[arg(long)]
    no_morphology: bool,

    /// Skip the hyphenation notes
    #[arg(long)]
    no_hyphenation: bool,

    /// Lowercase glossary entries before grouping
    #[arg(long)]
    fold_case: bool,

    /// Disable ANSI colours in the text report
    #[arg(long)]
    no_color: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// TMX file or directory to convert
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for the converted files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// termaudit - terminology compliance checker for TMX translations
#[derive(Parser, Debug)]
#[command(name = "termaudit")]
#[command(version)]
#[command(about = "Check a TMX translation against a terminology glossary")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "termaudit flags translation segments where a glossary source term appears
but none of its approved target renderings does.

EXAMPLES:
    termaudit glossary.txt job.tmx              # Check using default config
    termaudit job.tmx glossary.txt              # Same, arguments in either order
    termaudit check --format json glossary.txt job.tmx
    termaudit check --policy occurrence-count glossary.txt job.tmx
    termaudit convert job.tmx                   # Write job.txt next to job.tmx
    termaudit convert -o out/ /projects/        # Convert every TMX file under a directory
    termaudit completions bash > termaudit.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: CheckArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept every level; the effective level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "termaudit", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check(args)) => run_check(args),
        Some(Commands::Convert(args)) => run_convert(args),
        None => run_check(cli.check),
    }
}

// @loads: Configuration from file, creating a default one if missing
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    // Apply a command-line log level before anything is logged
    if let Some(level) = &log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.into());
    }

    let (mut config, created) = Config::load_or_create(config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    if created {
        warn!("Config file not found at '{}', created default config.", config_path);
    }

    match log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.into()),
    }

    Ok(config)
}

fn run_check(options: CheckArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level)?;

    // Override config with CLI options if provided
    if let Some(format) = options.format {
        config.output.format = format.into();
    }
    if let Some(policy) = options.policy {
        config.matching.policy = policy.into();
    }
    if let Some(engine) = options.engine {
        config.matching.engine = engine.into();
    }
    if options.no_morphology {
        config.matching.morphology = false;
    }
    if options.no_hyphenation {
        config.matching.hyphenation = false;
    }
    if options.fold_case {
        config.glossary.fold_case = true;
    }
    if options.no_color {
        config.output.color = false;
    }

    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    let inputs = match controller.classify_arguments(&options.files) {
        Ok(inputs) => inputs,
        Err(e) => {
            warn!("{}", e);
            println!("{}", controller.usage());
            return Ok(());
        }
    };

    let summary = controller.run_check(&inputs)?;
    if summary.has_errors() {
        info!("{} terminology errors found", summary.missing_terms);
    }
    Ok(())
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    let config = load_config(&options.config_path, options.log_level)?;
    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    let input_path = &options.input_path;
    if FileManager::file_exists(input_path) {
        let output_dir = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => input_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default(),
        };
        controller.convert_file(input_path, output_dir, options.force_overwrite)?;
    } else if FileManager::dir_exists(input_path) {
        let summary = controller.convert_folder(
            input_path,
            options.output_dir.as_deref(),
            options.force_overwrite,
        )?;
        if summary.failed > 0 {
            return Err(anyhow!("{} files could not be converted", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
