// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, CredentialStore, GEMINI_MODELS};
use crate::app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod providers;
mod repair;
mod subtitle_processor;
mod translation;

/// CLI wrapper for TargetLanguage to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTargetLanguage {
    Vi,
    En,
    Fr,
    Es,
}

impl From<CliTargetLanguage> for app_config::TargetLanguage {
    fn from(cli_language: CliTargetLanguage) -> Self {
        match cli_language {
            CliTargetLanguage::Vi => app_config::TargetLanguage::Vi,
            CliTargetLanguage::En => app_config::TargetLanguage::En,
            CliTargetLanguage::Fr => app_config::TargetLanguage::Fr,
            CliTargetLanguage::Es => app_config::TargetLanguage::Es,
        }
    }
}

/// CLI wrapper for TranslationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationMode {
    SmoothHumorous,
    Fast,
}

impl From<CliTranslationMode> for app_config::TranslationMode {
    fn from(cli_mode: CliTranslationMode) -> Self {
        match cli_mode {
            CliTranslationMode::SmoothHumorous => app_config::TranslationMode::SmoothHumorous,
            CliTranslationMode::Fast => app_config::TranslationMode::Fast,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
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

fn level_filter(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check and repair subtitle timestamps without translating
    Fix(FixArgs),

    /// Repair timestamps and translate subtitles with Gemini
    Translate(TranslateArgs),

    /// Save the Gemini API key to the credential store
    SetKey {
        /// The API key to persist
        key: String,
    },

    /// Generate shell completions for srtran
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct FixArgs {
    /// Input .srt file
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output file path (default: <input>.fixed.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .srt file
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output file path (default: <input>.<lang>.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target language
    #[arg(short, long, value_enum)]
    target_language: Option<CliTargetLanguage>,

    /// Translation mode
    #[arg(short, long, value_enum)]
    mode: Option<CliTranslationMode>,

    /// Gemini model name (e.g. gemini-2.0-flash)
    #[arg(long)]
    model: Option<String>,

    /// Maximum subtitle entries per translation batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Gemini API key (overrides the credential store)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// srtran - SRT subtitle repair and AI translation
#[derive(Parser, Debug)]
#[command(name = "srtran")]
#[command(version = "0.1.0")]
#[command(about = "Repair SRT timing and translate subtitles with Gemini")]
#[command(long_about = "srtran loads SubRip (.srt) subtitle files, repairs overlapping or invalid \
timestamps, and translates the text in batches using the Google Gemini API.

EXAMPLES:
    srtran fix movie.srt                        # Repair timestamps only
    srtran translate movie.srt                  # Translate using default config
    srtran translate -t fr -m fast movie.srt    # French, fast mode
    srtran translate --model gemini-1.5-pro movie.srt
    srtran set-key YOUR_API_KEY                 # Persist the API key
    srtran completions bash > srtran.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The API key is never stored in the config
    file; use `srtran set-key` or the GEMINI_API_KEY environment variable.

SUPPORTED MODELS:
    gemini-2.0-flash (default), gemini-1.5-flash, gemini-1.5-pro")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default;
    // the level is updated after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtran", &mut std::io::stdout());
            Ok(())
        }
        Commands::SetKey { key } => {
            let store = CredentialStore::default_store()?;
            store.save(&key)?;
            log::info!("API key saved to the credential store.");
            Ok(())
        }
        Commands::Fix(args) => run_fix(args),
        Commands::Translate(args) => run_translate(args).await,
    }
}

/// Load configuration from a file (creating a default one when missing)
/// and apply the CLI log level.
fn load_config(config_path: &str, cmd_log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    if let Some(log_level) = cmd_log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(level_filter(config.log_level));

    Ok(config)
}

fn run_fix(args: FixArgs) -> Result<()> {
    let config = load_config(&args.config_path, args.log_level)?;

    let controller = Controller::with_config(config);
    controller.fix(&args.input_file, args.output)?;

    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = load_config(&args.config_path, args.log_level)?;

    // Override config with CLI options if provided
    if let Some(target_language) = args.target_language {
        config.target_language = target_language.into();
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(batch_size) = args.batch_size {
        config.max_entries_per_batch = batch_size;
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    if !GEMINI_MODELS.contains(&config.model.as_str()) {
        warn!("Model '{}' is not a known Gemini model; continuing anyway.", config.model);
    }

    // Resolve the API key before any network activity
    let store = CredentialStore::default_store()?;
    let api_key = store.resolve(args.api_key)?;

    let controller = Controller::with_config(config);
    controller
        .translate(&args.input_file, args.output, api_key)
        .await?;

    Ok(())
}
