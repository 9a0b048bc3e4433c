// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use viewlingo::app_config::{Config, LogLevel};
use viewlingo::language_utils;
use viewlingo::packs::{LanguagePackRegistry, PackStatus};
use viewlingo::providers::MockSessionProvider;
use viewlingo::recognition::{ImageFrame, MockRecognizer, RecognitionBuffer};
use viewlingo::translation::TranslationOrchestrator;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate texts, or the text recognized in a test scene
    Translate(TranslateArgs),

    /// Refresh and print the language pack status of every pair
    Packs,

    /// Detect the language of each text
    Detect {
        /// Texts to inspect
        #[arg(value_name = "TEXT", required = true)]
        texts: Vec<String>,
    },

    /// Generate shell completions for viewlingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Texts to translate; when omitted the texts come from `--scene`
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,

    /// Source language code (e.g., 'en', 'ko'); detected per text when omitted
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code; defaults to the configured target
    #[arg(short, long)]
    target_language: Option<String>,

    /// Mock camera scene to recognize (test_english, test_mixed, test_low_quality)
    #[arg(long, default_value = "test_english")]
    scene: String,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// ViewLingo - camera translation core
///
/// Coordinates translation of text recognized in camera frames: language pack
/// availability, one session per language pair, and a shared cache.
#[derive(Parser, Debug)]
#[command(name = "viewlingo")]
#[command(version)]
#[command(about = "Camera translation session and cache coordinator")]
#[command(long_about = "ViewLingo coordinates on-device translation of recognized camera text.

EXAMPLES:
    viewlingo translate -s en -t ja \"Good morning\" \"Thank you\"
    viewlingo translate --scene test_english -t es
    viewlingo detect \"Bonjour\" \"안녕하세요\"
    viewlingo packs
    viewlingo completions bash > viewlingo.bash

CONFIGURATION:
    Configuration is read from conf.json by default. A missing file falls back
    to the built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI colour and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
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
            let (colour, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "viewlingo", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    config.validate().context("Configuration validation failed")?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Translate(args) => run_translate(&config, args).await,
        Commands::Packs => run_packs(&config).await,
        Commands::Detect { texts } => run_detect(&config, &texts),
        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_translate(config: &Config, args: TranslateArgs) -> Result<()> {
    let target = args
        .target_language
        .unwrap_or_else(|| config.default_target_language.clone())
        .to_lowercase();
    if !language_utils::is_valid_language_code(&target) {
        return Err(anyhow!("Invalid target language code: {}", target));
    }
    let source = args.source_language.map(|code| code.to_lowercase());

    let (registry, _installed) = LanguagePackRegistry::from_config(config);
    let registry = Arc::new(registry);
    registry.check_all_statuses().await;

    let orchestrator = TranslationOrchestrator::from_config(config, registry.clone())
        .with_provider(Arc::new(MockSessionProvider::working()));

    // Sessions are prepared up front, as the app does when the target changes
    let sources: Vec<String> = match &source {
        Some(code) => vec![code.clone()],
        None => registry.supported_languages().to_vec(),
    };
    for code in &sources {
        if code != &target && !orchestrator.prepare_session(code, &target).await {
            warn!("Language pair {}->{} is not available", code, target);
        }
    }

    let (translations, report) = if args.texts.is_empty() {
        let recognizer = Arc::new(MockRecognizer::scripted());
        let buffer = RecognitionBuffer::new(recognizer, &config.recognition);
        let frame = ImageFrame::new(1920, 1080, Vec::<u8>::new()).with_label(args.scene.clone());

        let outcome = buffer.process_image(&frame).await;
        info!("Recognized scene '{}': {:?}", args.scene, outcome);

        let texts = buffer.detected_texts();
        orchestrator
            .translate_texts_with_report(&texts, &target, source.as_deref())
            .await
    } else {
        orchestrator
            .translate_texts_with_report(&args.texts, &target, source.as_deref())
            .await
    };

    if args.json {
        let output = serde_json::json!({
            "target_language": target,
            "translations": translations,
            "report": report,
        });
        let rendered = serde_json::to_string_pretty(&output).context("Failed to serialize result to JSON")?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut entries: Vec<_> = translations.into_iter().collect();
    entries.sort();
    for (text, translation) in entries {
        println!("{} => {}", text, translation);
    }
    info!("{}", report);

    Ok(())
}

async fn run_packs(config: &Config) -> Result<()> {
    let (registry, _installed) = LanguagePackRegistry::from_config(config);
    registry.check_all_statuses().await;

    for pair in registry.supported_pairs() {
        let status = registry.status(&pair.source, &pair.target);
        let marker = if status == PackStatus::Available { "✓" } else { "✗" };
        println!("{} {:<8} {}", marker, pair.to_string(), status);
    }

    Ok(())
}

fn run_detect(config: &Config, texts: &[String]) -> Result<()> {
    let (registry, _installed) = LanguagePackRegistry::from_config(config);
    let orchestrator = TranslationOrchestrator::from_config(config, Arc::new(registry));

    for text in texts {
        match orchestrator.detect_language(text) {
            Some(code) => {
                let name = language_utils::get_language_name(&code).unwrap_or_else(|_| code.clone());
                println!("{} => {} ({})", text, code, name);
            }
            None => println!("{} => unknown", text),
        }
    }

    Ok(())
}
