// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use mdtranslate::app_config::{self, Config, TranslationProvider};
use mdtranslate::app_controller::Controller;
use mdtranslate::bilingual::BilingualFormat;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Backend,
    #[value(name = "libretranslate")]
    LibreTranslate,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Backend => TranslationProvider::Backend,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

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

/// CLI Wrapper for BilingualFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormat {
    Translated,
    Simple,
    Details,
}

impl From<CliFormat> for BilingualFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Translated => BilingualFormat::Translated,
            CliFormat::Simple => BilingualFormat::Simple,
            CliFormat::Details => BilingualFormat::Details,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate Markdown documents (default command)
    Translate(TranslateArgs),

    /// Print the translatable fragments and table alignments of a document as JSON
    Extract {
        /// Markdown file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// List the languages offered by the translation provider
    Languages {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Generate shell completions for mdtranslate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that loads the configuration
#[derive(clap::Args, Debug, Clone)]
struct CommonArgs {
    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(clap::Args, Debug)]
struct TranslateArgs {
    /// Markdown file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Article title, translated along with the body (single file only)
    #[arg(long)]
    title: Option<String>,

    /// Output layout
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for the translated files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

/// mdtranslate - Markdown article translator
///
/// Translates the text of Markdown documents while keeping their structure:
/// code, links, images, tables and their alignments come out unchanged.
#[derive(Parser, Debug)]
#[command(name = "mdtranslate")]
#[command(version)]
#[command(about = "Structure-preserving Markdown translation")]
#[command(long_about = "mdtranslate translates the prose of Markdown documents and keeps everything else intact.

EXAMPLES:
    mdtranslate article.md                          # Translate using default config
    mdtranslate -f article.md                       # Force overwrite existing output
    mdtranslate -s es -t fr article.md              # Translate from Spanish to French
    mdtranslate --title 'Mi viaje' --format details article.md
    mdtranslate -p libretranslate docs/             # Translate a whole directory
    mdtranslate extract article.md                  # Show what would be translated
    mdtranslate languages -p libretranslate         # List provider languages
    mdtranslate completions bash > mdtranslate.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    backend         - Article translation backend (default: http://localhost:3000/api/translate)
    libretranslate  - LibreTranslate server (default: http://localhost:5000)
    mock            - Offline mock that tags every text with the target language")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Markdown file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Article title, translated along with the body (single file only)
    #[arg(long)]
    title: Option<String>,

    /// Output layout
    #[arg(long, value_enum)]
    format: Option<CliFormat>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Directory for the translated files (defaults to next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
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

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The filter is raised later through set_max_level
        metadata.level() <= self.level.max(log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "mdtranslate", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        Some(Commands::Extract { file, common }) => {
            let config = load_config(&common)?;
            let controller = Controller::with_config(config)?;
            let json = controller.extract_to_json(&file)?;
            println!("{}", json);
            Ok(())
        }
        Some(Commands::Languages { common }) => {
            let config = load_config(&common)?;
            let controller = Controller::with_config(config)?;
            for language in controller.list_languages().await? {
                if language.targets.is_empty() {
                    println!("{}\t{}", language.code, language.name);
                } else {
                    println!("{}\t{}\t-> {}", language.code, language.name, language.targets.join(", "));
                }
            }
            Ok(())
        }
        None => {
            // Bare `mdtranslate <INPUT_PATH>` behaves like `translate`
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let translate_args = TranslateArgs {
                input_path,
                source_language: cli.source_language,
                target_language: cli.target_language,
                title: cli.title,
                format: cli.format,
                force_overwrite: cli.force_overwrite,
                output_dir: cli.output_dir,
                common: cli.common,
            };
            run_translate(translate_args).await
        }
    }
}

/// Load the configuration file (writing a default one if missing), apply the
/// common CLI overrides and set the log level
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(cli_level) = &common.log_level {
        log::set_max_level(level_filter(&cli_level.clone().into()));
    }

    let config_path = Path::new(&common.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", common.config_path);
        let config = Config::default();
        config.save(config_path)
            .with_context(|| format!("Failed to write default config to file: {}", common.config_path))?;
        config
    };

    if let Some(provider) = &common.provider {
        config.translation.provider = provider.clone().into();
    }

    match &common.log_level {
        Some(cli_level) => config.log_level = cli_level.clone().into(),
        None => log::set_max_level(level_filter(&config.log_level)),
    }

    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(format) = &options.format {
        config.output.format = format.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.title.is_some() && options.input_path.is_dir() {
        warn!("--title is ignored when translating a directory");
    }

    info!(
        "Output format: {}",
        config.output.format
    );

    let controller = Controller::with_config(config)?;
    controller.run(
        options.input_path,
        options.output_dir,
        options.force_overwrite,
        options.title,
    ).await
}
