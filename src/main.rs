// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, ExportFormat};
use crate::context_processor::ContextCollection;
use crate::export::GroupingPolicy;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod context_processor;
mod errors;
mod export;
mod file_utils;

/// CLI Wrapper for GroupingPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGroupingPolicy {
    Keyword,
    Lemma,
    Initial,
    Location,
}

impl From<CliGroupingPolicy> for GroupingPolicy {
    fn from(cli_policy: CliGroupingPolicy) -> Self {
        match cli_policy {
            CliGroupingPolicy::Keyword => GroupingPolicy::Keyword,
            CliGroupingPolicy::Lemma => GroupingPolicy::Lemma,
            CliGroupingPolicy::Initial => GroupingPolicy::Initial,
            CliGroupingPolicy::Location => GroupingPolicy::Location,
        }
    }
}

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Xml,
    Json,
    Contexts,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Xml => ExportFormat::Xml,
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Contexts => ExportFormat::Contexts,
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a KWIC index from context XML files (default command)
    Export(ExportArgs),

    /// Validate a context XML file and report its contents
    Validate {
        /// Context XML file to validate
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for kwicindex
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input context XML file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Grouping policy for sublist aggregation
    #[arg(short, long, value_enum)]
    grouping: Option<CliGroupingPolicy>,

    /// Output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliExportFormat>,

    /// Sort contexts by keyword, location and number before aggregation
    #[arg(short, long)]
    sort: bool,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// kwicindex - KWIC index export for annotated corpus contexts
///
/// A batch tool that reads context XML files (keyword-in-context records
/// with lemma and part of speech annotations) and writes keyword-in-context
/// index documents as XML or JSON.
#[derive(Parser, Debug)]
#[command(name = "kwicindex")]
#[command(author = "kwicindex contributors")]
#[command(version = "1.0.0")]
#[command(about = "KWIC index export tool for annotated corpus contexts")]
#[command(long_about = "kwicindex reads context XML files and exports keyword-in-context index documents.

EXAMPLES:
    kwicindex contexts.xml                      # Export using default config
    kwicindex -f contexts.xml                   # Force overwrite existing files
    kwicindex -g lemma contexts.xml             # Group sublists by lemma
    kwicindex -F json contexts.xml              # Write the index as JSON
    kwicindex -F contexts contexts.xml          # Write the flat context list
    kwicindex -s contexts.xml                   # Sort by keyword before grouping
    kwicindex --log-level debug /corpus/        # Process entire directory with debug logging
    kwicindex validate contexts.xml             # Check a context file without exporting
    kwicindex completions bash > kwicindex.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

GROUPING POLICIES:
    keyword   - one sublist per distinct keyword (default)
    lemma     - one sublist per lemma name, keyword for unannotated contexts
    initial   - one sublist per first letter of the keyword
    location  - one sublist per document segment of the location")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input context XML file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Grouping policy for sublist aggregation
    #[arg(short, long, value_enum)]
    grouping: Option<CliGroupingPolicy>,

    /// Output format
    #[arg(short = 'F', long, value_enum)]
    format: Option<CliExportFormat>,

    /// Sort contexts by keyword, location and number before aggregation
    #[arg(short, long)]
    sort: bool,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "kwicindex", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Validate { input_path }) => run_validate(&input_path),
        Some(Commands::Export(args)) => run_export(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let export_args = ExportArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                grouping: cli.grouping,
                format: cli.format,
                sort: cli.sort,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_export(export_args)
        }
    }
}

fn run_export(options: ExportArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(grouping) = &options.grouping {
            config.grouping = grouping.clone().into();
        }

        if let Some(format) = &options.format {
            config.export.format = format.clone().into();
        }

        if options.sort {
            config.export.sort = true;
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(grouping) = &options.grouping {
            config.grouping = grouping.clone().into();
        }

        if let Some(format) = &options.format {
            config.export.format = format.clone().into();
        }

        if options.sort {
            config.export.sort = true;
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(to_level_filter(&config.log_level));
    }

    // Create controller
    let controller = Controller::with_config(config)?;

    // Run the controller with the input file(s) and output directory
    if options.input_path.is_file() {
        // Process a single file
        let output_dir = options.output_dir.clone().unwrap_or_else(|| {
            options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf()
        });
        controller.run(options.input_path.clone(), output_dir, options.force_overwrite)?;
    } else if options.input_path.is_dir() {
        // Process a directory
        controller.run_folder(options.input_path.clone(), options.force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

// Helper function to implement the validate subcommand
fn run_validate(input_file: &Path) -> Result<()> {
    if !input_file.exists() {
        return Err(anyhow!("Input file does not exist: {:?}", input_file));
    }

    info!("Validating context file: {:?}", input_file);

    let collection = ContextCollection::read_from_xml(input_file)?;

    info!(
        "Valid context file: {} entries, {} distinct keywords",
        collection.entries.len(),
        collection.distinct_keyword_count()
    );

    Ok(())
}

// Helper function to map config log levels to the log crate filter
fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
