use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use libretto_config::{Config, OutputFormat};
use libretto_engine::{Document, read_libretto};
use log::LevelFilter;
use std::path::{Path, PathBuf};

mod summary;

use summary::Summary;

/// CLI wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "libretto", version)]
#[command(about = "Parse a timed libretto script and list its tracks")]
struct Cli {
    /// Libretto file to parse
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output format (defaults to the config file's, then text)
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Configuration file path (defaults to ~/.config/libretto/config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.log_level, config.log_level.as_deref());

    let format = cli.format.map(OutputFormat::from).unwrap_or(config.format);
    let path = config.resolve_input(&cli.input);
    log::info!("Parsing {}", path.display());
    let parsed = match read_libretto(&path) {
        Ok(parsed) => parsed,
        Err(err) => {
            // Render what was read before the failure, then report it.
            if let Some(partial) = err.partial() {
                print!("{}", render(&partial.document, format)?);
            }
            return Err(err)
                .with_context(|| format!("Failed to read libretto {}", path.display()));
        }
    };

    // Report the error, then still render whatever was parsed before it.
    if let Some(diagnostic) = &parsed.diagnostic {
        eprintln!("{diagnostic}");
    }

    print!("{}", render(&parsed.document, format)?);
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Default `warn`, then the config file's filter, then `RUST_LOG`, then `--log-level`.
fn init_logging(cli_level: Option<CliLogLevel>, config_filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if let Some(filter) = config_filter {
        builder.parse_filters(filter);
    }
    if let Ok(filter) = std::env::var(env_logger::DEFAULT_FILTER_ENV) {
        builder.parse_filters(&filter);
    }
    if let Some(level) = cli_level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn render(document: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(Summary(document).to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(document)?;
            json.push('\n');
            Ok(json)
        }
    }
}
