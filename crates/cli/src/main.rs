use agentic_chunker::{render, ChunkView, Chunker, LogObserver};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;

mod http_oracle;
mod input;
mod settings;

use http_oracle::HttpOracle;
use settings::Settings;

#[derive(Parser)]
#[command(name = "agentic-chunk")]
#[command(about = "Group propositions into titled, summarized chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Propositions file: one per line, or a JSON array of strings (.json). Defaults to stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Treat the input as a JSON array regardless of file extension
    #[arg(long)]
    json_input: bool,

    /// TOML config with [chunker] and [oracle] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Override the completion API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the model name
    #[arg(long)]
    model: Option<String>,

    /// Environment variable holding the API key
    #[arg(long)]
    api_key_env: Option<String>,

    /// Keep titles and summaries from chunk creation
    #[arg(long)]
    no_regenerate: bool,

    /// Length of generated chunk ids
    #[arg(long)]
    id_length: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Every chunk with its propositions
    Pretty,
    /// Chunk ids, titles and summaries
    Outline,
    /// Keyed chunk structure as JSON
    Json,
    /// One joined string per chunk, as a JSON array
    Strings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli)
}

fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper are noisy at debug level
    if !verbose {
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli);

    let raw = input::read_source(cli.input.as_deref())?;
    let json = input::is_json_input(cli.input.as_deref(), cli.json_input);
    let propositions = input::parse_propositions(&raw, json)?;
    if propositions.is_empty() {
        bail!("No propositions found in input");
    }

    let key_var = &settings.oracle.api_key_env;
    let api_key = env::var(key_var)
        .with_context(|| format!("Environment variable {key_var} is not set"))?;
    let oracle = HttpOracle::new(&settings.oracle, api_key)?;

    let mut chunker = Chunker::with_config(oracle, settings.chunker)
        .context("Invalid chunker configuration")?
        .with_observer(LogObserver);

    log::info!("Chunking {} propositions", propositions.len());
    chunker
        .add_propositions(propositions)
        .context("Chunking aborted")?;

    println!("{}", render_output(&chunker, cli.format)?);
    Ok(())
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        settings.oracle.base_url = base_url.clone();
    }
    if let Some(model) = &cli.model {
        settings.oracle.model = model.clone();
    }
    if let Some(var) = &cli.api_key_env {
        settings.oracle.api_key_env = var.clone();
    }
    if cli.no_regenerate {
        settings.chunker.regenerate_metadata = false;
    }
    if let Some(len) = cli.id_length {
        settings.chunker.id_length = len;
    }
}

fn render_output<O: agentic_chunker::Oracle>(
    chunker: &Chunker<O>,
    format: OutputFormat,
) -> Result<String> {
    let text = match format {
        OutputFormat::Pretty => render::pretty_chunks(chunker.store()),
        OutputFormat::Outline => render::pretty_outline(chunker.store()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&chunker.get_chunks(ChunkView::Keyed))?
        }
        OutputFormat::Strings => {
            serde_json::to_string_pretty(&chunker.get_chunks(ChunkView::ListOfStrings))?
        }
    };
    Ok(text)
}
