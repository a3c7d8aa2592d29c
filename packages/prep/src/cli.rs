//! Command-line interface for the prep tool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PrepConfig;
use crate::document::read_document;
use crate::error::Result;
use crate::output::{render, write_atomic, OutputFormat};
use crate::pipeline::{prepare_file, Preparer};
use crate::types::strip_number_prefix;

/// Encoding of the article-per-line files this tool writes.
const ARTICLE_LIST_ENCODING: &str = "utf-8";

/// Legalogic prep - Normalize constitution HTML and split it into articles.
#[derive(Parser)]
#[command(name = "legalogic-prep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input encoding label (default: windows-1252, or utf-8 for strip-prefix)
    #[arg(short, long, global = true)]
    pub encoding: Option<String>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Insert a space after periods glued to the next word
    #[arg(long, global = true)]
    pub repair_sentences: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a document and print its articles.
    Articles {
        /// Source HTML or text file
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a document's normalized text.
    Normalize {
        /// Source HTML or text file
        input: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the "ARTÍCULO <n>º.-" heading from each line of an article list.
    StripPrefix {
        /// Article-per-line file, as written by `articles`
        input: PathBuf,
    },
}

/// Run the CLI with already parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Articles {
            input,
            format,
            output,
        } => articles_command(&input, format, output.as_deref(), &config),
        Commands::Normalize { input, output } => {
            normalize_command(&input, output.as_deref(), &config)
        }
        Commands::StripPrefix { input } => {
            let encoding = cli.encoding.as_deref().unwrap_or(ARTICLE_LIST_ENCODING);
            strip_prefix_command(&input, encoding)
        }
    }
}

/// Merge the configuration file (if any) with command-line overrides.
fn load_config(cli: &Cli) -> Result<PrepConfig> {
    let mut config = match &cli.config {
        Some(path) => PrepConfig::from_yaml_file(path)?,
        None => PrepConfig::default(),
    };

    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }
    if cli.repair_sentences {
        config.repair_sentences = true;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the articles command.
fn articles_command(
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    config: &PrepConfig,
) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Preparing {}...", input.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let prepared = match prepare_file(input, config) {
        Ok(prepared) => prepared,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    let content = render(&prepared.articles, format, &prepared.source)?;
    emit(&content, output)?;

    eprintln!(
        "{} {} from {}",
        style("Articles:").bold(),
        style(prepared.articles.len()).cyan(),
        style(&prepared.source).green()
    );
    if prepared.articles.is_empty() {
        eprintln!(
            "  {}",
            style("No article markers found").yellow().bold()
        );
    }
    if let Some(path) = output {
        eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}

/// Execute the normalize command.
fn normalize_command(input: &Path, output: Option<&Path>, config: &PrepConfig) -> Result<()> {
    let preparer = Preparer::new(config)?;
    let raw = read_document(input, &config.encoding)?;
    let mut normalized = preparer.normalize(&raw);
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }

    emit(&normalized, output)?;
    if let Some(path) = output {
        eprintln!("{} {}", style("Saved to:").green().bold(), path.display());
    }
    Ok(())
}

/// Execute the strip-prefix command.
fn strip_prefix_command(input: &Path, encoding: &str) -> Result<()> {
    let text = read_document(input, encoding)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in text.lines() {
        writeln!(out, "{}", strip_number_prefix(line).trim_end())?;
    }
    out.flush()?;
    Ok(())
}

/// Write to `output` atomically, or to stdout.
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_atomic(path, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
