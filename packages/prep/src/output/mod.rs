//! Output generation for segmented articles.

mod wrap;
mod writer;

use clap::ValueEnum;

pub use wrap::{should_wrap_text, wrap_text, wrap_text_default};
pub use writer::{generate_json, generate_text, generate_yaml, render, write_atomic};

/// Output formats for the article list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One article per line.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
    /// YAML document with an `articles` sequence.
    Yaml,
}
