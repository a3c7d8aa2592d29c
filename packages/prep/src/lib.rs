//! Legalogic prep - Turn published constitution HTML into per-article text.
//!
//! The source document is legacy-encoded HTML. This crate decodes it, strips
//! markup and site boilerplate, and splits what remains into articles ready
//! for sentence splitting, tagging or parsing by an external NLP pipeline.
//!
//! # Example
//!
//! ```
//! use legalogic_prep::{normalize, segment};
//!
//! let raw = "<!--c--><p>ARTÍCULO 1º.- Uno.</p>\nARTÍCULO 2º.- Dos.\nTITULO II";
//! let articles = segment(&normalize(raw));
//! assert_eq!(articles, vec!["ARTÍCULO 1º.- Uno. ", "ARTÍCULO 2º.- Dos. "]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Marker constants and the YAML configuration file
//! - [`error`]: Error types and Result alias
//! - [`document`]: Reading and decoding legacy-encoded input
//! - [`normalize`]: Markup and noise removal
//! - [`segment`]: Article segmentation
//! - [`types`]: Article type and heading parsing
//! - [`pipeline`]: Decode, normalize and segment in one call
//! - [`output`]: Text, JSON and YAML rendering
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod types;

pub use config::PrepConfig;
pub use error::{PrepError, Result};
pub use normalize::{normalize, TextNormalizer};
pub use pipeline::{prepare_file, PreparedDocument, Preparer};
pub use segment::{segment, ArticleSegmenter};
pub use types::{parse_number, strip_number_prefix, Article, HeadingParser};
