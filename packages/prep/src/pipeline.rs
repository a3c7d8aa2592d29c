//! Preparation pipeline that ties decoding, normalization and segmentation together.

use std::path::Path;

use crate::config::PrepConfig;
use crate::document::read_document;
use crate::error::Result;
use crate::normalize::TextNormalizer;
use crate::segment::ArticleSegmenter;
use crate::types::Article;

/// A source document after normalization and segmentation.
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Where the text came from, for output metadata.
    pub source: String,

    /// Normalized text, newlines kept.
    pub normalized: String,

    /// Articles in document order.
    pub articles: Vec<Article>,
}

/// Normalizer and segmenter built from one configuration.
#[derive(Debug, Clone)]
pub struct Preparer {
    normalizer: TextNormalizer,
    segmenter: ArticleSegmenter,
}

impl Preparer {
    /// Build both stages from `config`; each validates it.
    pub fn new(config: &PrepConfig) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new(config)?,
            segmenter: ArticleSegmenter::new(config)?,
        })
    }

    /// Normalize raw text.
    pub fn normalize(&self, raw_text: &str) -> String {
        self.normalizer.normalize(raw_text)
    }

    /// Normalize and segment already decoded text.
    pub fn prepare_text(&self, raw_text: &str, source: impl Into<String>) -> PreparedDocument {
        let normalized = self.normalizer.normalize(raw_text);
        let articles = self.segmenter.articles(&normalized);
        PreparedDocument {
            source: source.into(),
            normalized,
            articles,
        }
    }
}

/// Read, decode, normalize and segment a file.
///
/// # Arguments
/// * `path` - Source HTML or text file
/// * `config` - Encoding, markers and cleanup settings
///
/// # Returns
/// The prepared document; an empty article list when no markers were found
pub fn prepare_file<P: AsRef<Path>>(path: P, config: &PrepConfig) -> Result<PreparedDocument> {
    let path = path.as_ref();
    let preparer = Preparer::new(config)?;
    let raw = read_document(path, &config.encoding)?;

    let prepared = preparer.prepare_text(&raw, path.display().to_string());
    for article in &prepared.articles {
        tracing::debug!(article = %article.label(), chars = article.text.chars().count(), "Article");
    }
    tracing::info!(
        source = %prepared.source,
        articles = prepared.articles.len(),
        "Prepared document"
    );
    Ok(prepared)
}
