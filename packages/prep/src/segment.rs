//! Splitting normalized text into articles.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::PrepConfig;
use crate::error::Result;
use crate::types::{Article, HeadingParser};

#[allow(clippy::expect_used)] // Default markers are fixed literals
static DEFAULT_SEGMENTER: LazyLock<ArticleSegmenter> = LazyLock::new(|| {
    ArticleSegmenter::new(&PrepConfig::default()).expect("default marker pattern is valid")
});

/// Segment text with the default markers.
///
/// # Examples
/// ```
/// use legalogic_prep::segment::segment;
///
/// let articles = segment("CONSTITUCIÓN\nARTÍCULO 1º.- Uno.\nARTÍCULO 2º.- Dos.\nTITULO II");
/// assert_eq!(articles, vec!["ARTÍCULO 1º.- Uno. ", "ARTÍCULO 2º.- Dos. "]);
/// assert!(segment("sin artículos").is_empty());
/// ```
pub fn segment(normalized_text: &str) -> Vec<String> {
    DEFAULT_SEGMENTER.segment(normalized_text)
}

/// Splits normalized text at article markers.
///
/// Each article runs from its marker to the next marker, or to the first
/// section marker inside it, whichever comes first. Text before the first
/// marker is dropped.
#[derive(Debug, Clone)]
pub struct ArticleSegmenter {
    marker_pattern: Regex,
    canonical_marker: String,
    section_marker: String,
    heading: HeadingParser,
}

impl ArticleSegmenter {
    /// Build a segmenter for the configured markers.
    ///
    /// # Errors
    ///
    /// Returns `PrepError::InvalidConfig` if `config` fails validation.
    pub fn new(config: &PrepConfig) -> Result<Self> {
        config.validate()?;

        // Longest first, so a marker that extends another one wins.
        let mut markers: Vec<&str> = config.article_markers.iter().map(String::as_str).collect();
        markers.sort_by_key(|m| std::cmp::Reverse(m.len()));
        let alternatives: Vec<String> = markers.iter().map(|m| regex::escape(m)).collect();
        let marker_pattern = Regex::new(&alternatives.join("|"))?;

        Ok(Self {
            marker_pattern,
            canonical_marker: config.canonical_marker.clone(),
            section_marker: config.section_marker.clone(),
            heading: HeadingParser::new(&[config.canonical_marker.as_str()])?,
        })
    }

    /// Number of article markers in `normalized_text` once lines are joined.
    #[must_use]
    pub fn count_markers(&self, normalized_text: &str) -> usize {
        self.marker_pattern
            .find_iter(&join_lines(normalized_text))
            .count()
    }

    /// Split `normalized_text` into article strings in document order.
    pub fn segment(&self, normalized_text: &str) -> Vec<String> {
        let joined = join_lines(normalized_text);

        let articles: Vec<String> = self
            .marker_pattern
            .split(&joined)
            .skip(1)
            .map(|piece| {
                let piece = match piece.find(self.section_marker.as_str()) {
                    Some(pos) => &piece[..pos],
                    None => piece,
                };
                format!("{}{piece}", self.canonical_marker)
            })
            .collect();

        if articles.is_empty() {
            tracing::warn!("No article markers found in text");
        } else {
            tracing::debug!(count = articles.len(), "Segmented articles");
        }
        articles
    }

    /// Split `normalized_text` into numbered [`Article`] values.
    ///
    /// Headings are read with the canonical marker every article starts with.
    pub fn articles(&self, normalized_text: &str) -> Vec<Article> {
        self.segment(normalized_text)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Article::with_heading(i + 1, text, &self.heading))
            .collect()
    }
}

fn join_lines(text: &str) -> String {
    text.replace('\n', " ")
}
