//! Core data types for segmented constitution text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::{ARTICLE_MARKER, ARTICLE_MARKER_UNACCENTED};
use crate::error::{PrepError, Result};

#[allow(clippy::expect_used)] // Default markers are fixed literals
static DEFAULT_HEADING: LazyLock<HeadingParser> = LazyLock::new(|| {
    HeadingParser::new(&[ARTICLE_MARKER, ARTICLE_MARKER_UNACCENTED])
        .expect("default heading pattern is valid")
});

/// Reads the `<marker> <n>º.-` heading at the start of an article.
#[derive(Debug, Clone)]
pub struct HeadingParser {
    /// Marker, number with optional ordinal suffix and sign, then the `.-`
    /// separator (possibly split as `. -`) and trailing space.
    prefix_pattern: Regex,
    /// Number right after the marker, e.g. "24" or "12 bis".
    number_pattern: Regex,
}

impl HeadingParser {
    /// Build a parser for headings starting with any of `markers`.
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self> {
        let mut markers: Vec<&str> = markers.iter().map(AsRef::<str>::as_ref).collect();
        if markers.is_empty() || markers.iter().any(|m| m.trim().is_empty()) {
            return Err(PrepError::InvalidConfig(
                "heading markers must not be empty".to_string(),
            ));
        }
        markers.sort_by_key(|m| std::cmp::Reverse(m.len()));
        let alternatives: Vec<String> = markers.iter().map(|m| regex::escape(m)).collect();
        let marker = alternatives.join("|");

        Ok(Self {
            prefix_pattern: Regex::new(&format!(
                r"^(?:{marker}) [0-9]+(?: (?:bis|ter|quater)\b)?º?.\s?-?\s*(?:.-)?"
            ))?,
            number_pattern: Regex::new(&format!(
                r"^(?:{marker})\s+([0-9]+)(?:\s*º)?(?:\s+(bis|ter|quater)\b)?"
            ))?,
        })
    }

    /// Remove the heading; text without one is returned unchanged.
    #[must_use]
    pub fn strip_prefix<'a>(&self, text: &'a str) -> &'a str {
        match self.prefix_pattern.find(text) {
            Some(m) => &text[m.end()..],
            None => text,
        }
    }

    /// Article number from the heading, with its ordinal suffix if any.
    #[must_use]
    pub fn number(&self, text: &str) -> Option<String> {
        let caps = self.number_pattern.captures(text)?;
        let digits = caps.get(1)?.as_str();
        match caps.get(2) {
            Some(suffix) => Some(format!("{digits} {}", suffix.as_str())),
            None => Some(digits.to_string()),
        }
    }
}

/// Remove the `ARTÍCULO <n>º.-` heading from an article.
///
/// Text that does not start with a heading is returned unchanged.
///
/// # Examples
/// ```
/// use legalogic_prep::types::strip_number_prefix;
///
/// assert_eq!(strip_number_prefix("ARTÍCULO 1º.- Costa Rica es una República"), "Costa Rica es una República");
/// assert_eq!(strip_number_prefix("ARTÍCULO 24.- Se garantiza"), "Se garantiza");
/// assert_eq!(strip_number_prefix("Sin encabezado"), "Sin encabezado");
/// ```
#[must_use]
pub fn strip_number_prefix(text: &str) -> &str {
    DEFAULT_HEADING.strip_prefix(text)
}

/// Extract the article number from a heading.
///
/// # Examples
/// ```
/// use legalogic_prep::types::parse_number;
///
/// assert_eq!(parse_number("ARTÍCULO 7º.- Los tratados"), Some("7".to_string()));
/// assert_eq!(parse_number("ARTÍCULO 12 bis.- Texto"), Some("12 bis".to_string()));
/// assert_eq!(parse_number("TITULO II"), None);
/// ```
#[must_use]
pub fn parse_number(text: &str) -> Option<String> {
    DEFAULT_HEADING.number(text)
}

/// A single article cut out of a normalized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// 1-based position in document order.
    pub index: usize,

    /// Article number from the heading, when one could be read.
    pub number: Option<String>,

    /// Full article text, heading included.
    pub text: String,

    /// Article text without the heading.
    pub body: String,
}

impl Article {
    /// Build an article from its segmented text, reading `ARTÍCULO` headings.
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self::with_heading(index, text, &DEFAULT_HEADING)
    }

    /// Build an article whose heading is read by `heading`.
    #[must_use]
    pub fn with_heading(index: usize, text: impl Into<String>, heading: &HeadingParser) -> Self {
        let text = text.into();
        let number = heading.number(&text);
        let body = heading.strip_prefix(&text).trim().to_string();
        Self {
            index,
            number,
            text,
            body,
        }
    }

    /// Label used in summaries and logs: the number if known, the position otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.number {
            Some(nr) => format!("Artículo {nr}"),
            None => format!("#{}", self.index),
        }
    }
}
