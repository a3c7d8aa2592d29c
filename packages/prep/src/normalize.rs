//! Markup removal and noise cleanup for published legal HTML.
//!
//! The constitution is published as hand-edited HTML. Stripping it to plain
//! text runs a fixed sequence of substitutions; later steps rely on earlier
//! ones (the footer phrase only becomes contiguous once tags are gone, and
//! sentence repair targets periods left touching the next word).

use regex::Regex;
use std::sync::LazyLock;

use crate::config::PrepConfig;
use crate::error::Result;

/// HTML comments, including ones spanning several lines. Non-greedy: a
/// greedy match would also delete every article between two comments.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

/// Any other tag. `[^>]` already crosses line boundaries.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// A period glued to the next word: not followed by whitespace, a digit or
/// another period. Matches "Texto.Otro" but not "Art. 5", "1.5" or "...".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GLUED_PERIOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([^\s\d.])").expect("valid regex"));

const NBSP_ENTITY: &str = "&nbsp;";
const NBSP_CHAR: char = '\u{00A0}';

#[allow(clippy::expect_used)] // Default footer phrase is a fixed literal
static DEFAULT_NORMALIZER: LazyLock<TextNormalizer> = LazyLock::new(|| {
    TextNormalizer::new(&PrepConfig::default()).expect("default footer pattern is valid")
});

/// Normalize text with the default settings.
///
/// # Examples
/// ```
/// use legalogic_prep::normalize::normalize;
///
/// assert_eq!(normalize("<p>ARTÍCULO 1º.-&nbsp;Uno.</p>"), "ARTÍCULO 1º.- Uno.");
/// ```
///
/// Sentence repair is opt-in:
/// ```
/// use legalogic_prep::config::PrepConfig;
/// use legalogic_prep::normalize::TextNormalizer;
///
/// let config = PrepConfig { repair_sentences: true, ..PrepConfig::default() };
/// let normalizer = TextNormalizer::new(&config).unwrap();
/// assert_eq!(normalizer.normalize("<p>Texto.Otro</p>"), "Texto. Otro");
/// assert_eq!(normalizer.normalize("Art. 5"), "Art. 5");
/// ```
pub fn normalize(raw_text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw_text)
}

/// Turns markup-laden legal text into plain text.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    footer_pattern: Regex,
    repair_sentences: bool,
}

impl TextNormalizer {
    /// Build a normalizer for the configured footer phrase.
    ///
    /// # Errors
    ///
    /// Returns `PrepError::InvalidConfig` if `config` fails validation.
    pub fn new(config: &PrepConfig) -> Result<Self> {
        config.validate()?;
        let footer_pattern = Regex::new(&format!(
            r"\s*{}\s*",
            regex::escape(&config.footer_phrase)
        ))?;

        Ok(Self {
            footer_pattern,
            repair_sentences: config.repair_sentences,
        })
    }

    /// Whether glued periods get a space inserted after them.
    #[must_use]
    pub fn repairs_sentences(&self) -> bool {
        self.repair_sentences
    }

    /// Run every cleanup step over `raw_text`.
    ///
    /// Pure and total. Running it on its own output changes nothing.
    pub fn normalize(&self, raw_text: &str) -> String {
        let text = COMMENT_PATTERN.replace_all(raw_text, "");
        let text = TAG_PATTERN.replace_all(&text, "");
        let text = text.replace(NBSP_ENTITY, " ");
        let text = text.replace(NBSP_CHAR, " ");
        let text = self.footer_pattern.replace_all(&text, "");

        let text = if self.repair_sentences {
            GLUED_PERIOD_PATTERN
                .replace_all(&text, ". ${1}")
                .into_owned()
        } else {
            text.into_owned()
        };

        tracing::debug!(
            input_len = raw_text.len(),
            output_len = text.len(),
            "Normalized text"
        );
        text
    }
}
