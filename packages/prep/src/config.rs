//! Configuration constants and the optional YAML configuration file.

use std::fs;
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::{PrepError, Result};

/// Encoding of the published constitution HTML.
pub const DEFAULT_ENCODING: &str = "windows-1252";

/// Canonical article marker, re-attached to every segmented article.
pub const ARTICLE_MARKER: &str = "ARTÍCULO";

/// Unaccented spelling of the article marker found in some revisions.
pub const ARTICLE_MARKER_UNACCENTED: &str = "ARTICULO";

/// Marker of a structural division that ends the current article.
pub const SECTION_MARKER: &str = "TITULO";

/// Per-article footer injected by the publishing site.
pub const FOOTER_PHRASE: &str = "Ficha articulo";

/// Text wrap width for YAML output.
pub const TEXT_WRAP_WIDTH: usize = 100;

/// Maximum accepted size of a configuration file (64 KiB).
pub const MAX_CONFIG_SIZE: u64 = 64 * 1024;

/// Tunable settings for normalization and segmentation.
///
/// Every field has a default, so a configuration file only needs the keys
/// it wants to change:
///
/// ```
/// use legalogic_prep::config::PrepConfig;
///
/// let config = PrepConfig::from_yaml_str("repair_sentences: true\n").unwrap();
/// assert!(config.repair_sentences);
/// assert_eq!(config.encoding, "windows-1252");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// Encoding label used to decode input files.
    pub encoding: String,

    /// Footer phrase removed during normalization.
    pub footer_phrase: String,

    /// Restore sentence breaks lost to tag stripping.
    pub repair_sentences: bool,

    /// Spellings of the article marker, tried as alternatives.
    pub article_markers: Vec<String>,

    /// Marker prefixed to every article after splitting.
    pub canonical_marker: String,

    /// Marker at which an article's trailing text is cut.
    pub section_marker: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            footer_phrase: FOOTER_PHRASE.to_string(),
            repair_sentences: false,
            article_markers: vec![
                ARTICLE_MARKER.to_string(),
                ARTICLE_MARKER_UNACCENTED.to_string(),
            ],
            canonical_marker: ARTICLE_MARKER.to_string(),
            section_marker: SECTION_MARKER.to_string(),
        }
    }
}

impl PrepConfig {
    /// Parse and validate a configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `PrepError::Io` if the file cannot be read,
    /// `PrepError::InvalidConfig` if it is too large or fails validation,
    /// and `PrepError::Yaml` if it is not valid YAML.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading configuration file");

        let size = fs::metadata(path)?.len();
        if size > MAX_CONFIG_SIZE {
            return Err(PrepError::InvalidConfig(format!(
                "file exceeds maximum size limit ({MAX_CONFIG_SIZE} bytes)"
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check that markers are usable and the encoding is known.
    pub fn validate(&self) -> Result<()> {
        validate_encoding(&self.encoding)?;

        if self.article_markers.is_empty() {
            return Err(PrepError::InvalidConfig(
                "article_markers must list at least one marker".to_string(),
            ));
        }
        if self.article_markers.iter().any(|m| m.trim().is_empty()) {
            return Err(PrepError::InvalidConfig(
                "article_markers must not contain empty markers".to_string(),
            ));
        }
        if self.canonical_marker.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "canonical_marker must not be empty".to_string(),
            ));
        }
        if self.section_marker.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "section_marker must not be empty".to_string(),
            ));
        }
        if self.footer_phrase.trim().is_empty() {
            return Err(PrepError::InvalidConfig(
                "footer_phrase must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Resolve an encoding label.
///
/// # Examples
/// ```
/// use legalogic_prep::config::validate_encoding;
///
/// assert!(validate_encoding("windows-1252").is_ok());
/// assert!(validate_encoding("latin1").is_ok());
/// assert!(validate_encoding("klingon").is_err());
/// ```
pub fn validate_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PrepError::UnknownEncoding(label.to_string()))
}
