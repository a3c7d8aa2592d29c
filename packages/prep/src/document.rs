//! Reading and decoding source documents.
//!
//! The constitution HTML is served in a legacy 8-bit encoding. Decoding goes
//! through `encoding_rs`, folds Windows and old Mac line endings to `\n`, and
//! ends in NFC so accented markers compare equal no matter how the source
//! composed them.

use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::config::validate_encoding;
use crate::error::Result;

/// Decode raw bytes with the encoding named by `encoding_label`.
///
/// Malformed sequences become U+FFFD; that is logged, not fatal. A leading
/// byte-order mark overrides the label. `\r\n` and lone `\r` become `\n`.
///
/// # Examples
/// ```
/// use legalogic_prep::document::decode;
///
/// // "ARTÍCULO" in windows-1252
/// let bytes = b"ART\xCDCULO";
/// assert_eq!(decode(bytes, "windows-1252").unwrap(), "ARTÍCULO");
/// ```
pub fn decode(bytes: &[u8], encoding_label: &str) -> Result<String> {
    let encoding = validate_encoding(encoding_label)?;
    let (decoded, used, had_errors) = encoding.decode(bytes);

    if had_errors {
        tracing::warn!(
            encoding = used.name(),
            "Input contained malformed byte sequences; replaced with U+FFFD"
        );
    }
    if used != encoding {
        tracing::debug!(
            requested = encoding.name(),
            used = used.name(),
            "Byte-order mark overrides requested encoding"
        );
    }

    Ok(fold_line_endings(&decoded).nfc().collect())
}

fn fold_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Read a file and decode it.
///
/// # Errors
///
/// Returns `PrepError::UnknownEncoding` for an unknown label and
/// `PrepError::Io` if the file cannot be read.
pub fn read_document<P: AsRef<Path>>(path: P, encoding_label: &str) -> Result<String> {
    let path = path.as_ref();
    // Reject the label before touching the filesystem
    validate_encoding(encoding_label)?;

    tracing::debug!(path = %path.display(), encoding = encoding_label, "Reading document");
    let bytes = fs::read(path)?;
    decode(&bytes, encoding_label)
}
