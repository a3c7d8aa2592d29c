//! Text wrapping for YAML output.

use textwrap::{fill, Options};

use crate::config::TEXT_WRAP_WIDTH;

/// Wrap text at `width`, keeping blank-line paragraph breaks.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.split("\n\n")
        .map(|p| fill(p.trim(), &options))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Check if text is long enough to be worth wrapping.
pub fn should_wrap_text(text: &str) -> bool {
    text.chars().count() > TEXT_WRAP_WIDTH
}

/// Wrap text with default width.
pub fn wrap_text_default(text: &str) -> String {
    wrap_text(text, TEXT_WRAP_WIDTH)
}
