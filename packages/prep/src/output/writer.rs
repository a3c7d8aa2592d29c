//! Rendering articles as text, JSON or YAML and writing them to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tempfile::NamedTempFile;

use super::wrap::{should_wrap_text, wrap_text_default};
use super::OutputFormat;
use crate::error::Result;
use crate::types::Article;

/// Single-quoted `source` or `number` value.
/// Captures: (1) key prefix with colon-space, (2) the unquoted value.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static QUOTED_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:source|number): )'([^']*)'$").expect("valid regex")
});

/// Article representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlArticle {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<String>,
    text: String,
}

/// Full document representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlDocument {
    source: String,
    article_count: usize,
    articles: Vec<YamlArticle>,
}

fn generate_yaml_struct(articles: &[Article], source: &str) -> YamlDocument {
    let articles: Vec<YamlArticle> = articles
        .iter()
        .map(|article| {
            let text = article.text.trim();
            let text = if should_wrap_text(text) {
                wrap_text_default(text)
            } else {
                text.to_string()
            };

            YamlArticle {
                index: article.index,
                number: article.number.clone(),
                text,
            }
        })
        .collect();

    YamlDocument {
        source: source.to_string(),
        article_count: articles.len(),
        articles,
    }
}

/// Indent the top-level `articles` list so items sit under their key:
///
/// ```yaml
/// # Before:          # After:
/// articles:          articles:
/// - index: 1           - index: 1
///   text: foo            text: foo
/// ```
fn indent_article_list(yaml: &str) -> String {
    let mut in_list = false;
    yaml.lines()
        .map(|line| {
            if line.starts_with("- ") {
                in_list = true;
            } else if !line.is_empty() && !line.starts_with(' ') {
                in_list = false;
            }
            if in_list && !line.is_empty() {
                format!("  {line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if a plain YAML scalar would be parsed as a non-string type.
fn needs_yaml_quoting(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    match value.to_lowercase().as_str() {
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~" => return true,
        _ => {}
    }

    if let Some(&first) = value.as_bytes().first() {
        if b"{}[],&*#?|-<>=!%@:\"`' ".contains(&first) {
            return true;
        }
    }

    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return true;
    }

    let num_part = value.strip_prefix('-').unwrap_or(value);

    // Integers and simple decimals
    if !num_part.is_empty() && num_part.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return num_part.bytes().filter(|&b| b == b'.').count() <= 1;
    }

    false
}

/// Strip single quotes YAML does not need, e.g. around `12 bis`.
fn strip_redundant_quotes(yaml: &str) -> String {
    yaml.lines()
        .map(|line| {
            let Some(caps) = QUOTED_VALUE_RE.captures(line) else {
                return line.to_string();
            };
            let (Some(prefix), Some(value)) = (caps.get(1), caps.get(2)) else {
                return line.to_string();
            };
            if needs_yaml_quoting(value.as_str()) {
                line.to_string()
            } else {
                format!("{}{}", prefix.as_str(), value.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate YAML for a list of articles.
pub fn generate_yaml(articles: &[Article], source: &str) -> Result<String> {
    let yaml_struct = generate_yaml_struct(articles, source);
    let yaml_string = serde_yaml_ng::to_string(&yaml_struct)?;

    let yaml_string = strip_redundant_quotes(&yaml_string);
    let yaml_string = indent_article_list(&yaml_string);

    let lines: Vec<&str> = yaml_string.lines().map(|l| l.trim_end()).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Generate pretty-printed JSON for a list of articles.
pub fn generate_json(articles: &[Article]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(articles)?;
    json.push('\n');
    Ok(json)
}

/// One article per line, as fed to sentence splitters downstream.
pub fn generate_text(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|article| format!("{}\n", article.text))
        .collect()
}

/// Render articles in the requested format.
pub fn render(articles: &[Article], format: OutputFormat, source: &str) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text(articles)),
        OutputFormat::Json => generate_json(articles),
        OutputFormat::Yaml => generate_yaml(articles, source),
    }
}

/// Write `content` to `path` atomically.
///
/// The content goes to a temp file in the target directory, is synced, and
/// is then persisted over the target, so readers never see a partial file.
pub fn write_atomic(path: &Path, content: &str) -> Result<PathBuf> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote output file");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_articles() -> Vec<Article> {
        vec![
            Article::new(1, "ARTÍCULO 1º.- Costa Rica es una República democrática. "),
            Article::new(2, "ARTÍCULO 12 bis.- Texto adicionado. "),
        ]
    }

    #[test]
    fn test_generate_text() {
        let text = generate_text(&sample_articles());
        assert_eq!(
            text,
            "ARTÍCULO 1º.- Costa Rica es una República democrática. \nARTÍCULO 12 bis.- Texto adicionado. \n"
        );
    }

    #[test]
    fn test_generate_text_empty() {
        assert_eq!(generate_text(&[]), "");
    }

    #[test]
    fn test_generate_json() {
        let json = generate_json(&sample_articles()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["number"], "1");
        assert_eq!(value[1]["number"], "12 bis");
        assert_eq!(value[1]["body"], "Texto adicionado.");
    }

    #[test]
    fn test_generate_yaml() {
        let yaml = generate_yaml(&sample_articles(), "constitucion.html").unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("source: constitucion.html"));
        assert!(yaml.contains("article_count: 2"));
        assert!(
            yaml.contains("articles:\n  - index: 1"),
            "Sequence items should be indented under articles key, got: {yaml}"
        );
        // Numbers that look like integers stay quoted
        assert!(yaml.contains("number: '1'"));
        assert!(yaml.contains("number: 12 bis"));
    }

    #[test]
    fn test_generate_yaml_parses_back() {
        let yaml = generate_yaml(&sample_articles(), "constitucion.html").unwrap();
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(value["article_count"].as_u64(), Some(2));
        assert_eq!(value["articles"][0]["number"].as_str(), Some("1"));
        assert_eq!(
            value["articles"][1]["text"].as_str(),
            Some("ARTÍCULO 12 bis.- Texto adicionado.")
        );
    }

    #[test]
    fn test_generate_yaml_wraps_long_text() {
        let long = format!("ARTÍCULO 2º.- {}", "La soberanía reside en la Nación. ".repeat(6));
        let yaml = generate_yaml(&[Article::new(1, long.clone())], "x").unwrap();
        let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml).unwrap();
        let text = value["articles"][0]["text"].as_str().unwrap_or_default();
        assert!(text.contains('\n'));
        assert_eq!(text.replace('\n', " "), long.trim());
    }

    #[test]
    fn test_render_dispatch() {
        let articles = sample_articles();
        assert!(render(&articles, OutputFormat::Text, "x")
            .unwrap()
            .starts_with("ARTÍCULO 1º"));
        assert!(render(&articles, OutputFormat::Json, "x")
            .unwrap()
            .starts_with('['));
        assert!(render(&articles, OutputFormat::Yaml, "x")
            .unwrap()
            .starts_with("---"));
    }

    #[test]
    fn test_needs_yaml_quoting() {
        assert!(needs_yaml_quoting("1"));
        assert!(needs_yaml_quoting("1.5"));
        assert!(needs_yaml_quoting("true"));
        assert!(needs_yaml_quoting(""));
        assert!(needs_yaml_quoting("foo: bar"));
        assert!(needs_yaml_quoting("- lista"));

        assert!(!needs_yaml_quoting("12 bis"));
        assert!(!needs_yaml_quoting("1.2.3"));
        assert!(!needs_yaml_quoting("constitucion.html"));
    }

    #[test]
    fn test_strip_redundant_quotes() {
        let input = "number: '1'\nnumber: '12 bis'\nsource: 'constitucion.html'";
        assert_eq!(
            strip_redundant_quotes(input),
            "number: '1'\nnumber: 12 bis\nsource: constitucion.html"
        );
    }

    #[test]
    fn test_indent_article_list() {
        let input = "source: x\narticles:\n- index: 1\n  text: |-\n    uno\n    dos\n- index: 2\n  text: tres";
        assert_eq!(
            indent_article_list(input),
            "source: x\narticles:\n  - index: 1\n    text: |-\n      uno\n      dos\n  - index: 2\n    text: tres"
        );
    }

    #[test]
    fn test_indent_article_list_stops_at_next_key() {
        assert_eq!(
            indent_article_list("articles:\n- index: 1\nsource: x"),
            "articles:\n  - index: 1\nsource: x"
        );
    }

    #[test]
    fn test_write_atomic() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out").join("articulos.txt");

        let written = write_atomic(&target, "uno\n").unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "uno\n");

        // Overwrite in place, no temp file left behind
        write_atomic(&target, "dos\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "dos\n");
        let entries: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("articulos.txt")]);
    }
}
