//! Tests for the `legalogic-prep` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("constitucion")
        .join("constitucion.html")
}

fn prep() -> Command {
    let mut cmd = Command::cargo_bin("legalogic-prep").expect("binary builds");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_articles_text_output() {
    prep()
        .arg("articles")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ARTÍCULO 1º.- Costa Rica es una República democrática",
        ))
        .stdout(predicate::str::contains("\nARTÍCULO 12 bis.- Texto de prueba."))
        .stdout(predicate::str::contains("TITULO").not())
        .stderr(predicate::str::contains("Articles:"));
}

#[test]
fn test_articles_one_per_line() {
    let output = prep()
        .arg("articles")
        .arg(fixture_path())
        .output()
        .expect("runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(stdout.lines().count(), 5);
}

#[test]
fn test_articles_json_to_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("articulos.json");

    prep()
        .args(["articles", "--format", "json", "--output"])
        .arg(&out)
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Saved to:"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(5));
    assert_eq!(value[0]["body"], "Costa Rica es una República democrática, libre, independiente, multiétnica y pluricultural.");
}

#[test]
fn test_articles_yaml() {
    prep()
        .args(["articles", "--format", "yaml"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\n"))
        .stdout(predicate::str::contains("article_count: 5"));
}

#[test]
fn test_articles_repair_sentences_flag() {
    prep()
        .args(["articles", "--repair-sentences"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Texto de prueba. (Así adicionado por ley)."));
}

#[test]
fn test_articles_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("prep.yaml");
    fs::write(&config, "article_markers:\n  - ARTICULO\n").unwrap();

    let output = prep()
        .arg("--config")
        .arg(&config)
        .arg("articles")
        .arg(fixture_path())
        .output()
        .expect("runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("ARTÍCULO 13.- Son costarricenses"));
}

#[test]
fn test_normalize_command() {
    prep()
        .arg("normalize")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TITULO II"))
        .stdout(predicate::str::contains("<p>").not())
        .stdout(predicate::str::contains("Ficha articulo").not());
}

#[test]
fn test_strip_prefix_command() {
    let dir = tempdir().unwrap();
    let list = dir.path().join("articulos.txt");
    fs::write(
        &list,
        "ARTÍCULO 1º.- Costa Rica es una República.\nARTÍCULO 2º.- La Soberanía reside en la Nación.\n",
    )
    .unwrap();

    prep()
        .arg("strip-prefix")
        .arg(&list)
        .assert()
        .success()
        .stdout("Costa Rica es una República.\nLa Soberanía reside en la Nación.\n");
}

#[test]
fn test_missing_input_fails() {
    prep()
        .args(["articles", "/nonexistent/constitucion.html"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: IO error"));
}

#[test]
fn test_unknown_encoding_fails() {
    prep()
        .args(["articles", "--encoding", "klingon"])
        .arg(fixture_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding: 'klingon'"));
}

#[test]
fn test_marker_free_input_is_not_an_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("vacio.html");
    fs::write(&input, "<html><p>Sin contenido</p></html>").unwrap();

    prep()
        .arg("articles")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No article markers found"));
}
