#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

fn filmdeck(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("filmdeck");
    cmd.env_remove("TMDB_API_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
        .arg("--dir")
        .arg(dir);
    cmd
}

const FAVORITES_JSON: &str = r#"[
  {"id": 550, "title": "Fight Club", "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg", "vote_average": 8.4, "release_date": "1999-10-15"},
  {"id": 680, "title": "Pulp Fiction", "poster_path": null, "vote_average": 8.5, "release_date": "1994-09-10"}
]"#;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("filmdeck");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("favorites"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("filmdeck");
    cmd.arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_movie_rejects_non_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("filmdeck");
    cmd.args(["movie", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_movie_without_token_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["movie", "--id", "550"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_TOKEN"));
}

#[test]
fn test_browse_rejects_unknown_route() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["browse", "/tv/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/tv/1"));
}

#[test]
fn test_blank_search_prints_hint_without_token() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["search", "--query", "  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type a movie title"));
}

#[test]
fn test_favorites_list_empty() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your list is empty"));
}

#[test]
fn test_favorites_list_shows_entries() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favorites.json"), FAVORITES_JSON).unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 in favorites"))
        .stdout(predicate::str::contains("Fight Club (1999)"))
        .stdout(predicate::str::contains("Pulp Fiction (1994)"));
}

#[test]
fn test_favorites_remove_and_clear() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, FAVORITES_JSON).unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "remove", "--id", "550"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed from My List: Fight Club"));
    let remaining: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 1);

    filmdeck(dir.path())
        .args(["favorites", "clear"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    filmdeck(dir.path())
        .args(["favorites", "clear", "--yes"])
        .assert()
        .success();
    let cleared: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(cleared.as_array().unwrap().is_empty());
}

#[test]
fn test_favorites_remove_missing_is_localized() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[ui]\nlocale = \"tr\"\n").unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "remove", "--id", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listemde değil"));
}

#[test]
fn test_favorites_add_existing_skips_api() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("favorites.json"), FAVORITES_JSON).unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "add", "--id", "680"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In My List"));
}

#[test]
fn test_config_path_init_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    filmdeck(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    filmdeck(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    filmdeck(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("debounce_ms = 500"))
        .stdout(predicate::str::contains("language = \"en-US\""));
}

#[test]
fn test_turkish_locale_from_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[ui]\nlocale = \"tr\"\n").unwrap();

    // Act & Assert
    filmdeck(dir.path())
        .args(["favorites", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listeniz"));
}

#[test]
fn test_completions_bash() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("filmdeck");
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filmdeck"));
}
