use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the user's config, store and credentials.
fn forkthis(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("forkthis");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("FORKTHIS_STORAGE__PATH", home.join("store.json"))
        .env_remove("RUST_LOG");
    for var in [
        "GITHUB_TOKEN",
        "GITHUB_TOKENS",
        "GROQ_API_KEY",
        "GEMINI_API_KEY",
        "OPENAI_API_KEY",
        "OPENROUTER_API_KEY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("forkthis");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("forkthis"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("forkthis");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("summarize"))
        .stdout(predicate::str::contains("leaderboard"))
        .stdout(predicate::str::contains("bookmark"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("theme"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_no_args_prints_help() {
    let mut cmd = cargo_bin_cmd!("forkthis");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("forkthis");
    cmd.arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("forkthis"));
}

#[test]
fn test_search_rejects_malformed_repo() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["search", "not-a-repo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid repo format"))
        .stderr(predicate::str::contains("owner/name"));
}

#[test]
fn test_search_without_repo_or_history() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .arg("search")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No repository selected"));
}

#[test]
fn test_summarize_without_keys_explains_setup() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["summarize", "--body", "The build fails"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("All fallback models failed"))
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_history_empty_json() {
    let home = TempDir::new().unwrap();
    let json = json_stdout(forkthis(home.path()).args(["history", "list", "-o", "json"]));
    assert_eq!(json["entries"], serde_json::json!([]));
}

#[test]
fn test_theme_set_and_show() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["theme", "set", "terminal"])
        .assert()
        .success();

    let json = json_stdout(forkthis(home.path()).args(["theme", "show", "-o", "json"]));
    assert_eq!(json["theme"], "terminal");
    assert_eq!(json["available"].as_array().unwrap().len(), 5);
}

#[test]
fn test_theme_set_rejects_unknown() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["theme", "set", "neon"])
        .assert()
        .failure();
}

#[test]
fn test_bookmark_toggle_and_list() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["bookmark", "toggle", "octo/repo", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bookmarked octo/repo#5"));

    let json = json_stdout(forkthis(home.path()).args(["bookmark", "list", "-o", "json"]));
    assert_eq!(json["bookmarks"]["octo/repo"], serde_json::json!([5]));

    let history = json_stdout(forkthis(home.path()).args(["history", "list", "-o", "json"]));
    assert_eq!(history["entries"][0]["type"], "Bookmark");
}

#[test]
fn test_project_lifecycle() {
    let home = TempDir::new().unwrap();
    let export = home.path().join("projects.json");

    forkthis(home.path())
        .args(["project", "save", "alpha", "--repo", "octo/a", "--sort", "oldest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved project"));

    let list = json_stdout(forkthis(home.path()).args(["project", "list", "-o", "json"]));
    assert_eq!(list["projects"][0]["name"], "alpha");
    assert_eq!(list["projects"][0]["repo"], "octo/a");
    assert_eq!(list["projects"][0]["sort"], "oldest");

    forkthis(home.path())
        .args(["project", "share", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://forkthis.app/?repo=octo%2Fa&sort=oldest",
        ));

    forkthis(home.path())
        .args(["project", "export", "--file"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 project"));

    forkthis(home.path())
        .args(["project", "delete", "alpha"])
        .assert()
        .success();

    forkthis(home.path())
        .args(["project", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 project"));

    // Importing again conflicts; without a terminal or --yes nothing is written
    forkthis(home.path())
        .args(["project", "import"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Import cancelled"));

    forkthis(home.path())
        .args(["project", "import", "--yes"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 project"));
}

#[test]
fn test_project_export_to_stdout_is_json() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["project", "save", "beta", "--repo", "octo/b", "--beginner-only"])
        .assert()
        .success();

    let json = json_stdout(forkthis(home.path()).args(["project", "export"]));
    assert_eq!(json["beta"]["repo"], "octo/b");
    assert_eq!(json["beta"]["beginner_only"], true);
}

#[test]
fn test_project_load_unknown() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["project", "load", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project 'missing' not found"));
}

#[test]
fn test_history_remove_out_of_range() {
    let home = TempDir::new().unwrap();
    forkthis(home.path())
        .args(["history", "remove", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("forkthis history list"));
}
