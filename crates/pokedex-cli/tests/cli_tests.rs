//! CLI integration tests against a file-backed store.

mod common;

use serde_json::Value;
use tempfile::TempDir;

use common::{run_cli, run_cli_success, store_url};

fn lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_version() {
    let stdout = run_cli_success(&["--version"]);
    assert!(stdout.starts_with("pokedex "));
}

#[test]
fn test_create_then_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());

    let stdout = run_cli_success(&["create", "--store", &store, r#"{"name":"Pikachu"}"#]);
    let created: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Pikachu");

    let stdout = run_cli_success(&["get", "--store", &store, "1"]);
    let fetched: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn test_list_in_id_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());

    for name in ["Bulbasaur", "Charmander", "Squirtle"] {
        let record = format!(r#"{{"name":"{}"}}"#, name);
        run_cli_success(&["create", "--store", &store, &record]);
    }

    let records = lines(&run_cli_success(&["list", "--store", &store]));
    let ids: Vec<u64> = records.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(records[1]["name"], "Charmander");
}

#[test]
fn test_list_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());

    let output = run_cli(&["list", "--store", &store]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No pokemons found"));
}

#[test]
fn test_reset_restarts_ids() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());

    run_cli_success(&["create", "--store", &store, "{}"]);
    run_cli_success(&["create", "--store", &store, "{}"]);

    let output = run_cli(&["reset", "--store", &store]);
    assert!(
        output.status.success(),
        "Reset failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(run_cli_success(&["list", "--store", &store]).is_empty());

    let stdout = run_cli_success(&["create", "--store", &store, "{}"]);
    let created: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(created["id"], 1);
}

#[test]
fn test_get_missing_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());

    let output = run_cli(&["get", "--store", &store, "7"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no pokemon with id 7"));
}

#[test]
fn test_get_invalid_id_fails() {
    let output = run_cli(&["get", "--store", "memory:", "pikachu"]);
    assert!(!output.status.success());
}

#[test]
fn test_create_rejects_non_object() {
    let output = run_cli(&["create", "--store", "memory:", "[1,2,3]"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_store_url() {
    let output = run_cli(&["list", "--store", "https://example.com"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--store"));
}

#[test]
fn test_store_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_url(temp_dir.path());
    run_cli_success(&["create", "--store", &store, r#"{"name":"Mew"}"#]);

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_pokedex"))
        .args(["list"])
        .env("POKEDEX_STORE", &store)
        .output()
        .unwrap();
    assert!(output.status.success());
    let records = lines(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Mew");
}
