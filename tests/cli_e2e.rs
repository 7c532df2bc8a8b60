//! End-to-end CLI tests for the fevertube binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

/// Binary with an isolated config location and no inherited log filter.
fn fevertube(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fevertube").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn fever_url(server: &MockServer) -> String {
    format!("{}/fever/?api", server.uri())
}

async fn mount_groups(fever: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/fever/"))
        .and(query_param("groups", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_version": 3,
            "auth": 1,
            "last_refreshed_on_time": 1_700_000_000,
            "groups": [{"id": 1, "title": "Videos"}, {"id": 12, "title": "Music"}],
            "feeds_groups": [
                {"group_id": 1, "feed_ids": "10"},
                {"group_id": 12, "feed_ids": "20"}
            ]
        })))
        .mount(fever)
        .await;
}

#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download unread Fever feed items"))
        .stdout(predicate::str::contains("show-groups"));
}

#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fevertube"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_without_credentials_fails() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("`user`"));
}

#[test]
fn test_binary_missing_metube_url_fails() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .args(["-u", "alice", "-p", "secret", "-f", "http://127.0.0.1:1/fever/?api"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MeTube URL cannot be empty"));
}

#[test]
fn test_binary_invalid_metube_option_fails() {
    let home = TempDir::new().unwrap();
    fevertube(&home)
        .args([
            "-u",
            "alice",
            "-p",
            "secret",
            "-f",
            "http://127.0.0.1:1/fever/?api",
            "-m",
            "http://127.0.0.1:1",
            "-o",
            "{not json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--metube-option"));
}

#[test]
fn test_binary_rejects_unknown_config_key() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("custom.toml");
    std::fs::write(&config_path, "colour = \"blue\"\n").unwrap();
    fevertube(&home)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_groups_prints_table() {
    let Some(fever) = start_mock_server_or_skip().await else {
        return;
    };
    mount_groups(&fever).await;
    let home = TempDir::new().unwrap();

    fevertube(&home)
        .args(["-u", "alice", "-p", "secret", "-f", fever_url(&fever).as_str(), "show-groups"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id  title"))
        .stdout(predicate::str::contains("12  Music"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_groups_fails_when_unauthenticated() {
    let Some(fever) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"api_version": 3, "auth": 0})))
        .mount(&fever)
        .await;
    let home = TempDir::new().unwrap();

    fevertube(&home)
        .args(["show-groups", "-u", "alice", "-p", "wrong", "-f", fever_url(&fever).as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch feed groups"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_groups_fails_without_groups_field() {
    let Some(fever) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"api_version": 3, "auth": 1})))
        .mount(&fever)
        .await;
    let home = TempDir::new().unwrap();

    fevertube(&home)
        .args(["-u", "alice", "-p", "secret", "-f", fever_url(&fever).as_str(), "show-groups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not return any groups"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_from_config_file_prints_each_task() {
    let Some(fever) = start_mock_server_or_skip().await else {
        return;
    };
    let Some(metube) = start_mock_server_or_skip().await else {
        return;
    };
    mount_groups(&fever).await;
    Mock::given(method("POST"))
        .and(query_param("unread_item_ids", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_version": 3,
            "auth": 1,
            "unread_item_ids": "5,6"
        })))
        .mount(&fever)
        .await;
    Mock::given(method("POST"))
        .and(query_param("items", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_version": 3,
            "auth": 1,
            "items": [
                {"id": 5, "feed_id": 10, "url": "https://video.example/5"},
                {"id": 6, "feed_id": 20, "url": "https://video.example/6"}
            ]
        })))
        .mount(&fever)
        .await;
    Mock::given(method("POST"))
        .and(query_param("mark", "item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"api_version": 3, "auth": 1})))
        .expect(1)
        .mount(&fever)
        .await;
    Mock::given(method("POST"))
        .and(path("/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&metube)
        .await;

    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("fevertube");
    std::fs::create_dir_all(&config_dir).unwrap();
    let mut config = std::fs::File::create(config_dir.join("config.toml")).unwrap();
    writeln!(config, "user = \"alice\"").unwrap();
    writeln!(config, "password = \"secret\"").unwrap();
    writeln!(config, "fever_api_url = \"{}\"", fever_url(&fever)).unwrap();
    writeln!(config, "metube_url = \"{}/\"", metube.uri()).unwrap();
    writeln!(config, "feed_groups = \"1\"  # videos only").unwrap();
    drop(config);

    fevertube(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Submitting download task https://video.example/5",
        ))
        .stdout(predicate::str::contains("video.example/6").not());
}
