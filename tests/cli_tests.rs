//! Integration tests for the console commands: run the real binary
//! against a wiremock backend and an isolated config directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tix_cmd(base_url: &str, config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tix").unwrap();
    cmd.env("TIX_BASE_URL", base_url);
    cmd.env("TIX_CONFIG_DIR", config_dir.path());
    cmd
}

fn ticket_json(id: u64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Ticket {id}"),
        "description": "Something to do",
        "status": status,
        "priority": "normal",
        "assignee": "alex"
    })
}

#[test]
fn help_describes_the_client() {
    Command::cargo_bin("tix")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Terminal client for a ticket tracking service",
        ));
}

#[test]
fn config_show_reports_unset_values() {
    let config_dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("tix").unwrap();
    cmd.env("TIX_CONFIG_DIR", config_dir.path());
    cmd.args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backend base URL: <not set>"))
        .stdout(predicate::str::contains("Theme: <not set>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_prints_summary_and_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([ticket_json(1, "open"), ticket_json(2, "done")])),
        )
        .mount(&server)
        .await;

    let config_dir = TempDir::new().unwrap();
    tix_cmd(&server.uri(), &config_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 tickets · open: 1, in progress: 0, done: 1",
        ))
        .stdout(predicate::str::contains("Ticket 1"))
        .stdout(predicate::str::contains("alex"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_list_prints_placeholder_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let config_dir = TempDir::new().unwrap();
    tix_cmd(&server.uri(), &config_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tickets yet."));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_yes_flag_skips_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tickets/3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Ticket deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config_dir = TempDir::new().unwrap();
    tix_cmd(&server.uri(), &config_dir)
        .args(["delete", "3", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket deleted."));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_surfaces_backend_detail_on_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tickets"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Ticket already exists"})),
        )
        .mount(&server)
        .await;

    let config_dir = TempDir::new().unwrap();
    tix_cmd(&server.uri(), &config_dir)
        .args([
            "create",
            "--title",
            "Fix login bug",
            "--description",
            "Password rejected",
            "--assignee",
            "Dima",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ticket already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_reads_current_values_before_putting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(2, "open")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/tickets/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json(2, "done")))
        .expect(1)
        .mount(&server)
        .await;

    let config_dir = TempDir::new().unwrap();
    tix_cmd(&server.uri(), &config_dir)
        .args(["update", "2", "--status", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket updated."));
}
