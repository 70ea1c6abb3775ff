use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn textclass(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("textclass").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn blank_text_is_rejected_without_contacting_backend() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let generate = server.mock("POST", "/api/generate").expect(0).create();

    textclass(&home)
        .args(["--host", &server.url(), "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Please enter some text for classification.",
        ));

    generate.assert();
}

#[test]
fn empty_stdin_is_rejected() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .arg("-")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter some text"));
}

#[test]
fn classifies_text_argument() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("Hi team, lunch is at noon.".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"response":" Other \n","done":true}"#)
        .create();

    textclass(&home)
        .args(["--host", &server.url(), "Hi team, lunch is at noon."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classification Complete!"))
        .stdout(predicate::str::contains("Category: Other\n"));

    generate.assert();
}

#[test]
fn classifies_piped_stdin() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("overdue".to_string()))
        .with_status(200)
        .with_body(r#"{"response":"Finance","done":true}"#)
        .create();

    textclass(&home)
        .args(["--host", &server.url()])
        .write_stdin("Your invoice is overdue, please pay by Friday.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Finance"));
}

#[test]
fn unreachable_backend_reports_error_category() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .args(["--host", "http://127.0.0.1:1", "Quarterly numbers attached"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "An error occurred while classifying the text.",
        ))
        .stdout(predicate::str::contains("Category: Error"))
        .stderr(predicate::str::contains("Connection refused").not())
        .stderr(predicate::str::contains("backend unreachable").not());
}

#[test]
fn verbose_shows_backend_failure_detail() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .args(["--verbose", "--host", "http://127.0.0.1:1", "Quarterly numbers attached"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backend unreachable"));
}

#[test]
fn model_error_reports_error_category() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _generate = server
        .mock("POST", "/api/generate")
        .with_status(404)
        .with_body(r#"{"error":"model \"deepseek-r1:1.5b\" not found, try pulling it first"}"#)
        .create();

    textclass(&home)
        .args(["--host", &server.url(), "Meeting notes"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Category: Error"));
}

#[test]
fn uses_config_file_model_and_template() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let config_path = home.path().join("custom.toml");
    fs::write(
        &config_path,
        format!(
            "[backend]\nbase_url = \"{}\"\nmodel = \"llama3.2\"\n\n[prompt]\ntemplate = \"Spam or Ham: {{input_text}}\"\n",
            server.url()
        ),
    )
    .unwrap();

    let generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "llama3.2",
            "prompt": "Spam or Ham: You won a cruise!",
        })))
        .with_status(200)
        .with_body(r#"{"response":"Spam","done":true}"#)
        .create();

    textclass(&home)
        .args(["--config", config_path.to_str().unwrap(), "You won a cruise!"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Spam"));

    generate.assert();
}

#[test]
fn file_input() {
    let home = TempDir::new().unwrap();
    let mail = home.path().join("mail.txt");
    fs::write(&mail, "Subject: Standup\n\nMoved to 10am.").unwrap();
    let mut server = Server::new();
    let _generate = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Regex("Moved to 10am".to_string()))
        .with_status(200)
        .with_body(r#"{"response":"Work","done":true}"#)
        .create();

    textclass(&home)
        .args(["--host", &server.url(), "--file", mail.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Work"));
}

#[test]
fn invalid_template_fails_to_start() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("config.toml");
    fs::write(&config_path, "[prompt]\ntemplate = \"Classify it\"\n").unwrap();

    textclass(&home)
        .args(["--config", config_path.to_str().unwrap(), "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize textclass"));
}

#[test]
fn config_command_shows_overrides() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .args(["config", "--model", "llama3.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Model: llama3.2"))
        .stdout(predicate::str::contains("You are an expert text classifier."));
}

#[test]
fn init_writes_default_config() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .args(["--host", "http://127.0.0.1:1", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default configuration"))
        .stdout(predicate::str::contains("Ollama service not available"));

    let written = fs::read_to_string(home.path().join(".textclass").join("config.toml")).unwrap();
    assert!(written.contains("model = \"deepseek-r1:1.5b\""));
}

#[test]
fn doctor_reports_missing_model() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let _version = server
        .mock("GET", "/api/version")
        .with_status(200)
        .with_body(r#"{"version":"0.5.7"}"#)
        .create();
    let _tags = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(r#"{"models":[{"name":"llama3.2:latest"}]}"#)
        .create();

    textclass(&home)
        .args(["doctor", "--host", &server.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Ollama 0.5.7 running"))
        .stdout(predicate::str::contains("✗ Model deepseek-r1:1.5b missing"));
}

#[test]
fn version_command() {
    let home = TempDir::new().unwrap();

    textclass(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "textclass {}",
            env!("CARGO_PKG_VERSION")
        )));
}
