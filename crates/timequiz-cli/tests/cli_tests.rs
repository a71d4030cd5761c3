//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `timequiz` command isolated from any real home or working directory.
fn timequiz(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("timequiz").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("TIMEQUIZ_STORE")
        .env_remove("TIMEQUIZ_BANK")
        .env_remove("COLORFGBG");
    cmd
}

fn store_arg(dir: &TempDir) -> String {
    dir.path().join("state.json").display().to_string()
}

/// Answer every question with `answer`, pressing Enter between questions,
/// then quit at the result screen.
fn scripted_run(answer: &str, questions: usize) -> String {
    let mut input = String::new();
    for _ in 0..questions {
        input.push_str(answer);
        input.push_str("\n\n");
    }
    input.push_str("q\n");
    input
}

fn read_state(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn validate_builtin_bank() {
    let dir = TempDir::new().unwrap();
    timequiz(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built-in (30 questions)"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    timequiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created timequiz.toml"))
        .stdout(predicate::str::contains("Created banks/sample.toml"));

    assert!(dir.path().join("timequiz.toml").exists());
    assert!(dir.path().join("banks/sample.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    timequiz(&dir).arg("init").assert().success();

    timequiz(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_sample_bank_and_directory() {
    let dir = TempDir::new().unwrap();
    timequiz(&dir).arg("init").assert().success();

    timequiz(&dir)
        .args(["validate", "--bank", "banks/sample.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("World Capitals (12 questions)"))
        .stdout(predicate::str::contains("All banks valid"));

    timequiz(&dir)
        .args(["validate", "--bank", "banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("World Capitals"));
}

#[test]
fn validate_rejects_malformed_bank() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        r#"
[[questions]]
prompt = "Only three?"
options = ["a", "b", "c"]
correct = 0
"#,
    )
    .unwrap();

    timequiz(&dir)
        .args(["validate", "--bank", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("expected 4 options"));
}

#[test]
fn validate_warns_about_small_bank() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("tiny.toml"),
        r#"
[[questions]]
prompt = "2 + 2?"
options = ["3", "4", "5", "22"]
correct = 1
"#,
    )
    .unwrap();

    timequiz(&dir)
        .args(["validate", "--bank", "tiny.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a session needs 10"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    timequiz(&dir)
        .args(["validate", "--bank", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn high_score_empty_then_set_then_reset() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);

    timequiz(&dir)
        .args(["high-score", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("No high score yet"));

    std::fs::write(&store, r#"{"high_score": 7}"#).unwrap();
    timequiz(&dir)
        .args(["high-score", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("High score: 7/10"));

    timequiz(&dir)
        .args(["high-score", "--reset", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("High score cleared"));
    assert!(read_state(Path::new(&store)).get("high_score").is_none());
}

#[test]
fn theme_toggle_persists() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);

    timequiz(&dir)
        .args(["theme", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("(system default)"));

    timequiz(&dir)
        .args(["theme", "light", "--store", &store])
        .assert()
        .success();

    timequiz(&dir)
        .args(["theme", "toggle", "--store", &store])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    assert_eq!(read_state(Path::new(&store))["theme"], "dark");
}

#[test]
fn play_full_session_from_stdin() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);
    let transcript = dir.path().join("out/transcript.json");

    timequiz(&dir)
        .args(["play", "--seed", "42", "--store", &store, "--transcript"])
        .arg(&transcript)
        .write_stdin(scripted_run("a", 10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/10"))
        .stdout(predicate::str::contains("Question 10/10"))
        .stdout(predicate::str::contains("Final score:"))
        .stdout(predicate::str::contains("Transcript saved to"));

    let saved = read_state(&transcript);
    assert_eq!(saved["session"]["total"], 10);
    assert_eq!(saved["session"]["answers"].as_array().unwrap().len(), 10);
    let score = saved["result"]["score"].as_u64().unwrap();
    assert!(score <= 10);

    // the high score is written only when the session scored
    if score > 0 {
        assert_eq!(read_state(Path::new(&store))["high_score"], score);
    }
}

#[test]
fn play_shows_existing_high_score() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);
    std::fs::write(&store, r#"{"high_score": 10, "theme": "dark"}"#).unwrap();

    timequiz(&dir)
        .args(["play", "--seed", "1", "--store", &store])
        .write_stdin(scripted_run("b", 10))
        .assert()
        .success()
        .stdout(predicate::str::contains("High Score: 10/10"));

    assert_eq!(read_state(Path::new(&store))["high_score"], 10);
}

#[test]
fn play_rejects_invalid_answers_until_valid() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);

    timequiz(&dir)
        .args(["play", "--seed", "3", "--store", &store])
        .write_stdin(format!("maybe\n{}", scripted_run("2", 10)))
        .assert()
        .success()
        .stdout(predicate::str::contains("Answer with A-D"))
        .stdout(predicate::str::contains("Final score:"));
}

#[test]
fn play_quit_mid_quiz() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);

    timequiz(&dir)
        .args(["play", "--store", &store])
        .write_stdin("a\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 2/10"))
        .stdout(predicate::str::contains("Quiz abandoned"));
}

#[test]
fn play_fails_when_input_closes_early() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);

    timequiz(&dir)
        .args(["play", "--store", &store])
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn play_with_small_bank_fails_to_start() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);
    std::fs::write(
        dir.path().join("tiny.toml"),
        r#"
[[questions]]
prompt = "2 + 2?"
options = ["3", "4", "5", "22"]
correct = 1
"#,
    )
    .unwrap();

    timequiz(&dir)
        .args(["play", "--bank", "tiny.toml", "--store", &store])
        .write_stdin("a\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("a session needs 10"));
}

#[test]
fn play_uses_configured_session_length() {
    let dir = TempDir::new().unwrap();
    let store = store_arg(&dir);
    timequiz(&dir).arg("init").assert().success();
    std::fs::write(
        dir.path().join("timequiz.toml"),
        "questions_per_session = 3\nbank = \"banks/sample.toml\"\n",
    )
    .unwrap();

    timequiz(&dir)
        .args(["play", "--seed", "5", "--store", &store])
        .write_stdin(scripted_run("c", 3))
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 3/3"))
        .stdout(predicate::str::contains("Question 4/").not());
}
