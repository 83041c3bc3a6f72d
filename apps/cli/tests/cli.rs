//! End-to-end tests of the `mealdesk` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const REGISTER_RULES: &str = r#"
username = "required|alpha|least_string:3"
email = "required|email"
password = "required|string|confirmed|least_string:6"
"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn mealdesk(&self) -> Command {
        let mut cmd = Command::cargo_bin("mealdesk").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("MEALDESK_CONFIG")
            .env_remove("MEALDESK_POLICY")
            .env_remove("MEALDESK_LOG")
            .env_remove("MEALDESK_LOG_LEVEL")
            .env_remove("MEALDESK_LOG_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }

    fn validate(&self, rules: &str, body: &str) -> Command {
        self.file("rules.toml", rules);
        self.file("body.json", body);
        let mut cmd = self.mealdesk();
        cmd.args(["validate", "--rules", "rules.toml", "--payload", "body.json"]);
        cmd
    }
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn passing_body_exits_zero() {
    let ws = Workspace::new();
    ws.validate(
        REGISTER_RULES,
        r#"{"username": " ada ", "email": "ada@example.com", "password": "secret1", "password_confirmation": "secret1"}"#,
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(r#"{"success":true}"#));
}

#[test]
fn rejected_body_prints_envelope_and_exits_two() {
    let ws = Workspace::new();
    let output = ws
        .validate(REGISTER_RULES, r#"{"username": "ada", "email": "nope"}"#)
        .assert()
        .code(2)
        .get_output()
        .clone();

    let envelope = stdout_json(&output);
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "Validation error.");
    assert_eq!(
        envelope["errors"],
        serde_json::json!({ "email": ["The email must be a valid email address."] })
    );
}

#[test]
fn first_declared_field_is_reported() {
    let ws = Workspace::new();
    let output = ws
        .validate("zeta = \"required\"\nalpha = \"required\"\n", "{}")
        .assert()
        .code(2)
        .get_output()
        .clone();

    assert_eq!(
        stdout_json(&output)["errors"],
        serde_json::json!({ "zeta": ["The zeta field is required."] })
    );
}

#[test]
fn first_per_field_policy_reports_every_field() {
    let ws = Workspace::new();
    let output = ws
        .validate(REGISTER_RULES, "{}")
        .args(["--policy", "first-per-field"])
        .assert()
        .code(2)
        .get_output()
        .clone();

    let errors = stdout_json(&output)["errors"].clone();
    assert_eq!(errors.as_object().unwrap().len(), 3);
    assert_eq!(errors["password"][0], "The password field is required.");
}

#[test]
fn policy_from_environment() {
    let ws = Workspace::new();
    let output = ws
        .validate(REGISTER_RULES, "{}")
        .env("MEALDESK_POLICY", "first-per-field")
        .assert()
        .code(2)
        .get_output()
        .clone();

    assert_eq!(stdout_json(&output)["errors"].as_object().unwrap().len(), 3);
}

#[test]
fn invalid_json_body_is_rejected() {
    let ws = Workspace::new();
    ws.validate(REGISTER_RULES, "{not json")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Request must be valid JSON"));
}

#[test]
fn non_object_body_is_rejected() {
    let ws = Workspace::new();
    ws.validate(REGISTER_RULES, "[1, 2]")
        .assert()
        .code(2)
        .stdout(predicate::str::contains(r#"{"request":["Request must be valid JSON"]}"#));
}

#[test]
fn unknown_rule_is_a_configuration_error() {
    let ws = Workspace::new();
    ws.validate(r#"email = "required|emial""#, "{}")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("emial"));
}

#[test]
fn missing_payload_file_is_an_error() {
    let ws = Workspace::new();
    ws.file("rules.toml", REGISTER_RULES);
    ws.mealdesk()
        .args(["validate", "--rules", "rules.toml", "--payload", "missing.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn exists_without_records_is_an_error() {
    let ws = Workspace::new();
    ws.validate(r#"meal_id = "required|exists:Meal,id""#, r#"{"meal_id": 1}"#)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("validation aborted"));
}

#[test]
fn records_back_exists_and_unique() {
    let ws = Workspace::new();
    ws.file(
        "records.json",
        r#"{"User": [{"id": 1, "email": "ada@example.com"}], "Meal": [{"id": 7, "name": "Stew"}]}"#,
    );
    let rules = r#"
meal_id = "required|integer|exists:Meal,id"
email = "required|email|unique:User,email"
"#;

    ws.validate(rules, r#"{"meal_id": 7, "email": "grace@example.com"}"#)
        .args(["--records", "records.json"])
        .assert()
        .success();

    ws.validate(rules, r#"{"meal_id": 7, "email": "ADA@example.com"}"#)
        .args(["--records", "records.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("The email is already taken."));

    ws.validate(rules, r#"{"meal_id": 8, "email": "grace@example.com"}"#)
        .args(["--records", "records.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("The selected meal id is invalid."));
}

#[test]
fn raw_mode_skips_cleaning() {
    let ws = Workspace::new();
    let rules = r#"code = "required|alpha""#;

    ws.validate(rules, r#"{"code": "  abc  "}"#).assert().success();
    ws.validate(rules, r#"{"code": "  abc  "}"#)
        .arg("--raw")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("The code may contain only letters."));
}

#[test]
fn settings_file_overrides_messages() {
    let ws = Workspace::new();
    ws.file(
        "mealdesk.toml",
        "[messages]\nrequired = \"Please provide :field:.\"\n",
    );
    ws.validate(r#"first_name = "required""#, "{}")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Please provide first name."));
}

#[test]
fn explicit_settings_file_must_exist() {
    let ws = Workspace::new();
    ws.validate(r#"name = "required""#, "{}")
        .args(["--config", "absent.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn unknown_message_override_is_an_error() {
    let ws = Workspace::new();
    ws.file("custom.toml", "[messages]\nrequird = \"typo\"\n");
    ws.validate(r#"name = "required""#, "{}")
        .args(["--config", "custom.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("requird"));
}

#[test]
fn rules_lists_every_rule() {
    let ws = Workspace::new();
    ws.mealdesk()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("required_with"))
        .stdout(predicate::str::contains("The :field: field is required."))
        .stdout(predicate::str::contains("unique"));
}
