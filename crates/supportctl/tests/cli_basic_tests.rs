use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test command isolated from the caller's environment
fn supportctl() -> Command {
    let mut cmd = Command::cargo_bin("supportctl").unwrap();
    cmd.env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env_remove("AWS_REGION")
        .env_remove("AWS_DEFAULT_REGION")
        .env_remove("SUPPORTCTL_PROFILE")
        .env_remove("SUPPORTCTL_CONFIG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper bound to a config file inside `dir`
fn supportctl_with_config(dir: &TempDir) -> (Command, PathBuf) {
    let config = dir.path().join("config.toml");
    let mut cmd = supportctl();
    cmd.arg("--config-file").arg(&config);
    (cmd, config)
}

fn set_profile(dir: &TempDir, name: &str, extra: &[&str]) {
    let (mut cmd, _) = supportctl_with_config(dir);
    cmd.args(["profile", "set", name])
        .args(["--access-key-id", "AKIDEXAMPLE"])
        .args(["--secret-access-key", "wJalrXUtnFEMIEXAMPLEKEY"])
        .arg("--yes")
        .args(extra)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Profile '{}' saved successfully",
            name
        )));
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_flag() {
    supportctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS Support"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    supportctl()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    supportctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("supportctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    let output = supportctl()
        .args(["version", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["name"], "supportctl");
    assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_no_args_shows_help() {
    supportctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    supportctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_subcommand_help() {
    for (args, expected) in [
        (vec!["case", "--help"], "Support case operations"),
        (vec!["trusted-advisor", "--help"], "Trusted Advisor"),
        (vec!["ta", "--help"], "Trusted Advisor"),
        (vec!["profile", "--help"], "Profile management"),
        (vec!["api", "--help"], "EXAMPLES:"),
    ] {
        supportctl()
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }
}

#[test]
fn test_case_create_requires_subject_and_body() {
    supportctl()
        .args(["case", "create", "--subject", "only a subject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--body"));
}

#[test]
fn test_case_list_all_conflicts_with_next_token() {
    supportctl()
        .args(["case", "list", "--all", "--next-token", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_invalid_severity_rejected() {
    supportctl()
        .args(["case", "create", "--subject", "S", "--body", "B"])
        .args(["--severity", "catastrophic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_operations_lists_every_operation() {
    let output = supportctl()
        .args(["operations", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rendered = String::from_utf8_lossy(&output.stdout);
    for name in [
        "AddAttachmentsToSet",
        "AddCommunicationToCase",
        "CreateCase",
        "DescribeAttachment",
        "DescribeCases",
        "DescribeCommunications",
        "DescribeServices",
        "DescribeSeverityLevels",
        "DescribeTrustedAdvisorCheckRefreshStatuses",
        "DescribeTrustedAdvisorCheckResult",
        "DescribeTrustedAdvisorCheckSummaries",
        "DescribeTrustedAdvisorChecks",
        "RefreshTrustedAdvisorCheck",
        "ResolveCase",
    ] {
        assert!(rendered.contains(name), "missing operation {}", name);
    }
}

#[test]
fn test_completions_bash() {
    supportctl()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("supportctl"));
}

#[test]
fn test_profile_list_empty() {
    let dir = TempDir::new().unwrap();
    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured."));
}

#[test]
fn test_profile_lifecycle() {
    let dir = TempDir::new().unwrap();
    set_profile(&dir, "prod", &["--region", "us-east-1"]);
    set_profile(&dir, "dev", &[]);

    // First profile became the default
    let (mut cmd, config_path) = supportctl_with_config(&dir);
    let output = cmd.args(["profile", "list", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let profiles = stdout_json(&output);
    let profiles = profiles.as_array().unwrap();
    assert_eq!(profiles.len(), 2);
    let prod = profiles.iter().find(|p| p["name"] == "prod").unwrap();
    assert_eq!(prod["default"], true);
    assert!(config_path.exists());

    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["profile", "default", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default profile set to 'dev'"));

    let (mut cmd, _) = supportctl_with_config(&dir);
    let output = cmd
        .args(["profile", "show", "dev", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&output)["default"], true);

    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["profile", "remove", "prod", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' removed successfully."));

    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["profile", "show", "prod"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_profile_show_masks_secrets() {
    let dir = TempDir::new().unwrap();
    set_profile(&dir, "prod", &[]);

    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["profile", "show", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AKID..."))
        .stdout(predicate::str::contains("wJalrXUtnFEMIEXAMPLEKEY").not());
}

#[test]
fn test_profile_path_reports_explicit_file() {
    let dir = TempDir::new().unwrap();
    let (mut cmd, config_path) = supportctl_with_config(&dir);
    cmd.args(["profile", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config_path.display().to_string()));
}

#[test]
fn test_unknown_profile_selected() {
    let dir = TempDir::new().unwrap();
    set_profile(&dir, "prod", &[]);

    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["--profile", "missing", "severity", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Profile 'missing' not found"));
}

#[test]
fn test_no_profile_configured() {
    let dir = TempDir::new().unwrap();
    let (mut cmd, _) = supportctl_with_config(&dir);
    cmd.args(["severity", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("supportctl profile set"));
}

#[test]
fn test_api_unknown_operation() {
    supportctl()
        .args(["api", "DescribeEverything"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown operation 'DescribeEverything'"));
}

#[test]
fn test_api_rejects_non_object_body() {
    supportctl()
        .args(["api", "DescribeCases", "--data", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON object"));
}

#[test]
fn test_api_missing_data_file() {
    supportctl()
        .args(["api", "CreateCase", "--data", "@/nonexistent/case.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/case.json"));
}

/// Run a blocking command off the runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mock_profile(server: &MockServer) -> TempDir {
    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    tokio::task::spawn_blocking({
        let dir_path = dir.path().to_path_buf();
        move || {
            let config = dir_path.join("config.toml");
            supportctl()
                .arg("--config-file")
                .arg(&config)
                .args(["profile", "set", "mock"])
                .args(["--access-key-id", "AKIDEXAMPLE"])
                .args(["--secret-access-key", "wJalrXUtnFEMIEXAMPLEKEY"])
                .args(["--endpoint", &uri])
                .arg("--yes")
                .assert()
                .success();
        }
    })
    .await
    .unwrap();
    dir
}

fn against(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = supportctl();
    cmd.arg("--config-file")
        .arg(dir.join("config.toml"))
        .arg("--no-retry")
        .args(args);
    cmd
}

fn target(operation: &str) -> String {
    format!("AWSSupport_20130415.{}", operation)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_severity_list_against_mock() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("x-amz-target", target("DescribeSeverityLevels").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "severityLevels": [
                {"code": "low", "name": "Low"},
                {"code": "critical", "name": "Critical"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let output = run(against(dir.path(), &["severity", "list", "-o", "json"])).await;
    assert!(output.status.success(), "{:?}", output);

    let value = stdout_json(&output);
    assert_eq!(value["severityLevels"][1]["code"], "critical");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_case_get_against_mock() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeCases").as_str()))
        .and(body_partial_json(json!({
            "caseIdList": ["case-12345678910-2013-c4c1d2bf33c5cf47"],
            "includeResolvedCases": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cases": [{
                "caseId": "case-12345678910-2013-c4c1d2bf33c5cf47",
                "displayId": "1234567890",
                "status": "resolved",
                "subject": "Instance unreachable"
            }]
        })))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let output = run(against(
        dir.path(),
        &[
            "case",
            "get",
            "case-12345678910-2013-c4c1d2bf33c5cf47",
            "-q",
            "subject",
        ],
    ))
    .await;
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_json(&output), json!("Instance unreachable"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_case_get_missing_case() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeCases").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cases": []})))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let output = run(against(dir.path(), &["case", "get", "case-missing"])).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("case-missing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_service_error_surfaces_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("ResolveCase").as_str()))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "CaseIdNotFound",
            "message": "Requested case does not exist"
        })))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let output = run(against(dir.path(), &["case", "resolve", "case-gone"])).await;
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Requested case does not exist"), "{}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_raw_call_against_mock() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeServices").as_str()))
        .and(body_partial_json(json!({"serviceCodeList": ["amazon-ec2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "services": [{
                "code": "amazon-ec2",
                "name": "Amazon EC2",
                "categories": [{"code": "performance", "name": "Performance"}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let output = run(against(
        dir.path(),
        &[
            "api",
            "describe-services",
            "--data",
            r#"{"serviceCodeList":["amazon-ec2"]}"#,
            "-q",
            "services[0].categories[0].code",
        ],
    ))
    .await;
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(stdout_json(&output), json!("performance"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_env_credentials_ignored_with_explicit_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"severityLevels": []})))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let mut cmd = against(dir.path(), &["severity", "list", "-o", "json"]);
    cmd.env("AWS_ACCESS_KEY_ID", "AKIDFROMENV")
        .env("AWS_SECRET_ACCESS_KEY", "env-secret");
    let output = run(cmd).await;
    assert!(output.status.success(), "{:?}", output);

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(auth.contains("Credential=AKIDEXAMPLE/"), "{}", auth);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_attachment_save_without_data_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeAttachment").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let saved = dir.path().join("attachment.bin");
    let output = run(against(
        dir.path(),
        &["attachment", "get", "att-empty", "--save", saved.to_str().unwrap()],
    ))
    .await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("att-empty"));
    assert!(!saved.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_attachment_save_writes_decoded_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", target("DescribeAttachment").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachment": {"fileName": "trace.log", "data": "aGVsbG8="}
        })))
        .mount(&server)
        .await;

    let dir = mock_profile(&server).await;
    let saved = dir.path().join("trace.log");
    let output = run(against(
        dir.path(),
        &["attachment", "get", "att-1", "--save", saved.to_str().unwrap(), "-o", "json"],
    ))
    .await;
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(std::fs::read(&saved).unwrap(), b"hello");
    assert_eq!(stdout_json(&output)["bytes"], 5);
}
