//! CLI end-to-end tests that invoke the compiled `envsync` binary.
//!
//! These tests use `env!("CARGO_BIN_EXE_envsync")` to locate the binary and
//! `std::process::Command` to run it against temporary projects using the
//! `file` adapter.

use std::process::Command;

use envsync_test_utils::TestProject;

/// Returns the path to the compiled `envsync` binary.
fn envsync_bin() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_BIN_EXE_envsync"))
}

/// Run `envsync` with the given args in the project directory.
fn run(project: &TestProject, args: &[&str]) -> std::process::Output {
    Command::new(envsync_bin())
        .args(args)
        .current_dir(project.root())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ENVSYNC_CONFIG")
        .output()
        .expect("failed to execute envsync binary")
}

fn json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}):\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn file_store_project() -> TestProject {
    let project = TestProject::new();
    project.write_config(
        "adapter:\n  name: file\n  config:\n    path: .envsync-store.json\n",
    );
    project
}

// ============================================================================
// 1. push then pull round trip
// ============================================================================

#[test]
fn test_push_then_pull() {
    let project = file_store_project();
    project.write_env("prod.env", &[("API_URL", "https://api"), ("PORT", "443")]);

    let out = run(&project, &["--json", "push", "prod.env", "--prefix", "/app/prod"]);
    assert!(out.status.success(), "push failed: {}", String::from_utf8_lossy(&out.stderr));
    let report = json(&out);
    assert_eq!(report["added"], serde_json::json!(["API_URL", "PORT"]));
    assert_eq!(report["target"], "file:/app/prod");
    project.assert_file_exists(".envsync-store.json");

    project.write_env(".env", &[("PORT", "8443"), ("LOCAL", "1")]);
    let out = run(&project, &["--json", "pull", "--prefix", "/app/prod"]);
    assert!(out.status.success(), "pull failed: {}", String::from_utf8_lossy(&out.stderr));

    let report = json(&out);
    assert_eq!(report["added"], serde_json::json!(["API_URL"]));
    assert_eq!(report["updated"], serde_json::json!(["PORT"]));
    assert_eq!(report["skipped"], serde_json::json!(["LOCAL"]));
    project.assert_env_line(".env", "PORT", "443");
    project.assert_env_line(".env", "LOCAL", "1");
}

// ============================================================================
// 2. push never deletes without --prune
// ============================================================================

#[test]
fn test_push_prune() {
    let project = file_store_project();
    project.write_env("full.env", &[("A", "1"), ("Z", "9")]);
    project.write_env("small.env", &[("A", "1")]);
    assert!(run(&project, &["push", "full.env"]).status.success());

    let out = run(&project, &["--json", "push", "small.env"]);
    let report = json(&out);
    assert_eq!(report["deleted"], serde_json::json!([]));
    assert_eq!(report["skipped"], serde_json::json!(["Z"]));

    let out = run(&project, &["--json", "push", "small.env", "--prune"]);
    assert_eq!(json(&out)["deleted"], serde_json::json!(["Z"]));

    let out = run(&project, &["--json", "remote-diff", "small.env"]);
    let diff = json(&out);
    assert_eq!(diff["missing"], serde_json::json!([]));
    assert_eq!(diff["extra"], serde_json::json!([]));
}

// ============================================================================
// 3. pull --dry-run leaves the local file alone
// ============================================================================

#[test]
fn test_pull_dry_run() {
    let project = file_store_project();
    project.write_env("seed.env", &[("A", "1")]);
    assert!(run(&project, &["push", "seed.env"]).status.success());

    let out = run(&project, &["pull", "local.env", "--dry-run"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Would sync"), "got:\n{stdout}");
    project.assert_file_not_exists("local.env");
}

// ============================================================================
// 4. verbose logging goes to stderr, not stdout
// ============================================================================

#[test]
fn test_verbose_logs_on_stderr() {
    let project = TestProject::new();
    project.write_env("a.env", &[("A", "1")]);
    project.write_env("b.env", &[("A", "1")]);

    let out = run(&project, &["-v", "--json", "diff", "a.env", "b.env"]);
    assert!(out.status.success());

    let diff = json(&out);
    assert_eq!(diff["same"], serde_json::json!(["A"]));
    assert!(!out.stderr.is_empty(), "verbose run should log to stderr");
}

// ============================================================================
// 5. unknown adapter
// ============================================================================

#[test]
fn test_unknown_adapter() {
    let project = TestProject::new();
    project.write_config("adapter:\n  name: vault\n");
    project.write_env(".env", &[("A", "1")]);

    let out = run(&project, &["remote-diff"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unknown adapter: vault"), "got:\n{stderr}");
}
