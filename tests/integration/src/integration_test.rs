//! End-to-end integration test for the vertical slice
//!
//! This test exercises the complete flow: config loading -> validation ->
//! local sync -> push -> pull, using only the library crates.

use envsync_core::{
    AdapterRegistry, ConfigResolver, EnvVars, Reconciler, RemoteState, Validator,
};
use envsync_fs::{NormalizedPath, read_env_file};
use envsync_test_utils::TestProject;
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
schema:
  variables:
    DATABASE_URL:
      required: true
      type: url
    PORT:
      type: number
      default: "8080"
    ADMIN_EMAIL:
      type: email
defaults:
  LOG_LEVEL: info
rules:
  ignore_patterns: ["LOCAL_*"]
adapter:
  name: file
  config:
    path: STORE_PATH
"#;

/// Set up a project with a config pointing the file adapter into the project
fn setup_project() -> TestProject {
    let project = TestProject::new();
    let store = project.path_str("store.json");
    project.write_config(&CONFIG.replace("STORE_PATH", &store));
    project.write_env(
        ".env.example",
        &[
            ("DATABASE_URL", "https://db.example.com"),
            ("PORT", "3000"),
            ("LOG_LEVEL", "debug"),
            ("ADMIN_EMAIL", "ops@example.com"),
        ],
    );
    project.write_env(".env", &[("DATABASE_URL", "https://localhost"), ("LOCAL_SECRET", "x")]);
    project
}

fn read(project: &TestProject, name: &str) -> EnvVars {
    read_env_file(&NormalizedPath::new(project.path(name)))
        .unwrap()
        .into()
}

#[test]
fn test_config_to_remote_round_trip() {
    let project = setup_project();
    let config = ConfigResolver::new(NormalizedPath::new(project.root()))
        .resolve()
        .unwrap();

    // The partial .env is valid: only DATABASE_URL is required
    let validator = Validator::with_rules(config.schema.clone(), config.rules.clone()).unwrap();
    let before = validator.validate(&read(&project, ".env"));
    assert!(before.valid, "{:?}", before.errors);

    // Local sync fills from config defaults, schema defaults, then source
    let reconciler = Reconciler::new(&config).unwrap();
    let result = reconciler
        .sync_files(&project.path_str(".env.example"), &project.path_str(".env"), false)
        .unwrap();
    assert_eq!(result.added, vec!["ADMIN_EMAIL", "LOG_LEVEL", "PORT"]);

    let local = read(&project, ".env");
    assert_eq!(local.get("DATABASE_URL"), Some("https://localhost"));
    assert_eq!(local.get("LOG_LEVEL"), Some("info"));
    assert_eq!(local.get("PORT"), Some("8080"));
    assert_eq!(local.get("ADMIN_EMAIL"), Some("ops@example.com"));
    assert_eq!(local.get("LOCAL_SECRET"), Some("x"));

    // Push to the file store; the ignored key stays local
    let settings = config.adapter().unwrap();
    let registry = AdapterRegistry::with_builtins();
    let remote = RemoteState::new(
        &config,
        registry.create(&settings.name, &settings.config).unwrap(),
    )
    .unwrap();

    let pushed = remote.push(&local, "/svc").unwrap();
    assert_eq!(pushed.added.len(), 4);
    assert!(!pushed.added.contains(&"LOCAL_SECRET".to_string()));

    // A fresh checkout pulls everything back
    let (fresh, pulled) = remote.pull("/svc", &EnvVars::new()).unwrap();
    assert_eq!(pulled.added.len(), 4);
    assert_eq!(fresh.get("PORT"), Some("8080"));
    assert!(remote.diff(&fresh, "/svc").unwrap().is_in_sync());

    let after = validator.validate(&fresh);
    assert!(after.valid);
    assert!(after.extra.contains(&"LOG_LEVEL".to_string()));
}

#[test]
fn test_second_sync_is_a_no_op() {
    let project = setup_project();
    let config = ConfigResolver::new(NormalizedPath::new(project.root()))
        .resolve()
        .unwrap();
    let reconciler = Reconciler::new(&config).unwrap();
    let source = project.path_str(".env.example");
    let target = project.path_str(".env");

    reconciler.sync_files(&source, &target, false).unwrap();
    let first = project.read_file(".env");
    let second = reconciler.sync_files(&source, &target, false).unwrap();

    assert!(second.added.is_empty());
    assert_eq!(project.read_file(".env"), first);
}
