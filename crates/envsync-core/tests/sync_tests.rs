//! Tests for local reconciliation

use envsync_core::{Config, EnvVars, Error, Reconciler, Schema, VariableSpec};
use envsync_test_utils::TestProject;
use pretty_assertions::assert_eq;

fn vars(pairs: &[(&str, &str)]) -> EnvVars {
    pairs.iter().copied().collect()
}

fn reconciler() -> Reconciler {
    Reconciler::new(&Config::default()).unwrap()
}

#[test]
fn test_second_run_adds_nothing() {
    let source = vars(&[("A", "1"), ("B", "2"), ("C", "3")]);
    let target = vars(&[("B", "local")]);

    let (once, first) = reconciler().sync(&source, &target);
    let (twice, second) = reconciler().sync(&source, &once);

    assert_eq!(first.added, vec!["A", "C"]);
    assert!(second.added.is_empty());
    assert_eq!(once, twice);
}

#[test]
fn test_existing_target_values_never_change() {
    let source = vars(&[("A", "from-source"), ("B", "from-source")]);
    let target = vars(&[("A", "mine"), ("Z", "extra")]);

    let (updated, _) = reconciler().sync(&source, &target);

    assert_eq!(updated.get("A"), Some("mine"));
    assert_eq!(updated.get("Z"), Some("extra"));
    assert_eq!(updated.get("B"), Some("from-source"));
}

#[test]
fn test_default_layer_priority() {
    let mut config = Config::default();
    config.defaults.insert("X".into(), "A".into());
    config.schema = Schema::new().with_variable("X", VariableSpec::default().with_default("B"));
    let source = vars(&[("X", "C")]);

    let (updated, _) = Reconciler::new(&config).unwrap().sync(&source, &EnvVars::new());
    assert_eq!(updated.get("X"), Some("A"));

    config.defaults.clear();
    let (updated, _) = Reconciler::new(&config).unwrap().sync(&source, &EnvVars::new());
    assert_eq!(updated.get("X"), Some("B"));

    config.schema = Schema::new().with_variable("X", VariableSpec::default().with_default(""));
    let (updated, _) = Reconciler::new(&config).unwrap().sync(&source, &EnvVars::new());
    assert_eq!(updated.get("X"), Some("C"));
}

#[test]
fn test_inputs_are_not_mutated() {
    let source = vars(&[("A", "1")]);
    let target = EnvVars::new();
    let _ = reconciler().sync(&source, &target);
    assert!(target.is_empty());
}

#[test]
fn test_sync_files_writes_target() {
    let project = TestProject::new();
    project.write_env(".env.example", &[("A", "1"), ("B", "\"two words\"")]);
    project.write_env(".env", &[("A", "local")]);

    let result = reconciler()
        .sync_files(&project.path_str(".env.example"), &project.path_str(".env"), false)
        .unwrap();

    assert_eq!(result.added, vec!["B"]);
    assert!(result.file_path.ends_with(".env"));
    project.assert_env_line(".env", "A", "local");
    project.assert_env_line(".env", "B", "\"two words\"");
}

#[test]
fn test_sync_files_dry_run_leaves_target_alone() {
    let project = TestProject::new();
    project.write_env(".env.example", &[("A", "1")]);
    project.write_env(".env", &[("Z", "9")]);

    let result = reconciler()
        .sync_files(&project.path_str(".env.example"), &project.path_str(".env"), true)
        .unwrap();

    assert_eq!(result.added, vec!["A"]);
    assert_eq!(project.read_file(".env"), "Z=9\n");
}

#[test]
fn test_sync_files_creates_missing_target() {
    let project = TestProject::new();
    project.write_env(".env.example", &[("A", "1")]);

    reconciler()
        .sync_files(&project.path_str(".env.example"), &project.path_str(".env"), false)
        .unwrap();

    project.assert_env_line(".env", "A", "1");
}

#[test]
fn test_sync_files_missing_source_names_operation() {
    let project = TestProject::new();

    let err = reconciler()
        .sync_files(&project.path_str("nope.env"), &project.path_str(".env"), false)
        .unwrap_err();

    assert!(matches!(err, Error::File { operation: "read source", .. }));
    project.assert_file_not_exists(".env");
}

#[test]
fn test_sync_files_parse_error_is_propagated() {
    let project = TestProject::new();
    project.write_file(".env.example", "A=1\nthis line is broken\n");

    let err = reconciler()
        .sync_files(&project.path_str(".env.example"), &project.path_str(".env"), false)
        .unwrap_err();

    assert!(err.to_string().contains("this line is broken"), "got: {err}");
}
