//! Multi-environment workflows against a shared store
//!
//! Several checkouts share one `memory` store handle, the way separate
//! machines share a parameter store.

use envsync_core::remote::StoreCall;
use envsync_core::{Config, EnvVars, KeyValueStore, MemoryStore, PushOptions, RemoteState};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn vars(pairs: &[(&str, &str)]) -> EnvVars {
    pairs.iter().copied().collect()
}

fn checkout(store: &MemoryStore) -> RemoteState {
    RemoteState::new(&Config::default(), Box::new(store.clone())).unwrap()
}

#[test]
fn test_two_developers_converge() {
    let store = MemoryStore::new();
    let alice = checkout(&store);
    let bob = checkout(&store);

    alice.push(&vars(&[("API_URL", "https://api"), ("TIMEOUT", "30")]), "/team").unwrap();

    let (bob_env, _) = bob.pull("/team", &vars(&[("EDITOR", "vim")])).unwrap();
    assert_eq!(bob_env.get("API_URL"), Some("https://api"));
    assert_eq!(bob_env.get("EDITOR"), Some("vim"));

    // Bob's push adds his key but leaves Alice's alone
    let result = bob.push(&bob_env, "/team").unwrap();
    assert_eq!(result.added, vec!["EDITOR"]);
    assert!(result.updated.is_empty());

    let (alice_env, pulled) = alice.pull("/team", &EnvVars::new()).unwrap();
    assert_eq!(pulled.added, vec!["API_URL", "EDITOR", "TIMEOUT"]);
    assert!(alice.diff(&alice_env, "/team").unwrap().is_in_sync());
}

#[test]
fn test_environments_are_isolated_by_prefix() {
    let store = MemoryStore::new();
    let state = checkout(&store);

    state.push(&vars(&[("DB", "prod-db")]), "/app/prod").unwrap();
    state.push(&vars(&[("DB", "staging-db")]), "app/staging").unwrap();

    assert_eq!(store.get("/app/prod").unwrap().get("DB"), Some("prod-db"));
    assert_eq!(store.get("/app/staging/").unwrap().get("DB"), Some("staging-db"));
    assert_eq!(store.list("/app").unwrap(), vec!["prod/DB", "staging/DB"]);
}

#[rstest]
#[case::plain(false, false, &["R"], &[], 1)]
#[case::prune(false, true, &[], &["R"], 2)]
#[case::dry_run(true, false, &["R"], &[], 0)]
#[case::dry_run_prune(true, true, &[], &["R"], 0)]
fn test_push_option_matrix(
    #[case] dry_run: bool,
    #[case] prune: bool,
    #[case] skipped: &[&str],
    #[case] deleted: &[&str],
    #[case] writes: usize,
) {
    let store = MemoryStore::seeded("/", &vars(&[("A", "old"), ("R", "remote-only")]));
    let options = PushOptions { dry_run, prune };

    let result = checkout(&store)
        .push_with(&vars(&[("A", "new"), ("B", "1")]), "/", &options)
        .unwrap();

    assert_eq!(result.added, vec!["B"]);
    assert_eq!(result.updated, vec!["A"]);
    assert_eq!(result.skipped, skipped);
    assert_eq!(result.deleted, deleted);

    let write_calls = store
        .calls()
        .iter()
        .filter(|c| matches!(c, StoreCall::Set { .. } | StoreCall::Delete { .. }))
        .count();
    assert_eq!(write_calls, writes);
}

#[test]
fn test_push_outage_then_recovery() {
    let store = MemoryStore::seeded("/", &vars(&[("A", "1")]));
    store.fail_reads(true);

    // Pre-read fails, so everything is classified as added and re-written
    let result = checkout(&store).push(&vars(&[("A", "1")]), "/").unwrap();
    assert_eq!(result.added, vec!["A"]);

    // Pull refuses to guess when the remote is unreadable
    assert!(checkout(&store).pull("/", &EnvVars::new()).is_err());

    store.fail_reads(false);
    let result = checkout(&store).push(&vars(&[("A", "1")]), "/").unwrap();
    assert!(!result.has_changes());
}

#[test]
fn test_remote_sync_result_json_shape() {
    let store = MemoryStore::seeded("/", &vars(&[("A", "1")]));
    let (_, result) = checkout(&store).pull("/", &EnvVars::new()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["added"], serde_json::json!(["A"]));
    assert_eq!(json["source"], "memory:/");
    assert_eq!(json["target"], "local");
}
