use p2p_desk::{
    store::{FileStore, KeyValueStore, Navigator, SCREEN_KEY},
    types::Screen,
};

/// Active screen survives a restart through the state file.
#[test]
fn test_screen_restored_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let mut navigator = Navigator::restore(FileStore::open(&path));
    assert_eq!(navigator.current(), Screen::Home);
    navigator.navigate(Screen::Rewards).unwrap();
    navigator.navigate(Screen::Profile).unwrap();
    drop(navigator);

    let navigator = Navigator::restore(FileStore::open(&path));
    assert_eq!(navigator.current(), Screen::Profile);
    assert_eq!(
        navigator.store().get(SCREEN_KEY).unwrap().as_deref(),
        Some("profile")
    );
}

/// Stale or foreign values in the state file fall back to the home screen.
#[test]
fn test_unknown_screen_falls_back_to_home() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, r#"{"currentPage": "orders", "theme": "dark"}"#).unwrap();

    let mut navigator = Navigator::restore(FileStore::open(&path));
    assert_eq!(navigator.current(), Screen::Home);

    // Other keys are preserved on write
    navigator.navigate(Screen::Sell).unwrap();
    let store = FileStore::open(&path);
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(store.get(SCREEN_KEY).unwrap().as_deref(), Some("sell"));
}

/// A corrupted state file opens the home screen and is replaced on the next
/// screen change.
#[test]
fn test_corrupted_state_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json{").unwrap();

    let mut navigator = Navigator::restore(FileStore::open(&path));
    assert_eq!(navigator.current(), Screen::Home);

    navigator.navigate(Screen::Rewards).unwrap();
    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(saved, serde_json::json!({"currentPage": "rewards"}));

    let navigator = Navigator::restore(FileStore::open(&path));
    assert_eq!(navigator.current(), Screen::Rewards);
}
