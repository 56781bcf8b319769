use std::fs;
use std::time::Duration;

use session_store::{
    generate_session_id, get_or_create_session_id, FileTabStorage, MemoryStorage,
    SessionStoreError, TabStorage, SESSION_ID_KEY,
};
use tempfile::tempdir;
use time::macros::datetime;
use time::OffsetDateTime;

struct BrokenStorage;

impl TabStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, SessionStoreError> {
        Err(SessionStoreError::EmptyTabKey)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::EmptyTabKey)
    }
}

#[test]
fn generated_ids_carry_random_part_and_timestamp() {
    let now = datetime!(2024-01-02 03:04:05 UTC);
    let id = generate_session_id(now);

    let parts: Vec<&str> = id.split('_').collect();
    assert_eq!(parts.len(), 3, "unexpected id shape: {id}");
    assert_eq!(parts[0], "session");
    assert_eq!(parts[1].len(), 9);
    assert_eq!(parts[2], "1704164645000");
    assert_ne!(id, generate_session_id(now));
}

#[test]
fn same_tab_returns_identical_id() {
    let storage = MemoryStorage::new();
    let first = get_or_create_session_id(&storage, OffsetDateTime::now_utc());
    let second = get_or_create_session_id(&storage, OffsetDateTime::now_utc());

    assert_eq!(first, second);
    assert_eq!(
        storage.get(SESSION_ID_KEY).expect("memory get"),
        Some(first)
    );
}

#[test]
fn fresh_tab_gets_a_different_id() {
    let now = OffsetDateTime::now_utc();
    let first_tab = MemoryStorage::new();
    let second_tab = MemoryStorage::new();

    let first = get_or_create_session_id(&first_tab, now);
    let second = get_or_create_session_id(&second_tab, now);

    assert_ne!(first, second);
}

#[test]
fn blank_stored_id_is_regenerated() {
    let storage = MemoryStorage::new();
    storage.set(SESSION_ID_KEY, "  ").expect("memory set");

    let id = get_or_create_session_id(&storage, OffsetDateTime::now_utc());
    assert!(id.starts_with("session_"));
    assert_eq!(storage.get(SESSION_ID_KEY).expect("memory get"), Some(id));
}

#[test]
fn unavailable_storage_still_yields_an_id() {
    let id = get_or_create_session_id(&BrokenStorage, OffsetDateTime::now_utc());
    assert!(id.starts_with("session_"));
}

#[test]
fn file_storage_persists_across_instances_of_the_same_tab() {
    let dir = tempdir().expect("temp dir");

    let first = {
        let storage = FileTabStorage::new(dir.path(), "ppid-100").expect("storage");
        get_or_create_session_id(&storage, OffsetDateTime::now_utc())
    };
    let reopened = FileTabStorage::new(dir.path(), "ppid-100").expect("storage");
    let second = get_or_create_session_id(&reopened, OffsetDateTime::now_utc());

    assert_eq!(first, second);
    assert!(reopened.path().ends_with("tabs/ppid-100.json"));
}

#[test]
fn file_storage_isolates_tabs() {
    let dir = tempdir().expect("temp dir");
    let tab_a = FileTabStorage::new(dir.path(), "ppid-1").expect("storage");
    let tab_b = FileTabStorage::new(dir.path(), "ppid-2").expect("storage");

    let a = get_or_create_session_id(&tab_a, OffsetDateTime::now_utc());
    let b = get_or_create_session_id(&tab_b, OffsetDateTime::now_utc());

    assert_ne!(a, b);
    assert_eq!(tab_b.get("other").expect("get"), None);
}

#[test]
fn file_storage_keeps_unrelated_keys() {
    let dir = tempdir().expect("temp dir");
    let storage = FileTabStorage::new(dir.path(), "tab").expect("storage");

    storage.set("first", "1").expect("set first");
    storage.set("second", "2").expect("set second");

    assert_eq!(storage.get("first").expect("get"), Some("1".to_owned()));
    assert_eq!(storage.get("second").expect("get"), Some("2".to_owned()));
    assert_eq!(storage.get("missing").expect("get"), None);
}

#[test]
fn corrupt_record_is_reported_and_identity_falls_back() {
    let dir = tempdir().expect("temp dir");
    let storage = FileTabStorage::new(dir.path(), "tab").expect("storage");
    fs::create_dir_all(storage.path().parent().expect("parent")).expect("mkdir");
    fs::write(storage.path(), "{not json").expect("write corrupt record");

    assert!(matches!(
        storage.get(SESSION_ID_KEY),
        Err(SessionStoreError::JsonParse { .. })
    ));
    let id = get_or_create_session_id(&storage, OffsetDateTime::now_utc());
    assert!(id.starts_with("session_"));
}

#[test]
fn unsupported_record_version_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let storage = FileTabStorage::new(dir.path(), "tab").expect("storage");
    fs::create_dir_all(storage.path().parent().expect("parent")).expect("mkdir");
    fs::write(
        storage.path(),
        r#"{"version":2,"created_at":"2024-01-01T00:00:00Z","values":{}}"#,
    )
    .expect("write record");

    assert!(matches!(
        storage.get(SESSION_ID_KEY),
        Err(SessionStoreError::UnsupportedVersion { found: 2, .. })
    ));
}

#[test]
fn empty_tab_key_is_rejected() {
    let dir = tempdir().expect("temp dir");
    assert!(matches!(
        FileTabStorage::new(dir.path(), "   "),
        Err(SessionStoreError::EmptyTabKey)
    ));
}

#[test]
fn reused_tab_key_with_a_new_owner_gets_a_fresh_id() {
    let dir = tempdir().expect("temp dir");
    let first_shell = FileTabStorage::new(dir.path(), "ppid-4242")
        .expect("storage")
        .with_owner(Some("start-1000".to_owned()));
    let old_id = get_or_create_session_id(&first_shell, OffsetDateTime::now_utc());

    let same_shell = FileTabStorage::new(dir.path(), "ppid-4242")
        .expect("storage")
        .with_owner(Some("start-1000".to_owned()));
    assert_eq!(
        get_or_create_session_id(&same_shell, OffsetDateTime::now_utc()),
        old_id
    );

    let new_shell = FileTabStorage::new(dir.path(), "ppid-4242")
        .expect("storage")
        .with_owner(Some("start-2000".to_owned()));
    assert_eq!(new_shell.get(SESSION_ID_KEY).expect("get"), None);
    let new_id = get_or_create_session_id(&new_shell, OffsetDateTime::now_utc());
    assert_ne!(new_id, old_id);

    let raw = fs::read_to_string(new_shell.path()).expect("read record");
    assert!(raw.contains("start-2000"));
    assert_eq!(
        get_or_create_session_id(&new_shell, OffsetDateTime::now_utc()),
        new_id
    );
}

#[test]
fn stale_tab_records_are_pruned_except_the_current_one() {
    let dir = tempdir().expect("temp dir");
    let current = FileTabStorage::new(dir.path(), "ppid-1").expect("storage");
    let closed = FileTabStorage::new(dir.path(), "ppid-2").expect("storage");
    current.set("k", "v").expect("set current");
    closed.set("k", "v").expect("set closed");

    let kept = FileTabStorage::prune_stale(dir.path(), Duration::from_secs(3600), current.path())
        .expect("prune recent");
    assert_eq!(kept, 0);
    assert!(closed.path().exists());

    let removed = FileTabStorage::prune_stale(dir.path(), Duration::ZERO, current.path())
        .expect("prune all stale");
    assert_eq!(removed, 1);
    assert!(current.path().exists());
    assert!(!closed.path().exists());
}

#[test]
fn pruning_a_missing_state_root_is_a_no_op() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("never-created");
    assert_eq!(
        FileTabStorage::prune_stale(&missing, Duration::ZERO, &missing.join("x.json"))
            .expect("prune"),
        0
    );
}
