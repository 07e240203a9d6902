use medtrack_client::{FileSessionStore, Session, SessionStore};

#[test]
fn test_file_store_persists_between_instances() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("session.json");

    let store = FileSessionStore::new(&path);
    assert_eq!(store.load().unwrap(), None);

    store.save(&Session::new("42", Some("jwt".to_string()))).unwrap();

    let reopened = FileSessionStore::new(&path);
    let session = reopened.load().unwrap().unwrap();
    assert_eq!(session.user_id, "42");
    assert_eq!(session.token.as_deref(), Some("jwt"));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"userID\""));
}

#[test]
fn test_file_store_clear() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(tmp.path().join("session.json"));

    store.save(&Session::new("1", None)).unwrap();
    store.clear().unwrap();

    assert_eq!(store.load().unwrap(), None);
    assert!(!store.path().exists());
    store.clear().unwrap();
}

#[test]
fn test_file_store_rejects_garbage() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(FileSessionStore::new(&path).load().is_err());
}
