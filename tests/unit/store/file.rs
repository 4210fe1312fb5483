//! Unit tests for the directory-backed store

use crate::fixtures::scratch_dir;
use crypto_analyst::store::{FileStore, KeyValueStore};

#[test]
fn test_values_survive_reopen() {
    let dir = scratch_dir("file-store");
    {
        let store = FileStore::open(&dir).unwrap();
        store.put("presets", r#"[{"id":"1"}]"#).unwrap();
        store.put("auto-save", "{}").unwrap();
    }

    let reopened = FileStore::open(&dir).unwrap();
    assert_eq!(
        reopened.get("presets").unwrap().as_deref(),
        Some(r#"[{"id":"1"}]"#)
    );
    assert!(reopened.root().join("auto-save.json").exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_key_and_delete() {
    let dir = scratch_dir("file-store-delete");
    let store = FileStore::open(&dir).unwrap();

    assert_eq!(store.get("auto-save").unwrap(), None);
    store.delete("auto-save").expect("deleting an absent key is fine");

    store.put("auto-save", "{}").unwrap();
    store.delete("auto-save").unwrap();
    assert_eq!(store.get("auto-save").unwrap(), None);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_overwrite_leaves_no_staging_file() {
    let dir = scratch_dir("file-store-overwrite");
    let store = FileStore::open(&dir).unwrap();

    store.put("presets", "first").unwrap();
    store.put("presets", "second").unwrap();

    assert_eq!(store.get("presets").unwrap().as_deref(), Some("second"));
    assert!(!store.root().join("presets.json.tmp").exists());

    std::fs::remove_dir_all(&dir).ok();
}
