//! Unit tests for the preset manager

use crate::fixtures::{filled_form, memory_store};
use crypto_analyst::error::AnalystError;
use crypto_analyst::models::{FieldEdit, TechnicalData, Timeframe};
use crypto_analyst::presets::PresetManager;
use crypto_analyst::store::{KeyValueStore, PRESETS_KEY};

#[test]
fn test_save_appends_and_persists() {
    let store = memory_store();
    let mut presets = PresetManager::open(store.clone());

    let saved = presets.save("  Morning levels ", &filled_form()).unwrap().expect("saved");
    assert_eq!(saved.name, "Morning levels");
    assert!(!saved.id.is_empty());
    assert!(saved.timestamp > 0);

    presets.save("Evening", &TechnicalData::default()).unwrap();
    let names: Vec<&str> = presets.list().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Morning levels", "Evening"]);

    let reopened = PresetManager::open(store);
    assert_eq!(reopened.list(), presets.list());
}

#[test]
fn test_blank_name_is_a_no_op() {
    let store = memory_store();
    let mut presets = PresetManager::open(store.clone());

    assert_eq!(presets.save("   ", &filled_form()).unwrap(), None);
    assert!(presets.list().is_empty());
    assert_eq!(store.get(PRESETS_KEY).unwrap(), None);
}

#[test]
fn test_ids_are_unique() {
    let mut presets = PresetManager::open(memory_store());
    let a = presets.save("A", &filled_form()).unwrap().unwrap();
    let b = presets.save("A", &filled_form()).unwrap().unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_load_returns_independent_copy() {
    let mut presets = PresetManager::open(memory_store());
    let saved = presets.save("Snap", &filled_form()).unwrap().unwrap();

    let mut loaded = presets.load(&saved.id).unwrap();
    assert_eq!(loaded, filled_form());

    loaded = loaded.apply(FieldEdit::SupportResistance(Timeframe::H2, "changed".into()));
    loaded.current_price.push_str(" (edited)");
    assert_eq!(presets.load(&saved.id).unwrap(), filled_form());
    assert_ne!(loaded, filled_form());
}

#[test]
fn test_saved_snapshot_ignores_later_form_edits() {
    let mut presets = PresetManager::open(memory_store());
    let mut live = filled_form();
    let saved = presets.save("Snap", &live).unwrap().unwrap();

    live.current_price = "100,000".to_string();
    assert_eq!(presets.load(&saved.id).unwrap().current_price, "96,500");
}

#[test]
fn test_load_unknown_id_is_not_found() {
    let presets = PresetManager::open(memory_store());
    assert!(matches!(presets.load("missing"), Err(AnalystError::NotFound(_))));
}

#[test]
fn test_delete_removes_and_persists() {
    let store = memory_store();
    let mut presets = PresetManager::open(store.clone());
    let a = presets.save("A", &filled_form()).unwrap().unwrap();
    let b = presets.save("B", &filled_form()).unwrap().unwrap();

    presets.delete(&a.id).unwrap();
    assert_eq!(presets.list().len(), 1);
    assert_eq!(presets.list()[0].id, b.id);
    assert_eq!(PresetManager::open(store).list().len(), 1);
}

#[test]
fn test_delete_unknown_id_changes_nothing() {
    let store = memory_store();
    let mut presets = PresetManager::open(store.clone());
    presets.save("A", &filled_form()).unwrap();
    let before = store.get(PRESETS_KEY).unwrap();

    presets.delete("no-such-id").expect("no error");
    assert_eq!(presets.list().len(), 1);
    assert_eq!(store.get(PRESETS_KEY).unwrap(), before);
}

#[test]
fn test_malformed_list_starts_empty() {
    let store = memory_store();
    store.put(PRESETS_KEY, "corrupted").unwrap();

    let mut presets = PresetManager::open(store.clone());
    assert!(presets.list().is_empty());

    presets.save("Fresh", &filled_form()).unwrap();
    assert_eq!(PresetManager::open(store).list().len(), 1);
}
