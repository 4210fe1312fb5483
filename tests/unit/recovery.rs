//! Unit tests for the startup recovery flow

use crate::fixtures::{filled_form, memory_store};
use crypto_analyst::error::AnalystError;
use crypto_analyst::form::FormController;
use crypto_analyst::models::{FieldEdit, TechnicalData, TimeFibLevel};
use crypto_analyst::presets::PresetManager;
use crypto_analyst::recovery::{RecoveryFlow, RecoveryState};
use crypto_analyst::store::{write_record, KeyValueStore, AUTO_SAVE_KEY};
use std::sync::Arc;

fn store_with_auto_save(data: &TechnicalData) -> Arc<dyn KeyValueStore> {
    let store = memory_store();
    write_record(store.as_ref(), AUTO_SAVE_KEY, data).unwrap();
    store
}

#[test]
fn test_empty_slot_means_no_recovery() {
    let mut form = FormController::new(memory_store());
    let mut flow = RecoveryFlow::new();
    assert_eq!(flow.state(), RecoveryState::Idle);

    assert_eq!(flow.check(&mut form), RecoveryState::NoRecovery);
    assert!(!flow.banner_visible());
    assert_eq!(form.data(), &TechnicalData::default());
}

#[test]
fn test_trivial_snapshot_is_not_recovered() {
    let only_time_fibs =
        TechnicalData::default().apply(FieldEdit::TimeFib(TimeFibLevel::Zero, "Dec 1".into()));
    let mut form = FormController::new(store_with_auto_save(&only_time_fibs));
    let mut flow = RecoveryFlow::new();

    assert_eq!(flow.check(&mut form), RecoveryState::NoRecovery);
    assert_eq!(form.data(), &TechnicalData::default());
}

#[test]
fn test_malformed_slot_is_not_recovered() {
    let store = memory_store();
    store.put(AUTO_SAVE_KEY, "<<garbage>>").unwrap();
    let mut form = FormController::new(store);

    assert_eq!(RecoveryFlow::new().check(&mut form), RecoveryState::NoRecovery);
}

#[test]
fn test_non_trivial_snapshot_hydrates_form_and_shows_banner() {
    let mut form = FormController::new(store_with_auto_save(&filled_form()));
    let mut flow = RecoveryFlow::new();

    assert_eq!(flow.check(&mut form), RecoveryState::BannerShown);
    assert!(flow.banner_visible());
    assert_eq!(form.data(), &filled_form());

    // A second check never re-opens anything
    flow.dismiss();
    assert_eq!(flow.check(&mut form), RecoveryState::Closed);
}

#[test]
fn test_promote_saves_preset_and_keeps_slot() {
    let store = store_with_auto_save(&filled_form());
    let mut form = FormController::new(store.clone());
    let mut presets = PresetManager::open(store.clone());
    let mut flow = RecoveryFlow::new();
    flow.check(&mut form);

    assert_eq!(flow.promote("  ", &form, &mut presets).unwrap(), None);
    assert!(flow.banner_visible(), "blank name leaves the banner up");

    let preset = flow.promote("Recovered", &form, &mut presets).unwrap().unwrap();
    assert_eq!(preset.data, filled_form());
    assert_eq!(flow.state(), RecoveryState::Closed);
    assert!(store.get(AUTO_SAVE_KEY).unwrap().is_some());
}

#[test]
fn test_clear_removes_slot_but_keeps_live_values() {
    let store = store_with_auto_save(&filled_form());
    let mut form = FormController::new(store.clone());
    let mut flow = RecoveryFlow::new();
    flow.check(&mut form);

    flow.clear(&mut form).unwrap();
    assert_eq!(flow.state(), RecoveryState::Closed);
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), None);
    assert_eq!(form.data(), &filled_form());

    form.apply(FieldEdit::CurrentPrice("97k".into()));
    assert!(store.get(AUTO_SAVE_KEY).unwrap().is_some());
}

#[test]
fn test_dismiss_changes_no_data() {
    let store = store_with_auto_save(&filled_form());
    let before = store.get(AUTO_SAVE_KEY).unwrap();
    let mut form = FormController::new(store.clone());
    let mut flow = RecoveryFlow::new();
    flow.check(&mut form);

    flow.dismiss();
    assert!(!flow.banner_visible());
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), before);
    assert_eq!(form.data(), &filled_form());
}

#[test]
fn test_promote_requires_open_banner() {
    let store = memory_store();
    let mut form = FormController::new(store.clone());
    let mut presets = PresetManager::open(store.clone());
    let mut flow = RecoveryFlow::new();
    flow.check(&mut form);

    let result = flow.promote("Anything", &form, &mut presets);
    assert!(matches!(result, Err(AnalystError::RecoveryClosed)));
    assert!(presets.list().is_empty());

    let store = store_with_auto_save(&filled_form());
    let mut form = FormController::new(store.clone());
    let mut presets = PresetManager::open(store);
    let mut flow = RecoveryFlow::new();
    flow.check(&mut form);
    flow.dismiss();

    let result = flow.promote("Late", &form, &mut presets);
    assert!(matches!(result, Err(AnalystError::RecoveryClosed)));
    assert!(presets.list().is_empty());
}
