//! Unit tests for the form state controller

use crate::fixtures::{filled_form, memory_store};
use crypto_analyst::form::FormController;
use crypto_analyst::models::{FieldEdit, TechnicalData, Timeframe};
use crypto_analyst::store::{read_record, KeyValueStore, AUTO_SAVE_KEY};

fn auto_save(store: &dyn KeyValueStore) -> Option<TechnicalData> {
    read_record(store, AUTO_SAVE_KEY)
}

#[test]
fn test_new_controller_does_not_write() {
    let store = memory_store();
    let form = FormController::new(store.clone());

    assert_eq!(form.data(), &TechnicalData::default());
    assert!(!form.is_dirty());
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), None);
}

#[test]
fn test_update_mirrors_to_auto_save() {
    let store = memory_store();
    let mut form = FormController::new(store.clone());

    form.update(filled_form());
    assert!(form.is_dirty());
    assert_eq!(auto_save(store.as_ref()), Some(filled_form()));
}

#[test]
fn test_auto_save_holds_exactly_the_latest_edit() {
    let store = memory_store();
    let mut form = FormController::new(store.clone());

    let prices = ["96,000", "96,250", "96,500", "96,750"];
    for (n, price) in prices.iter().enumerate() {
        form.apply(FieldEdit::CurrentPrice(price.to_string()));
        let saved = auto_save(store.as_ref()).expect("slot written");
        assert_eq!(saved.current_price, prices[n]);
    }
    assert_eq!(auto_save(store.as_ref()).unwrap().current_price, "96,750");
}

#[test]
fn test_apply_merges_within_group() {
    let store = memory_store();
    let mut form = FormController::new(store);

    form.apply(FieldEdit::SupportResistance(Timeframe::H2, "96k".into()));
    form.apply(FieldEdit::SupportResistance(Timeframe::W1, "88k".into()));

    assert_eq!(form.data().support_resistance.h2, "96k");
    assert_eq!(form.data().support_resistance.w1, "88k");
}

#[test]
fn test_hydrate_does_not_rewrite_identical_data() {
    let store = memory_store();
    let mut form = FormController::new(store.clone());

    form.hydrate(filled_form());
    assert_eq!(form.data(), &filled_form());
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), None);

    // Re-submitting the hydrated value is not a change
    form.update(filled_form());
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), None);

    form.apply(FieldEdit::CurrentPrice("97,000".into()));
    assert_eq!(auto_save(store.as_ref()).unwrap().current_price, "97,000");
}

#[test]
fn test_clear_keeps_live_form_and_next_edit_recreates_slot() {
    let store = memory_store();
    let mut form = FormController::new(store.clone());
    form.update(filled_form());

    form.clear_auto_save().unwrap();
    assert_eq!(store.get(AUTO_SAVE_KEY).unwrap(), None);
    assert_eq!(form.data(), &filled_form());

    form.update(filled_form());
    assert_eq!(auto_save(store.as_ref()), Some(filled_form()));
}
