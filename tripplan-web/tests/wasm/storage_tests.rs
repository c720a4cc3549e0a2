#![cfg(target_arch = "wasm32")]

use tripplan_core::{KeyValueStore, PLAN_KEY, PlanStore, SESSION_KEY, Session};
use tripplan_web::LocalStorageSlot;
use tripplan_web::bridge::TripPlanner;
use tripplan_web::dom;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_slots() {
    let storage = dom::local_storage().expect("localStorage");
    storage.remove_item(PLAN_KEY).expect("clear plan");
    storage.remove_item(SESSION_KEY).expect("clear session");
}

#[wasm_bindgen_test]
fn slot_round_trips_raw_values() {
    clear_slots();
    let slot = LocalStorageSlot;
    assert_eq!(slot.get("tripplan.test").expect("get"), None);
    slot.set("tripplan.test", "value").expect("set");
    assert_eq!(slot.get("tripplan.test").expect("get").as_deref(), Some("value"));
    slot.remove("tripplan.test").expect("remove");
    assert_eq!(slot.get("tripplan.test").expect("get"), None);
}

#[wasm_bindgen_test]
fn legacy_record_in_local_storage_is_upgraded() {
    clear_slots();
    let legacy = r#"{"wallet":900,"destinations":[],"flights":[{"id":1,"details":"A","date":"2030-01-01","cost":10}],"hotels":[],"activities":[]}"#;
    dom::local_storage()
        .expect("localStorage")
        .set_item(PLAN_KEY, legacy)
        .expect("seed");

    let plan = PlanStore::new(LocalStorageSlot).load().expect("load");
    assert_eq!(plan.itinerary.len(), 1);
    let raw = LocalStorageSlot.get(PLAN_KEY).expect("get").expect("stored");
    assert!(raw.contains("\"itinerary\""));
    assert!(!raw.contains("\"flights\""));
}

#[wasm_bindgen_test]
fn session_survives_new_handles() {
    clear_slots();
    assert!(Session::new(LocalStorageSlot).login("noor").expect("login"));
    assert_eq!(
        Session::new(LocalStorageSlot).current_user().expect("user").as_deref(),
        Some("noor")
    );
}

#[wasm_bindgen_test]
fn planner_class_reports_notices() {
    clear_slots();
    let mut planner = TripPlanner::new().expect("planner");
    let notice = planner.add_to_plan(1.0).expect("add");
    let kind = js_sys::Reflect::get(&notice, &JsValue::from_str("kind")).expect("kind");
    assert_eq!(kind.as_string().as_deref(), Some("auth_required"));

    planner.login("noor").expect("login");
    let notice = planner.set_budget("abc").expect("budget");
    let kind = js_sys::Reflect::get(&notice, &JsValue::from_str("kind")).expect("kind");
    assert_eq!(kind.as_string().as_deref(), Some("invalid"));
}

#[wasm_bindgen_test]
fn planner_class_exposes_itinerary_rows() {
    clear_slots();
    let mut planner = TripPlanner::new().expect("planner");
    planner.login("noor").expect("login");
    let draft = js_sys::Object::new();
    for (field, value) in [("details", "Sunset cruise"), ("date", "2030-05-01"), ("cost", "45")] {
        js_sys::Reflect::set(&draft, &JsValue::from_str(field), &JsValue::from_str(value))
            .expect("draft field");
    }
    planner.add_activity(draft.into()).expect("add activity");

    let rows = js_sys::Array::from(&planner.itinerary_rows().expect("rows"));
    assert_eq!(rows.length(), 1);
    let row = rows.get(0);
    let field = |name: &str| js_sys::Reflect::get(&row, &JsValue::from_str(name)).expect(name);
    assert_eq!(field("index").as_f64(), Some(0.0));
    assert_eq!(field("heading").as_string().as_deref(), Some("Activity: Sunset cruise"));
    assert_eq!(field("dateLine").as_string().as_deref(), Some("2030-05-01"));
    assert_eq!(field("costLine").as_string().as_deref(), Some("$45.00"));
    assert_eq!(field("completed").as_bool(), Some(false));
}
