//! Upgrade of stored records from the split-list layout.
//!
//! Older records kept three lists, `flights`, `hotels` and `activities`, whose
//! entries carried no `type` field. They are folded into a single typed
//! `itinerary` list, flights first, then hotels, then activities, each list
//! keeping its own order. The legacy keys are dropped afterwards, so running
//! the upgrade a second time finds nothing to do.

use serde_json::{Map, Value};

use crate::plan::ItemKind;

/// Legacy list keys in the order they are concatenated.
pub const LEGACY_LISTS: [(&str, ItemKind); 3] = [
    ("flights", ItemKind::Flight),
    ("hotels", ItemKind::Hotel),
    ("activities", ItemKind::Activity),
];

fn is_present(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).is_some_and(|value| !value.is_null())
}

/// Whether a stored record still uses the split-list layout.
#[must_use]
pub fn needs_migration(record: &Map<String, Value>) -> bool {
    !is_present(record, "itinerary") && LEGACY_LISTS.iter().any(|(key, _)| is_present(record, key))
}

/// Rewrite a legacy record in place. Returns `true` when anything changed.
///
/// Entries that are not JSON objects cannot carry a `type` tag and are
/// skipped with a warning.
pub fn migrate_record(record: &mut Map<String, Value>) -> bool {
    if !needs_migration(record) {
        return false;
    }
    log::info!("Migrating data to unified itinerary...");

    let mut itinerary = Vec::new();
    for (key, kind) in LEGACY_LISTS {
        let Some(list) = record.remove(key) else {
            continue;
        };
        let entries = match list {
            Value::Array(entries) => entries,
            Value::Null => continue,
            other => {
                log::warn!("legacy `{key}` is not a list, dropping it: {other}");
                continue;
            }
        };
        for entry in entries {
            match entry {
                Value::Object(mut fields) => {
                    fields.insert("type".to_string(), Value::from(kind.tag()));
                    itinerary.push(Value::Object(fields));
                }
                other => log::warn!("skipping malformed legacy {} entry: {other}", kind.tag()),
            }
        }
    }

    log::debug!("migrated {} legacy itinerary entries", itinerary.len());
    record.insert("itinerary".to_string(), Value::Array(itinerary));
    true
}

/// Convenience wrapper for whole JSON values; non-object values are left untouched.
pub fn migrate_value(value: &mut Value) -> bool {
    value.as_object_mut().is_some_and(migrate_record)
}

/// Replace `null` plan lists with empty ones. Missing keys are left to the
/// serde defaults. Nothing is written back for this.
pub fn fill_null_lists(value: &mut Value) {
    let Some(record) = value.as_object_mut() else {
        return;
    };
    for key in ["destinations", "itinerary"] {
        if let Some(slot) = record.get_mut(key).filter(|slot| slot.is_null()) {
            *slot = Value::Array(Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn current_layout_is_left_alone() {
        let mut record = object(json!({ "wallet": 10, "destinations": [], "itinerary": [] }));
        let before = record.clone();
        assert!(!migrate_record(&mut record));
        assert_eq!(record, before);
    }

    #[test]
    fn record_without_any_lists_is_left_alone() {
        let mut record = object(json!({ "wallet": 10, "destinations": [] }));
        assert!(!needs_migration(&record));
        assert!(!migrate_record(&mut record));
        assert!(!record.contains_key("itinerary"));
    }

    #[test]
    fn lists_are_concatenated_in_fixed_order() {
        let mut record = object(json!({
            "wallet": 5000,
            "destinations": [],
            "activities": [{ "id": 30, "details": "a1" }],
            "flights": [{ "id": 10, "details": "f1" }, { "id": 11, "details": "f2" }],
            "hotels": [{ "id": 20, "details": "h1", "nights": 2, "costPerNight": 10, "cost": 20 }]
        }));
        assert!(migrate_record(&mut record));

        let itinerary = record["itinerary"].as_array().unwrap();
        let ids: Vec<i64> = itinerary.iter().map(|v| v["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![10, 11, 20, 30]);
        let kinds: Vec<&str> = itinerary.iter().map(|v| v["type"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["flight", "flight", "hotel", "activity"]);
        assert_eq!(itinerary[2]["costPerNight"], 10);
        for (key, _) in LEGACY_LISTS {
            assert!(!record.contains_key(key), "{key} should be removed");
        }
    }

    #[test]
    fn single_legacy_list_triggers_migration() {
        let mut record = object(json!({ "wallet": 1, "hotels": [] }));
        assert!(migrate_record(&mut record));
        assert_eq!(record["itinerary"], json!([]));
        assert!(!record.contains_key("hotels"));
    }

    #[test]
    fn migration_is_idempotent() {
        let mut record = object(json!({ "flights": [{ "id": 1 }] }));
        assert!(migrate_record(&mut record));
        let once = record.clone();
        assert!(!migrate_record(&mut record));
        assert_eq!(record, once);
    }

    #[test]
    fn null_itinerary_counts_as_absent() {
        let mut record = object(json!({ "itinerary": null, "flights": [{ "id": 1 }] }));
        assert!(migrate_record(&mut record));
        assert_eq!(record["itinerary"][0]["type"], "flight");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut record = object(json!({ "flights": [7, { "id": 2 }], "hotels": "oops" }));
        assert!(migrate_record(&mut record));
        assert_eq!(record["itinerary"], json!([{ "id": 2, "type": "flight" }]));
        assert!(!record.contains_key("hotels"));
    }

    #[test]
    fn null_lists_become_empty() {
        let mut value = json!({"wallet": 10, "destinations": null, "itinerary": null});
        fill_null_lists(&mut value);
        assert_eq!(
            value,
            json!({"wallet": 10, "destinations": [], "itinerary": []})
        );

        let mut untouched = json!({"wallet": 10});
        fill_null_lists(&mut untouched);
        assert_eq!(untouched, json!({"wallet": 10}));
    }

    #[test]
    fn migrate_value_ignores_non_objects() {
        let mut value = json!([1, 2, 3]);
        assert!(!migrate_value(&mut value));
        assert_eq!(value, json!([1, 2, 3]));
    }
}
