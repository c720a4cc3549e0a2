//! Durable slot scenarios: defaults, legacy upgrade, round trip, corruption.

use anyhow::{Context, Result, bail, ensure};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde_json::{Value, json};
use tripplan_core::{
    CorruptPolicy, ItemKind, ItineraryItem, MemoryStore, PLAN_KEY, Plan, PlanStore, StoreConfig,
};

use super::fixtures::{itinerary_ids, quarter_amount, random_date, random_plan};

pub fn default_synthesis(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let store = PlanStore::new(backend.clone());
    for _ in 0..rng.gen_range(1..4) {
        let plan = store.load()?;
        ensure!(plan == Plan::default(), "empty slot produced {plan:?}");
    }
    ensure!(backend.is_empty(), "loading an empty slot wrote to storage");

    let wallet = quarter_amount(rng);
    let config = StoreConfig {
        default_wallet: wallet,
        ..StoreConfig::default()
    };
    let plan = PlanStore::with_config(backend, config).load()?;
    ensure!(plan.wallet == wallet, "configured default wallet ignored");
    Ok(())
}

fn legacy_list(rng: &mut ChaCha20Rng, label: &str, id_base: i64, hotel: bool) -> Vec<Value> {
    let count = rng.gen_range(0..4);
    (0..count)
        .map(|offset| {
            let id = id_base + offset;
            let date = random_date(rng);
            if hotel {
                let rate = quarter_amount(rng);
                let nights = rng.gen_range(1..=5_u32);
                json!({
                    "id": id,
                    "details": format!("{label} {id}"),
                    "date": date,
                    "cost": rate * f64::from(nights),
                    "nights": nights,
                    "costPerNight": rate
                })
            } else {
                json!({
                    "id": id,
                    "details": format!("{label} {id}"),
                    "date": date,
                    "cost": quarter_amount(rng),
                    "completed": rng.gen_bool(0.5)
                })
            }
        })
        .collect()
}

fn ids_of(list: &[Value]) -> Vec<i64> {
    list.iter().filter_map(|v| v["id"].as_i64()).collect()
}

pub fn legacy_migration(rng: &mut ChaCha20Rng) -> Result<()> {
    let flights = legacy_list(rng, "flight", 100, false);
    let hotels = legacy_list(rng, "hotel", 200, true);
    let activities = legacy_list(rng, "activity", 300, false);

    let mut record = json!({
        "wallet": quarter_amount(rng),
        "destinations": [],
        "flights": flights,
    });
    // Older saves may lack a list entirely.
    if rng.gen_bool(0.8) {
        record["hotels"] = json!(hotels);
    }
    if rng.gen_bool(0.8) {
        record["activities"] = json!(activities);
    }

    let mut expected: Vec<(ItemKind, i64)> = Vec::new();
    for (kind, key) in [
        (ItemKind::Flight, "flights"),
        (ItemKind::Hotel, "hotels"),
        (ItemKind::Activity, "activities"),
    ] {
        if let Some(list) = record.get(key).and_then(Value::as_array) {
            expected.extend(ids_of(list).into_iter().map(|id| (kind, id)));
        }
    }

    let backend = MemoryStore::new().with_entry(PLAN_KEY, record.to_string());
    let store = PlanStore::new(backend.clone());
    let plan = store.load()?;
    let actual: Vec<(ItemKind, i64)> = plan
        .itinerary
        .iter()
        .map(|item| (item.kind(), item.id()))
        .collect();
    ensure!(actual == expected, "migrated order {actual:?} != {expected:?}");

    for item in &plan.itinerary {
        if let ItineraryItem::Hotel(stay) = item {
            ensure!(
                stay.entry.cost == stay.cost_per_night * f64::from(stay.nights),
                "hotel {} lost its pricing",
                stay.entry.id
            );
        }
    }

    let raw = backend.raw(PLAN_KEY).context("migrated record missing")?;
    let stored: Value = serde_json::from_str(&raw)?;
    for key in ["flights", "hotels", "activities"] {
        ensure!(stored.get(key).is_none(), "legacy `{key}` survived migration");
    }
    ensure!(stored.get("itinerary").is_some(), "itinerary not written");

    let second = store.load()?;
    ensure!(second == plan, "second load differs from the first");
    ensure!(
        backend.raw(PLAN_KEY).as_deref() == Some(raw.as_str()),
        "second load rewrote the record"
    );
    Ok(())
}

pub fn round_trip(rng: &mut ChaCha20Rng) -> Result<()> {
    let store = PlanStore::new(MemoryStore::new());
    for _ in 0..rng.gen_range(1..4) {
        let plan = random_plan(rng, 12);
        store.save(&plan)?;
        let loaded = store.load()?;
        ensure!(
            loaded == plan,
            "round trip changed the plan (ids {:?} -> {:?})",
            itinerary_ids(&plan),
            itinerary_ids(&loaded)
        );
    }
    Ok(())
}

const CORRUPT_RECORDS: &[&str] = &[
    "{\"wallet\":",
    "not json at all",
    r#"{"wallet":"lots","destinations":[]}"#,
    r#"{"wallet":1,"destinations":[],"itinerary":[{"id":1,"type":"cruise","details":"x","date":"y","cost":1}]}"#,
];

pub fn corrupt_record(rng: &mut ChaCha20Rng) -> Result<()> {
    let raw = CORRUPT_RECORDS[rng.gen_range(0..CORRUPT_RECORDS.len())];
    let backend = MemoryStore::new().with_entry(PLAN_KEY, raw);

    match PlanStore::new(backend.clone()).load() {
        Err(err) if err.is_corrupt() => {}
        Err(err) => bail!("expected a corrupt-record error, got {err}"),
        Ok(plan) => bail!("corrupt record {raw:?} loaded as {plan:?}"),
    }

    let config = StoreConfig::default().with_corrupt_policy(CorruptPolicy::ResetToDefault);
    let plan = PlanStore::with_config(backend.clone(), config).load()?;
    ensure!(plan == Plan::default(), "reset policy returned {plan:?}");
    ensure!(
        backend.raw(PLAN_KEY).as_deref() == Some(raw),
        "reset policy rewrote the slot before any save"
    );
    Ok(())
}
