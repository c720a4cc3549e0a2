//! Seeded plan data shared by the scenarios.

use anyhow::{Context, Result, ensure};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tripplan_core::{
    Catalog, Destination, Entry, HotelStay, ItineraryItem, ManualClock, MemoryStore, Notice,
    NoticeKind, Plan, Planner,
};

/// Clock start for planners opened by scenarios; ids count up from here.
pub const CLOCK_START: f64 = 1_700_000_000_000.0;
const BASE_ID: i64 = 1_700_000_000_000;

pub type ScenarioPlanner = Planner<MemoryStore, ManualClock>;

pub fn sample_catalog() -> Catalog {
    let rows = [
        ("Kyoto", "Asia", 150.0),
        ("Lisbon", "Europe", 90.0),
        ("Cusco", "South America", 60.0),
        ("Sydney", "Oceania", 210.0),
        ("Cape Town", "Africa", 80.0),
        ("Reykjavik", "Europe", 230.0),
    ];
    Catalog(
        rows.iter()
            .zip(1..)
            .map(|(&(name, continent, per_day), id)| Destination {
                id,
                name: name.to_string(),
                continent: continent.to_string(),
                description: format!("{name} sample entry"),
                min_budget_day: per_day,
                image: String::new(),
            })
            .collect(),
    )
}

pub fn open_planner(backend: &MemoryStore) -> Result<ScenarioPlanner> {
    Planner::new(
        backend.clone(),
        sample_catalog(),
        ManualClock::new(CLOCK_START, 1.0),
    )
    .context("opening planner")
}

/// Amount in quarter units so sums and JSON round trips stay exact.
pub fn quarter_amount(rng: &mut ChaCha20Rng) -> f64 {
    f64::from(rng.gen_range(0..4000_u32)) / 4.0
}

pub fn random_date(rng: &mut ChaCha20Rng) -> String {
    format!(
        "2031-{:02}-{:02}",
        rng.gen_range(1..=12),
        rng.gen_range(1..=28)
    )
}

pub fn random_item(rng: &mut ChaCha20Rng, id: i64) -> ItineraryItem {
    let date = random_date(rng);
    let amount = quarter_amount(rng);
    let mut item = match rng.gen_range(0..3) {
        0 => ItineraryItem::Flight(Entry::new(id, format!("flight {id}"), date, amount)),
        1 => ItineraryItem::Hotel(HotelStay::new(
            id,
            format!("hotel {id}"),
            date,
            amount,
            rng.gen_range(1..=7),
        )),
        _ => ItineraryItem::Activity(Entry::new(id, format!("activity {id}"), date, amount)),
    };
    item.entry_mut().completed = rng.gen_bool(0.3);
    item
}

pub fn random_plan(rng: &mut ChaCha20Rng, max_items: usize) -> Plan {
    let mut plan = Plan::with_wallet(quarter_amount(rng) * 4.0);
    for destination in sample_catalog().iter() {
        if rng.gen_bool(0.4) {
            plan.push_destination(destination.clone());
        }
    }
    let count = rng.gen_range(0..=max_items);
    for offset in 0..count {
        let id = BASE_ID + i64::try_from(offset).unwrap_or(i64::MAX - BASE_ID);
        plan.itinerary.push(random_item(rng, id));
    }
    plan
}

pub fn itinerary_ids(plan: &Plan) -> Vec<i64> {
    plan.itinerary.iter().map(ItineraryItem::id).collect()
}

pub fn expect_kind(notice: &Notice, kind: NoticeKind) -> Result<()> {
    ensure!(
        notice.kind == kind,
        "expected {kind:?} notice, got {:?}: {}",
        notice.kind,
        notice.message
    );
    Ok(())
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
