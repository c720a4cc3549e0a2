//! Planner operation scenarios: adds, budget, duplicates, clearing, sign-in.

use anyhow::{Context, Result, ensure};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tripplan_core::{
    CUSTOM_DESTINATION_IMAGE, DEFAULT_WALLET, DestinationDraft, HotelDraft, ItemDraft,
    MemoryStore, NoticeKind, PLAN_KEY, PlanStore,
};

use super::fixtures::{
    approx_eq, expect_kind, open_planner, quarter_amount, random_date, random_plan,
    sample_catalog,
};

const USERNAMES: &[&str] = &["amina", "bruno", "chen", "dara", "eli"];

fn username(rng: &mut ChaCha20Rng) -> &'static str {
    USERNAMES[rng.gen_range(0..USERNAMES.len())]
}

pub fn smoke(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let mut planner = open_planner(&backend)?;
    expect_kind(&planner.login(username(rng))?, NoticeKind::Success)?;

    let catalog = sample_catalog();
    let pick = catalog.0[rng.gen_range(0..catalog.len())].id;
    expect_kind(&planner.add_to_plan(pick)?, NoticeKind::Success)?;

    let date = random_date(rng);
    expect_kind(
        &planner.add_flight(&ItemDraft::new("LIS -> OPO", &date, "120.50"))?,
        NoticeKind::Success,
    )?;
    expect_kind(
        &planner.add_hotel(&HotelDraft::new("Casa", &date, "80", "3"))?,
        NoticeKind::Success,
    )?;
    expect_kind(
        &planner.add_activity(&ItemDraft::new("Fado night", &date, "35"))?,
        NoticeKind::Success,
    )?;
    expect_kind(&planner.set_budget("2500")?, NoticeKind::Success)?;

    let summary = planner.summary();
    ensure!(approx_eq(summary.total_spent, 395.5), "spent {}", summary.total_spent);
    ensure!(approx_eq(summary.remaining, 2104.5), "remaining {}", summary.remaining);
    ensure!(summary.items == 3, "expected 3 items, found {}", summary.items);

    let stored = PlanStore::new(backend).load()?;
    ensure!(&stored == planner.plan(), "snapshot differs from storage");
    Ok(())
}

pub fn budget_ledger(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let mut planner = open_planner(&backend)?;
    let mut flights = 0.0;
    let mut hotels = 0.0;
    let mut activities = 0.0;

    for _ in 0..rng.gen_range(1..12) {
        let date = random_date(rng);
        let amount = quarter_amount(rng);
        let cost_text = if rng.gen_bool(0.1) {
            "n/a".to_string()
        } else {
            amount.to_string()
        };
        let parsed = if cost_text == "n/a" { 0.0 } else { amount };

        match rng.gen_range(0..3) {
            0 => {
                planner.add_flight(&ItemDraft::new("flight", &date, &cost_text))?;
                flights += parsed;
            }
            1 => {
                let nights = rng.gen_range(1..=6_u32);
                let nights_text = if rng.gen_bool(0.1) {
                    "abc".to_string()
                } else {
                    nights.to_string()
                };
                let counted = if nights_text == "abc" { 1 } else { nights };
                planner.add_hotel(&HotelDraft::new("hotel", &date, &cost_text, &nights_text))?;
                hotels += parsed * f64::from(counted);
            }
            _ => {
                planner.add_activity(&ItemDraft::new("activity", &date, &cost_text))?;
                activities += parsed;
            }
        }
    }

    let ids: Vec<i64> = planner.plan().itinerary.iter().map(|i| i.id()).collect();
    let mut completed = 0;
    for id in ids {
        if rng.gen_bool(0.4) {
            planner.toggle_completed(id)?;
            completed += 1;
        }
    }

    let wallet = quarter_amount(rng) * 4.0;
    planner.set_budget(&wallet.to_string())?;
    expect_kind(&planner.set_budget("-5")?, NoticeKind::Invalid)?;
    expect_kind(&planner.set_budget("lots")?, NoticeKind::Invalid)?;

    let summary = planner.summary();
    let total = flights + hotels + activities;
    ensure!(approx_eq(summary.flights, flights), "flights {}", summary.flights);
    ensure!(approx_eq(summary.hotels, hotels), "hotels {}", summary.hotels);
    ensure!(
        approx_eq(summary.activities, activities),
        "activities {}",
        summary.activities
    );
    ensure!(approx_eq(summary.total_spent, total), "total {}", summary.total_spent);
    ensure!(summary.wallet == wallet, "wallet {} != {wallet}", summary.wallet);
    ensure!(
        approx_eq(summary.remaining, wallet - total),
        "remaining {}",
        summary.remaining
    );
    ensure!(summary.completed == completed, "completed {}", summary.completed);
    ensure!(
        summary.is_over_budget() == (total > wallet),
        "over-budget flag wrong"
    );
    Ok(())
}

pub fn duplicate_destination(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let mut planner = open_planner(&backend)?;
    planner.login(username(rng))?;

    let catalog = sample_catalog();
    let pick = catalog.0[rng.gen_range(0..catalog.len())].id;
    expect_kind(&planner.add_to_plan(pick)?, NoticeKind::Success)?;
    let before = backend.raw(PLAN_KEY);
    for _ in 0..rng.gen_range(1..4) {
        expect_kind(&planner.add_to_plan(pick)?, NoticeKind::Warning)?;
    }
    expect_kind(&planner.add_to_plan(9_999)?, NoticeKind::Warning)?;

    ensure!(backend.raw(PLAN_KEY) == before, "rejected add rewrote the plan");
    let count = planner
        .plan()
        .destinations
        .iter()
        .filter(|d| d.id == pick)
        .count();
    ensure!(count == 1, "destination {pick} stored {count} times");
    Ok(())
}

pub fn clear_plan(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let plan = random_plan(rng, 8);
    PlanStore::new(backend.clone()).save(&plan)?;

    let mut planner = open_planner(&backend)?;
    expect_kind(&planner.clear_plan()?, NoticeKind::Success)?;
    let stored = PlanStore::new(backend.clone()).load()?;
    ensure!(stored.wallet == plan.wallet, "clear plan changed the wallet");
    ensure!(stored.destinations.is_empty(), "destinations survived");
    ensure!(stored.itinerary.is_empty(), "itinerary survived");

    expect_kind(&planner.reset_all()?, NoticeKind::Success)?;
    ensure!(backend.raw(PLAN_KEY).is_none(), "reset left the record behind");
    ensure!(
        planner.plan().wallet == DEFAULT_WALLET,
        "reset did not restore the default wallet"
    );
    Ok(())
}

pub fn session_gating(rng: &mut ChaCha20Rng) -> Result<()> {
    let backend = MemoryStore::new();
    let mut planner = open_planner(&backend)?;
    let draft = DestinationDraft {
        name: "Atlantis".to_string(),
        continent: "Ocean".to_string(),
        description: "Under the waves".to_string(),
        min_budget_day: quarter_amount(rng).to_string(),
    };

    expect_kind(&planner.add_to_plan(1)?, NoticeKind::AuthRequired)?;
    expect_kind(
        &planner.add_custom_destination(&draft)?,
        NoticeKind::AuthRequired,
    )?;
    ensure!(
        backend.raw(PLAN_KEY).is_none(),
        "signed-out mutation reached storage"
    );

    expect_kind(&planner.login("   ")?, NoticeKind::Invalid)?;
    let name = username(rng);
    expect_kind(&planner.login(name)?, NoticeKind::Success)?;
    ensure!(
        planner.session().current_user()?.as_deref() == Some(name),
        "session does not report {name}"
    );

    expect_kind(&planner.add_custom_destination(&draft)?, NoticeKind::Success)?;
    let custom = planner
        .plan()
        .destinations
        .last()
        .context("custom destination missing")?;
    ensure!(custom.image == CUSTOM_DESTINATION_IMAGE, "custom image not set");
    ensure!(custom.name == "Atlantis", "custom name lost");

    planner.logout()?;
    expect_kind(&planner.add_to_plan(2)?, NoticeKind::AuthRequired)?;
    Ok(())
}
