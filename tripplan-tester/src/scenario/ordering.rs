//! Itinerary reordering through the planner and the drag gesture machine.

use anyhow::{Result, bail, ensure};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tripplan_core::{DragEffect, DragNoopReason, MemoryStore, Plan, PlanStore, PlannerError};

use super::fixtures::{itinerary_ids, open_planner, random_plan};

fn seeded_backend(rng: &mut ChaCha20Rng) -> Result<(MemoryStore, Plan)> {
    let mut plan = random_plan(rng, 10);
    while plan.itinerary.len() < 2 {
        plan = random_plan(rng, 10);
    }
    let backend = MemoryStore::new();
    PlanStore::new(backend.clone()).save(&plan)?;
    Ok((backend, plan))
}

fn reference_move(ids: &mut Vec<i64>, from: usize, to: usize) {
    let id = ids.remove(from);
    ids.insert(to, id);
}

pub fn reorder_stability(rng: &mut ChaCha20Rng) -> Result<()> {
    let (backend, plan) = seeded_backend(rng)?;
    let mut planner = open_planner(&backend)?;
    let len = plan.itinerary.len();
    let mut expected = itinerary_ids(&plan);

    for _ in 0..rng.gen_range(1..20) {
        let from = rng.gen_range(0..len);
        let to = rng.gen_range(0..len);
        planner.move_item(from, to)?;
        reference_move(&mut expected, from, to);
        ensure!(
            itinerary_ids(planner.plan()) == expected,
            "move {from}->{to} diverged from remove/insert"
        );
    }

    let stored = PlanStore::new(backend.clone()).load()?;
    ensure!(itinerary_ids(&stored) == expected, "stored order differs");

    match planner.move_item(len, 0) {
        Err(PlannerError::Move(_)) => {}
        Err(err) => bail!("out-of-range move failed with {err}"),
        Ok(notice) => bail!("out-of-range move accepted: {}", notice.message),
    }
    let after = PlanStore::new(backend).load()?;
    ensure!(after == stored, "rejected move touched the stored plan");
    Ok(())
}

pub fn drag_gestures(rng: &mut ChaCha20Rng) -> Result<()> {
    let (backend, plan) = seeded_backend(rng)?;
    let mut planner = open_planner(&backend)?;
    let len = plan.itinerary.len();
    let mut expected = itinerary_ids(&plan);

    let stray = planner.drag_drop(0)?;
    ensure!(
        stray
            == DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag
            },
        "drop without a gesture produced {stray:?}"
    );

    for _ in 0..rng.gen_range(1..15) {
        let source = rng.gen_range(0..len);
        ensure!(
            planner.drag_start(source) == DragEffect::Started { source },
            "gesture did not start"
        );
        for _ in 0..rng.gen_range(0..4) {
            let row = rng.gen_range(0..len);
            if rng.gen_bool(0.5) {
                planner.drag_enter(row);
            } else {
                planner.drag_leave(row);
            }
        }

        if rng.gen_bool(0.8) {
            let target = rng.gen_range(0..len);
            let effect = planner.drag_drop(target)?;
            if target == source {
                ensure!(
                    effect
                        == DragEffect::Noop {
                            reason: DragNoopReason::SameElement
                        },
                    "drop on source produced {effect:?}"
                );
            } else {
                ensure!(
                    effect == DragEffect::Move { from: source, to: target },
                    "drop produced {effect:?}"
                );
                reference_move(&mut expected, source, target);
            }
        }
        ensure!(planner.drag_end() == DragEffect::Finished, "gesture did not end");
        ensure!(
            itinerary_ids(planner.plan()) == expected,
            "gesture from row {source} diverged"
        );
    }

    let stored = PlanStore::new(backend).load()?;
    ensure!(itinerary_ids(&stored) == expected, "stored order differs");
    Ok(())
}
