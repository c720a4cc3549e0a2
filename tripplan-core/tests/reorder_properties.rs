use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tripplan_core::{
    Catalog, DragEffect, DragSession, Entry, ItineraryItem, ManualClock, MemoryStore, MoveError,
    Plan, PlanStore, Planner, move_item,
};

const ROUNDS: usize = 2000;

fn reference_move(items: &[u32], from: usize, to: usize) -> Vec<u32> {
    let mut out = items.to_vec();
    let value = out.remove(from);
    out.insert(to, value);
    out
}

#[test]
fn move_matches_remove_then_insert() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x7219);
    for _ in 0..ROUNDS {
        let len = rng.gen_range(1..12);
        let items: Vec<u32> = (0..len).map(|_| rng.gen_range(0..5)).collect();
        let from = rng.gen_range(0..len);
        let to = rng.gen_range(0..len);

        let mut actual = items.clone();
        move_item(&mut actual, from, to).unwrap();
        assert_eq!(actual, reference_move(&items, from, to), "{items:?} {from}->{to}");
    }
}

#[test]
fn move_preserves_multiset_and_other_order() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xD0_0D);
    for _ in 0..ROUNDS {
        let len = rng.gen_range(1..20usize);
        let items: Vec<usize> = (0..len).collect();
        let from = rng.gen_range(0..len);
        let to = rng.gen_range(0..len);

        let mut actual = items.clone();
        move_item(&mut actual, from, to).unwrap();

        assert_eq!(actual[to], from);
        let mut sorted = actual.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
        let rest: Vec<usize> = actual.iter().copied().filter(|&v| v != from).collect();
        let expected: Vec<usize> = items.iter().copied().filter(|&v| v != from).collect();
        assert_eq!(rest, expected);
    }
}

#[test]
fn out_of_range_moves_never_touch_the_list() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for _ in 0..ROUNDS {
        let len = rng.gen_range(0..6usize);
        let items: Vec<usize> = (0..len).collect();
        let from = rng.gen_range(0..len + 3);
        let to = rng.gen_range(0..len + 3);
        let mut actual = items.clone();
        match move_item(&mut actual, from, to) {
            Ok(()) => assert!(from < len && to < len),
            Err(MoveError::OutOfRange { index, len: reported }) => {
                assert_eq!(reported, len);
                assert!(index >= len);
                assert_eq!(actual, items);
            }
        }
    }
}

#[test]
fn random_gestures_emit_at_most_one_move_each() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xBEEF);
    for _ in 0..ROUNDS {
        let mut drag = DragSession::new();
        let source = rng.gen_range(0..6);
        drag.start(source);
        let mut moves = 0;
        for _ in 0..rng.gen_range(0..8) {
            let row = rng.gen_range(0..6);
            let effect = match rng.gen_range(0..3) {
                0 => drag.enter(row),
                1 => drag.leave(row),
                _ => drag.drop_on(row),
            };
            if let DragEffect::Move { from, to } = effect {
                assert_eq!(from, source);
                assert_ne!(to, source);
                moves += 1;
            }
        }
        assert!(moves <= 1);
        assert_eq!(drag.end(), DragEffect::Finished);
        assert!(!drag.is_active());
    }
}

#[test]
fn planner_reorders_persist_across_handles() {
    let backend = MemoryStore::new();
    let store = PlanStore::new(backend.clone());
    let mut plan = Plan::default();
    for id in 0..8 {
        plan.itinerary
            .push(ItineraryItem::Activity(Entry::new(id, format!("stop {id}"), "2030-01-01", 1.0)));
    }
    store.save(&plan).unwrap();

    let mut planner =
        Planner::new(backend.clone(), Catalog::empty(), ManualClock::frozen(0.0)).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let mut expected: Vec<i64> = (0..8).collect();
    for _ in 0..200 {
        let from = rng.gen_range(0..8);
        let to = rng.gen_range(0..8);
        planner.drag_start(from);
        planner.drag_enter(to);
        planner.drag_drop(to).unwrap();
        planner.drag_end();
        if from != to {
            let id = expected.remove(from);
            expected.insert(to, id);
        }
    }

    let reloaded: Vec<i64> = store
        .load()
        .unwrap()
        .itinerary
        .iter()
        .map(ItineraryItem::id)
        .collect();
    assert_eq!(reloaded, expected);
    let snapshot: Vec<i64> = planner.plan().itinerary.iter().map(ItineraryItem::id).collect();
    assert_eq!(snapshot, expected);
}
