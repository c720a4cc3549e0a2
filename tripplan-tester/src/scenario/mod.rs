use anyhow::Result;
use rand_chacha::ChaCha20Rng;

pub mod fixtures;
pub mod ordering;
pub mod persistence;
pub mod planning;

/// One seeded check against the core.
pub type ScenarioCheck = fn(&mut ChaCha20Rng) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    check: ScenarioCheck,
}

impl Scenario {
    const fn new(name: &'static str, description: &'static str, check: ScenarioCheck) -> Self {
        Self {
            name,
            description,
            check,
        }
    }

    /// Run one iteration with `rng` as the only source of variation.
    pub fn run(&self, rng: &mut ChaCha20Rng) -> Result<()> {
        (self.check)(rng)
    }
}

const SCENARIOS: &[Scenario] = &[
    Scenario::new(
        "smoke",
        "Sign in, bookmark, add one of each item and set a budget",
        planning::smoke,
    ),
    Scenario::new(
        "default-synthesis",
        "Empty slot loads the default plan without writing",
        persistence::default_synthesis,
    ),
    Scenario::new(
        "legacy-migration",
        "Legacy flights/hotels/activities lists upgrade once, in order",
        persistence::legacy_migration,
    ),
    Scenario::new(
        "round-trip",
        "Saved plans load back unchanged",
        persistence::round_trip,
    ),
    Scenario::new(
        "reorder-stability",
        "Moves match remove-then-insert and persist",
        ordering::reorder_stability,
    ),
    Scenario::new(
        "drag-gestures",
        "Random drag gestures produce at most one move each",
        ordering::drag_gestures,
    ),
    Scenario::new(
        "budget-ledger",
        "Spend summary matches the parsed form values",
        planning::budget_ledger,
    ),
    Scenario::new(
        "duplicate-destination",
        "Repeated bookmarks leave a single entry",
        planning::duplicate_destination,
    ),
    Scenario::new(
        "clear-plan",
        "Clearing keeps the wallet; reset removes the record",
        planning::clear_plan,
    ),
    Scenario::new(
        "session-gating",
        "Signed-out users cannot change destinations",
        planning::session_gating,
    ),
    Scenario::new(
        "corrupt-record",
        "Unreadable records fail loudly or reset on request",
        persistence::corrupt_record,
    ),
];

pub fn get_scenario(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.name == name)
}

pub fn list_scenarios() -> impl Iterator<Item = (&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.name, s.description))
}

pub fn all_scenario_names() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn every_scenario_passes_for_a_few_seeds() {
        for scenario in SCENARIOS {
            for seed in 0..5 {
                let mut rng = ChaCha20Rng::seed_from_u64(seed);
                if let Err(err) = scenario.run(&mut rng) {
                    panic!("{} failed for seed {seed}: {err:#}", scenario.name);
                }
            }
        }
    }

    #[test]
    fn scenario_names_are_unique() {
        let mut names = all_scenario_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SCENARIOS.len());
    }

    #[test]
    fn lookup_by_name() {
        assert!(get_scenario("smoke").is_some());
        assert!(get_scenario("missing").is_none());
    }
}
