//! Spend tracking against the wallet.
use serde::Serialize;

use crate::plan::{ItemKind, ItineraryItem, Plan};

/// Sum of itinerary costs.
#[must_use]
pub fn total_spent(items: &[ItineraryItem]) -> f64 {
    items.iter().map(ItineraryItem::cost).sum()
}

/// Wallet figures shown next to the itinerary. `remaining` goes negative when
/// the itinerary costs more than the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendSummary {
    pub wallet: f64,
    pub total_spent: f64,
    pub remaining: f64,
    pub items: usize,
    pub completed: usize,
    pub flights: f64,
    pub hotels: f64,
    pub activities: f64,
}

impl SpendSummary {
    #[must_use]
    pub fn of(plan: &Plan) -> Self {
        let mut summary = Self {
            wallet: plan.wallet,
            total_spent: 0.0,
            remaining: plan.wallet,
            items: plan.itinerary.len(),
            completed: 0,
            flights: 0.0,
            hotels: 0.0,
            activities: 0.0,
        };
        for item in &plan.itinerary {
            let bucket = match item.kind() {
                ItemKind::Flight => &mut summary.flights,
                ItemKind::Hotel => &mut summary.hotels,
                ItemKind::Activity => &mut summary.activities,
            };
            *bucket += item.cost();
            if item.is_completed() {
                summary.completed += 1;
            }
        }
        summary.total_spent = total_spent(&plan.itinerary);
        summary.remaining = plan.wallet - summary.total_spent;
        summary
    }

    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining < 0.0
    }
}
