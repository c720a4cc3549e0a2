//! Plan state container used by the view layer.
//!
//! The planner owns the store handles and the snapshot the view renders from.
//! Every mutating operation reloads the persisted record, applies one change,
//! writes the whole record back and refreshes the snapshot from a fresh load.
//! User-level rejections (invalid input, duplicates, signed-out users) come
//! back as [`Notice`] values; only storage and indexing failures are errors.

use serde::Serialize;

use crate::budget::SpendSummary;
use crate::catalog::Catalog;
use crate::drag::{DragEffect, DragSession, DragState};
use crate::ids::{Clock, next_id};
use crate::input::{DestinationDraft, HotelDraft, InputError, ItemDraft, parse_budget};
use crate::orderer::{MoveError, move_item};
use crate::plan::{ItemKind, ItineraryItem, Plan};
use crate::session::Session;
use crate::store::{KeyValueStore, PlanStore, StoreConfig, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// The plan was changed and saved.
    Success,
    /// Nothing to do; the plan is unchanged.
    Info,
    /// Rejected as a duplicate or unknown entry.
    Warning,
    /// Rejected because a form value was missing or malformed.
    Invalid,
    /// Rejected because nobody is signed in.
    AuthRequired,
}

/// Outcome message for the view to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self.kind, NoticeKind::Success)
    }
}

pub struct Planner<S, C> {
    store: PlanStore<S>,
    session: Session<S>,
    catalog: Catalog,
    clock: C,
    plan: Plan,
    drag: DragSession,
}

impl<S, C> Planner<S, C>
where
    S: KeyValueStore + Clone,
    C: Clock,
{
    /// Open the planner over `backend` and load the current plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub fn new(backend: S, catalog: Catalog, clock: C) -> Result<Self, PlannerError> {
        Self::with_config(backend, StoreConfig::default(), catalog, clock)
    }

    /// # Errors
    ///
    /// Returns an error if the initial load fails.
    pub fn with_config(
        backend: S,
        config: StoreConfig,
        catalog: Catalog,
        clock: C,
    ) -> Result<Self, PlannerError> {
        let store = PlanStore::with_config(backend.clone(), config);
        let plan = store.load()?;
        Ok(Self {
            store,
            session: Session::new(backend),
            catalog,
            clock,
            plan,
            drag: DragSession::new(),
        })
    }

    /// Snapshot as of the last load.
    pub const fn plan(&self) -> &Plan {
        &self.plan
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn session(&self) -> &Session<S> {
        &self.session
    }

    pub const fn store(&self) -> &PlanStore<S> {
        &self.store
    }

    pub const fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn summary(&self) -> SpendSummary {
        SpendSummary::of(&self.plan)
    }

    /// Re-read the durable slot, picking up writes made by other handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the load fails.
    pub fn refresh(&mut self) -> Result<&Plan, PlannerError> {
        self.plan = self.store.load()?;
        Ok(&self.plan)
    }

    fn commit(&mut self, plan: &Plan) -> Result<(), PlannerError> {
        self.store.save(plan)?;
        self.refresh()?;
        Ok(())
    }

    fn require_login(&self, message: &str) -> Result<Option<Notice>, PlannerError> {
        if self.session.is_logged_in()? {
            Ok(None)
        } else {
            Ok(Some(Notice::new(NoticeKind::AuthRequired, message)))
        }
    }

    /// # Errors
    ///
    /// Returns an error if the session slot cannot be written.
    pub fn login(&mut self, username: &str) -> Result<Notice, PlannerError> {
        if self.session.login(username)? {
            Ok(Notice::new(
                NoticeKind::Success,
                format!("Signed in as {}.", username.trim()),
            ))
        } else {
            Ok(Notice::new(NoticeKind::Invalid, "Please enter a username."))
        }
    }

    /// # Errors
    ///
    /// Returns an error if the session slot cannot be cleared.
    pub fn logout(&mut self) -> Result<Notice, PlannerError> {
        self.session.logout()?;
        Ok(Notice::new(NoticeKind::Success, "Signed out."))
    }

    /// Bookmark the catalog entry `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_to_plan(&mut self, id: i64) -> Result<Notice, PlannerError> {
        if let Some(notice) = self.require_login("Please sign in to add destinations to your plan.")? {
            return Ok(notice);
        }
        let Some(destination) = self.catalog.find(id).cloned() else {
            return Ok(Notice::new(
                NoticeKind::Warning,
                format!("No catalog destination with id {id}."),
            ));
        };

        let mut plan = self.store.load()?;
        let name = destination.name.clone();
        if !plan.push_destination(destination) {
            return Ok(Notice::new(
                NoticeKind::Warning,
                format!("{name} is already in your plan!"),
            ));
        }
        self.commit(&plan)?;
        log::debug!("added catalog destination {id}");
        Ok(Notice::new(
            NoticeKind::Success,
            format!("{name} has been added to your plan!"),
        ))
    }

    /// Add a user-authored destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_custom_destination(
        &mut self,
        draft: &DestinationDraft,
    ) -> Result<Notice, PlannerError> {
        if let Some(notice) = self.require_login("Please sign in to add a custom destination.")? {
            return Ok(notice);
        }
        let mut plan = self.store.load()?;
        let id = next_id(&self.clock, |id| plan.has_destination(id));
        let destination = match draft.build(id) {
            Ok(destination) => destination,
            Err(err) => return Ok(invalid_destination(&err)),
        };
        plan.destinations.push(destination);
        self.commit(&plan)?;
        log::debug!("added custom destination {id}");
        Ok(Notice::new(
            NoticeKind::Success,
            "Custom destination added to your plan!",
        ))
    }

    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn remove_destination(&mut self, id: i64) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        if plan.remove_destination(id) == 0 {
            return Ok(Notice::new(NoticeKind::Info, "Destination not in your plan."));
        }
        self.commit(&plan)?;
        Ok(Notice::new(NoticeKind::Success, "Destination removed."))
    }

    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_flight(&mut self, draft: &ItemDraft) -> Result<Notice, PlannerError> {
        self.add_item(ItemKind::Flight, |id| draft.build(ItemKind::Flight, id))
    }

    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_hotel(&mut self, draft: &HotelDraft) -> Result<Notice, PlannerError> {
        self.add_item(ItemKind::Hotel, |id| draft.build(id))
    }

    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn add_activity(&mut self, draft: &ItemDraft) -> Result<Notice, PlannerError> {
        self.add_item(ItemKind::Activity, |id| draft.build(ItemKind::Activity, id))
    }

    fn add_item(
        &mut self,
        kind: ItemKind,
        build: impl FnOnce(i64) -> Result<ItineraryItem, InputError>,
    ) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        let id = next_id(&self.clock, |id| plan.item(id).is_some());
        let item = match build(id) {
            Ok(item) => item,
            Err(_) => {
                return Ok(Notice::new(
                    NoticeKind::Invalid,
                    format!("Please fill in {} details and date.", kind.tag()),
                ));
            }
        };
        plan.itinerary.push(item);
        self.commit(&plan)?;
        log::debug!("added {} {id}", kind.tag());
        Ok(Notice::new(
            NoticeKind::Success,
            format!("{} added to your itinerary.", kind.label()),
        ))
    }

    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn remove_item(&mut self, id: i64) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        if plan.remove_item(id) == 0 {
            return Ok(Notice::new(NoticeKind::Info, "Item not in your itinerary."));
        }
        self.commit(&plan)?;
        Ok(Notice::new(NoticeKind::Success, "Item removed."))
    }

    /// Flip the done flag of itinerary item `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn toggle_completed(&mut self, id: i64) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        let Some(item) = plan.item_mut(id) else {
            return Ok(Notice::new(NoticeKind::Info, "Item not in your itinerary."));
        };
        let done = item.toggle_completed();
        self.commit(&plan)?;
        let message = if done {
            "Marked as done."
        } else {
            "Marked as not done."
        };
        Ok(Notice::new(NoticeKind::Success, message))
    }

    /// Set the wallet from raw form text.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn set_budget(&mut self, raw: &str) -> Result<Notice, PlannerError> {
        let Ok(budget) = parse_budget(raw) else {
            return Ok(Notice::new(
                NoticeKind::Invalid,
                "Please enter a valid budget amount.",
            ));
        };
        let mut plan = self.store.load()?;
        plan.wallet = budget;
        self.commit(&plan)?;
        Ok(Notice::new(
            NoticeKind::Success,
            format!("Budget set to ${budget}"),
        ))
    }

    /// Drop every destination and itinerary item but keep the wallet.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded or saved.
    pub fn clear_plan(&mut self) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        plan.clear_entries();
        self.commit(&plan)?;
        Ok(Notice::new(NoticeKind::Success, "Your plan has been cleared."))
    }

    /// Delete the stored record entirely, wallet included.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be removed or reloaded.
    pub fn reset_all(&mut self) -> Result<Notice, PlannerError> {
        self.store.clear()?;
        self.refresh()?;
        Ok(Notice::new(
            NoticeKind::Success,
            "All saved trip data has been removed.",
        ))
    }

    /// Relocate itinerary row `from` to position `to` and persist the new order.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Move` if an index is outside the stored
    /// itinerary, or a store error if the plan cannot be loaded or saved.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<Notice, PlannerError> {
        let mut plan = self.store.load()?;
        move_item(&mut plan.itinerary, from, to)?;
        if from == to {
            return Ok(Notice::new(NoticeKind::Info, "Itinerary unchanged."));
        }
        self.commit(&plan)?;
        log::debug!("moved itinerary row {from} -> {to}");
        Ok(Notice::new(NoticeKind::Success, "Itinerary reordered."))
    }

    pub fn drag_start(&mut self, index: usize) -> DragEffect {
        self.drag.start(index)
    }

    pub fn drag_enter(&mut self, index: usize) -> DragEffect {
        self.drag.enter(index)
    }

    pub fn drag_leave(&mut self, index: usize) -> DragEffect {
        self.drag.leave(index)
    }

    /// Finish a gesture on row `index`, applying the move it produces.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting move cannot be applied or saved.
    pub fn drag_drop(&mut self, index: usize) -> Result<DragEffect, PlannerError> {
        let effect = self.drag.drop_on(index);
        if let DragEffect::Move { from, to } = effect {
            self.move_item(from, to)?;
        }
        Ok(effect)
    }

    pub fn drag_end(&mut self) -> DragEffect {
        self.drag.end()
    }
}

fn invalid_destination(err: &InputError) -> Notice {
    let message = match err {
        InputError::MissingField(field) => format!("Please fill in the destination {field}."),
        InputError::InvalidBudget(_) => "Please enter a valid daily budget.".to_string(),
    };
    Notice::new(NoticeKind::Invalid, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ManualClock;
    use crate::plan::Destination;
    use crate::store::{MemoryStore, PLAN_KEY};

    fn catalog() -> Catalog {
        Catalog(vec![
            Destination {
                id: 1,
                name: "Paris".into(),
                continent: "Europe".into(),
                description: "City of light".into(),
                min_budget_day: 180.0,
                image: "paris.jpg".into(),
            },
            Destination {
                id: 2,
                name: "Cusco".into(),
                continent: "South America".into(),
                description: "Gateway to Machu Picchu".into(),
                min_budget_day: 70.0,
                image: "cusco.jpg".into(),
            },
        ])
    }

    fn planner() -> (Planner<MemoryStore, ManualClock>, MemoryStore) {
        let backend = MemoryStore::new();
        let planner = Planner::new(
            backend.clone(),
            catalog(),
            ManualClock::new(1_700_000_000_000.0, 1.0),
        )
        .unwrap();
        (planner, backend)
    }

    fn signed_in() -> (Planner<MemoryStore, ManualClock>, MemoryStore) {
        let (mut planner, backend) = planner();
        planner.login("tester").unwrap();
        (planner, backend)
    }

    #[test]
    fn opening_on_empty_storage_writes_nothing() {
        let (planner, backend) = planner();
        assert_eq!(planner.plan(), &Plan::default());
        assert!(backend.raw(PLAN_KEY).is_none());
    }

    #[test]
    fn add_to_plan_requires_login() {
        let (mut planner, backend) = planner();
        let notice = planner.add_to_plan(1).unwrap();
        assert_eq!(notice.kind, NoticeKind::AuthRequired);
        assert!(backend.raw(PLAN_KEY).is_none());
    }

    #[test]
    fn add_to_plan_copies_catalog_entry_once() {
        let (mut planner, _) = signed_in();
        let notice = planner.add_to_plan(1).unwrap();
        assert!(notice.changed());
        assert_eq!(notice.message, "Paris has been added to your plan!");
        let before = planner.plan().destinations.clone();

        let again = planner.add_to_plan(1).unwrap();
        assert_eq!(again.kind, NoticeKind::Warning);
        assert_eq!(again.message, "Paris is already in your plan!");
        assert_eq!(planner.plan().destinations, before);
    }

    #[test]
    fn unknown_catalog_id_is_rejected() {
        let (mut planner, _) = signed_in();
        assert_eq!(planner.add_to_plan(99).unwrap().kind, NoticeKind::Warning);
        assert!(planner.plan().destinations.is_empty());
    }

    #[test]
    fn custom_destination_gated_and_validated() {
        let (mut planner, _) = planner();
        let draft = DestinationDraft {
            name: "Secret Beach".into(),
            continent: "Oceania".into(),
            description: String::new(),
            min_budget_day: "55".into(),
        };
        assert_eq!(
            planner.add_custom_destination(&draft).unwrap().kind,
            NoticeKind::AuthRequired
        );
        planner.login("tester").unwrap();
        let missing = DestinationDraft {
            name: String::new(),
            ..draft.clone()
        };
        assert_eq!(
            planner.add_custom_destination(&missing).unwrap().kind,
            NoticeKind::Invalid
        );
        assert!(planner.add_custom_destination(&draft).unwrap().changed());
        let added = &planner.plan().destinations[0];
        assert_eq!(added.name, "Secret Beach");
        assert_eq!(added.image, crate::plan::CUSTOM_DESTINATION_IMAGE);
        assert!(added.id >= 1_700_000_000_000);
    }

    #[test]
    fn items_get_distinct_ids_within_one_millisecond() {
        let backend = MemoryStore::new();
        let mut planner =
            Planner::new(backend, catalog(), ManualClock::frozen(42.0)).unwrap();
        let draft = ItemDraft::new("Museum", "2025-01-01", "10");
        planner.add_activity(&draft).unwrap();
        planner.add_activity(&draft).unwrap();
        let ids: Vec<i64> = planner.plan().itinerary.iter().map(ItineraryItem::id).collect();
        assert_eq!(ids, vec![42, 43]);
    }

    #[test]
    fn invalid_item_is_a_complete_noop() {
        let (mut planner, backend) = planner();
        let notice = planner
            .add_flight(&ItemDraft::new("", "2025-01-01", "100"))
            .unwrap();
        assert_eq!(notice.kind, NoticeKind::Invalid);
        assert_eq!(notice.message, "Please fill in flight details and date.");
        assert!(backend.raw(PLAN_KEY).is_none());
    }

    #[test]
    fn hotel_cost_is_derived_and_counted() {
        let (mut planner, _) = planner();
        planner
            .add_hotel(&HotelDraft::new("Ritz", "2025-06-01", "100", "3"))
            .unwrap();
        planner
            .add_flight(&ItemDraft::new("CDG", "2025-06-01", "50.5"))
            .unwrap();
        let summary = planner.summary();
        assert!((summary.total_spent - 350.5).abs() < f64::EPSILON);
        assert!((summary.remaining - 4649.5).abs() < f64::EPSILON);
    }

    #[test]
    fn toggle_and_remove_items() {
        let (mut planner, _) = planner();
        planner
            .add_activity(&ItemDraft::new("Hike", "2025-02-02", "0"))
            .unwrap();
        let id = planner.plan().itinerary[0].id();
        assert_eq!(planner.toggle_completed(id).unwrap().message, "Marked as done.");
        assert!(planner.plan().itinerary[0].is_completed());
        assert_eq!(planner.toggle_completed(id + 1).unwrap().kind, NoticeKind::Info);
        assert!(planner.remove_item(id).unwrap().changed());
        assert!(planner.plan().itinerary.is_empty());
        assert_eq!(planner.remove_item(id).unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn budget_validation_leaves_wallet_alone() {
        let (mut planner, _) = planner();
        assert_eq!(planner.set_budget("-5").unwrap().kind, NoticeKind::Invalid);
        assert_eq!(planner.set_budget("abc").unwrap().kind, NoticeKind::Invalid);
        assert!((planner.plan().wallet - 5000.0).abs() < f64::EPSILON);
        let notice = planner.set_budget("1200.5").unwrap();
        assert_eq!(notice.message, "Budget set to $1200.5");
        assert!((planner.plan().wallet - 1200.5).abs() < f64::EPSILON);
    }

    #[test]
    fn clear_plan_keeps_wallet_but_reset_does_not() {
        let (mut planner, backend) = signed_in();
        planner.set_budget("900").unwrap();
        planner.add_to_plan(2).unwrap();
        planner
            .add_flight(&ItemDraft::new("LIM", "2025-03-03", "600"))
            .unwrap();

        planner.clear_plan().unwrap();
        assert!(planner.plan().destinations.is_empty());
        assert!(planner.plan().itinerary.is_empty());
        assert!((planner.plan().wallet - 900.0).abs() < f64::EPSILON);

        planner.reset_all().unwrap();
        assert_eq!(planner.plan(), &Plan::default());
        assert!(backend.raw(PLAN_KEY).is_none());
    }

    #[test]
    fn drag_gesture_reorders_and_persists() {
        let (mut planner, backend) = planner();
        for details in ["A", "B", "C", "D"] {
            planner
                .add_activity(&ItemDraft::new(details, "2025-01-01", "1"))
                .unwrap();
        }
        planner.drag_start(0);
        planner.drag_enter(2);
        let effect = planner.drag_drop(2).unwrap();
        assert_eq!(effect, DragEffect::Move { from: 0, to: 2 });
        planner.drag_end();

        let order: Vec<&str> = planner
            .plan()
            .itinerary
            .iter()
            .map(|item| item.entry().details.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A", "D"]);

        let reloaded = PlanStore::new(backend).load().unwrap();
        assert_eq!(&reloaded, planner.plan());
    }

    #[test]
    fn move_out_of_range_is_an_error() {
        let (mut planner, _) = planner();
        planner
            .add_activity(&ItemDraft::new("Only", "2025-01-01", "1"))
            .unwrap();
        let err = planner.move_item(0, 1).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Move(MoveError::OutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(planner.move_item(0, 0).unwrap().kind, NoticeKind::Info);
    }

    #[test]
    fn refresh_sees_writes_from_other_handles() {
        let (mut planner, backend) = planner();
        let other = PlanStore::new(backend);
        other.save(&Plan::with_wallet(10.0)).unwrap();
        assert!((planner.plan().wallet - 5000.0).abs() < f64::EPSILON);
        assert!((planner.refresh().unwrap().wallet - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn login_rejects_blank_names() {
        let (mut planner, _) = planner();
        assert_eq!(planner.login(" ").unwrap().kind, NoticeKind::Invalid);
        assert_eq!(planner.login("sam").unwrap().message, "Signed in as sam.");
        assert!(planner.session().is_logged_in().unwrap());
        planner.logout().unwrap();
        assert!(!planner.session().is_logged_in().unwrap());
    }
}
