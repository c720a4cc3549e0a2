//! Tripplan Core
//!
//! Platform-agnostic trip plan model for the Tripplan widget: the persisted
//! plan record and its upgrade from the legacy layout, the key-value backed
//! store, itinerary reordering and the planner operations the view calls.
//! This crate has no browser dependencies; the web crate supplies the
//! `localStorage` backend and the browser clock.

pub mod budget;
pub mod catalog;
pub mod drag;
pub mod ids;
pub mod input;
pub mod migration;
pub mod orderer;
pub mod plan;
pub mod planner;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use budget::{SpendSummary, total_spent};
pub use catalog::{BudgetCategory, BudgetTier, Catalog, CatalogFilter, ContinentFilter};
pub use drag::{DragEffect, DragNoopReason, DragSession, DragState};
pub use ids::{Clock, ManualClock, SystemClock, next_id};
pub use input::{DestinationDraft, HotelDraft, InputError, ItemDraft};
pub use migration::{migrate_record, needs_migration};
pub use orderer::{MoveError, move_item, moved};
pub use plan::{
    CUSTOM_DESTINATION_IMAGE, DEFAULT_WALLET, Destination, Entry, HotelStay, ItemKind,
    ItineraryItem, ItineraryRow, Plan,
};
pub use planner::{Notice, NoticeKind, Planner, PlannerError};
pub use session::{SESSION_KEY, Session};
pub use store::{
    CorruptPolicy, KeyValueStore, MemoryStore, PLAN_KEY, PlanStore, StoreConfig, StoreError,
};
