//! Trip plan record and its itinerary entries.
use serde::{Deserialize, Serialize};

/// Wallet assigned to a plan that has never been saved.
pub const DEFAULT_WALLET: f64 = 5000.0;

/// Image used for destinations authored by the user.
pub const CUSTOM_DESTINATION_IMAGE: &str = "https://via.placeholder.com/300x200?text=Custom+Trip";

const fn default_wallet() -> f64 {
    DEFAULT_WALLET
}

const fn default_nights() -> u32 {
    1
}

/// A bookmarked catalog location or a user-authored custom location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub continent: String,
    #[serde(default)]
    pub description: String,
    /// Minimum daily spend in currency units
    #[serde(default)]
    pub min_budget_day: f64,
    #[serde(default)]
    pub image: String,
}

impl Destination {
    /// Build a user-authored destination carrying the placeholder image.
    #[must_use]
    pub fn custom(
        id: i64,
        name: impl Into<String>,
        continent: impl Into<String>,
        description: impl Into<String>,
        min_budget_day: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            continent: continent.into(),
            description: description.into(),
            min_budget_day,
            image: CUSTOM_DESTINATION_IMAGE.to_string(),
        }
    }
}

/// Fields shared by every itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub completed: bool,
}

impl Entry {
    #[must_use]
    pub fn new(id: i64, details: impl Into<String>, date: impl Into<String>, cost: f64) -> Self {
        Self {
            id,
            details: details.into(),
            date: date.into(),
            cost,
            completed: false,
        }
    }
}

/// A hotel booking; `cost` is fixed at `cost_per_night * nights` on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelStay {
    #[serde(flatten)]
    pub entry: Entry,
    #[serde(default = "default_nights")]
    pub nights: u32,
    #[serde(default)]
    pub cost_per_night: f64,
}

impl HotelStay {
    #[must_use]
    pub fn new(
        id: i64,
        details: impl Into<String>,
        date: impl Into<String>,
        cost_per_night: f64,
        nights: u32,
    ) -> Self {
        let nights = nights.max(1);
        let cost = cost_per_night * f64::from(nights);
        Self {
            entry: Entry::new(id, details, date, cost),
            nights,
            cost_per_night,
        }
    }
}

/// Discriminator stored under the `type` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Flight,
    Hotel,
    Activity,
}

impl ItemKind {
    /// Wire value of the `type` discriminator.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Hotel => "hotel",
            Self::Activity => "activity",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flight => "Flight",
            Self::Hotel => "Hotel",
            Self::Activity => "Activity",
        }
    }
}

/// A scheduled flight, hotel stay, or activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItineraryItem {
    Flight(Entry),
    Hotel(HotelStay),
    Activity(Entry),
}

impl ItineraryItem {
    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::Flight(_) => ItemKind::Flight,
            Self::Hotel(_) => ItemKind::Hotel,
            Self::Activity(_) => ItemKind::Activity,
        }
    }

    #[must_use]
    pub const fn entry(&self) -> &Entry {
        match self {
            Self::Flight(entry) | Self::Activity(entry) => entry,
            Self::Hotel(stay) => &stay.entry,
        }
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        match self {
            Self::Flight(entry) | Self::Activity(entry) => entry,
            Self::Hotel(stay) => &mut stay.entry,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.entry().id
    }

    #[must_use]
    pub const fn cost(&self) -> f64 {
        self.entry().cost
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.entry().completed
    }

    /// Flip the completed flag, returning the new value.
    pub fn toggle_completed(&mut self) -> bool {
        let entry = self.entry_mut();
        entry.completed = !entry.completed;
        entry.completed
    }

    /// Row heading as shown in the itinerary list, e.g. `Hotel: Ritz`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{}: {}", self.kind().label(), self.entry().details)
    }

    /// Date line for the itinerary row; hotels include the night count.
    #[must_use]
    pub fn date_line(&self) -> String {
        let date = display_date(&self.entry().date);
        match self {
            Self::Hotel(stay) => format!("{date} ({} nights)", stay.nights),
            Self::Flight(_) | Self::Activity(_) => date.to_string(),
        }
    }

    /// Cost line for the itinerary row; hotels include the nightly rate.
    #[must_use]
    pub fn cost_line(&self) -> String {
        let cost = format_money(self.cost());
        match self {
            Self::Hotel(stay) => format!("${cost} (${}/night)", stay.cost_per_night),
            Self::Flight(_) | Self::Activity(_) => format!("${cost}"),
        }
    }
}

/// One rendered itinerary row. `index` is the row's position in the list,
/// which is what the drag hooks take.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRow {
    pub index: usize,
    pub id: i64,
    pub kind: ItemKind,
    pub heading: String,
    pub date_line: String,
    pub cost_line: String,
    pub completed: bool,
}

impl ItineraryRow {
    #[must_use]
    pub fn new(index: usize, item: &ItineraryItem) -> Self {
        Self {
            index,
            id: item.id(),
            kind: item.kind(),
            heading: item.heading(),
            date_line: item.date_line(),
            cost_line: item.cost_line(),
            completed: item.is_completed(),
        }
    }
}

/// Format an amount with two decimals.
#[must_use]
pub fn format_money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Dates are free text; a blank one renders as `TBD`.
#[must_use]
pub fn display_date(date: &str) -> &str {
    let trimmed = date.trim();
    if trimmed.is_empty() { "TBD" } else { trimmed }
}

/// The single persisted trip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default = "default_wallet")]
    pub wallet: f64,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryItem>,
}

impl Default for Plan {
    fn default() -> Self {
        Self::with_wallet(DEFAULT_WALLET)
    }
}

impl Plan {
    #[must_use]
    pub const fn with_wallet(wallet: f64) -> Self {
        Self {
            wallet,
            destinations: Vec::new(),
            itinerary: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_destination(&self, id: i64) -> bool {
        self.destinations.iter().any(|d| d.id == id)
    }

    #[must_use]
    pub fn destination(&self, id: i64) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.id == id)
    }

    /// Itinerary rows in list order, stamped with their index.
    #[must_use]
    pub fn rows(&self) -> Vec<ItineraryRow> {
        self.itinerary
            .iter()
            .enumerate()
            .map(|(index, item)| ItineraryRow::new(index, item))
            .collect()
    }

    #[must_use]
    pub fn item(&self, id: i64) -> Option<&ItineraryItem> {
        self.itinerary.iter().find(|item| item.id() == id)
    }

    pub fn item_mut(&mut self, id: i64) -> Option<&mut ItineraryItem> {
        self.itinerary.iter_mut().find(|item| item.id() == id)
    }

    /// Append a destination unless one with the same id is already present.
    /// Returns `false` when the plan was left unchanged.
    pub fn push_destination(&mut self, destination: Destination) -> bool {
        if self.has_destination(destination.id) {
            return false;
        }
        self.destinations.push(destination);
        true
    }

    /// Remove every destination with `id`, returning how many were dropped.
    pub fn remove_destination(&mut self, id: i64) -> usize {
        let before = self.destinations.len();
        self.destinations.retain(|d| d.id != id);
        before - self.destinations.len()
    }

    /// Remove every itinerary item with `id`, returning how many were dropped.
    pub fn remove_item(&mut self, id: i64) -> usize {
        let before = self.itinerary.len();
        self.itinerary.retain(|item| item.id() != id);
        before - self.itinerary.len()
    }

    /// Empty destinations and itinerary while keeping the wallet.
    pub fn clear_entries(&mut self) {
        self.destinations.clear();
        self.itinerary.clear();
    }
}
