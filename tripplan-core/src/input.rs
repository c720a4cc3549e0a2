//! Form drafts and the lenient number parsing used by the planner forms.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::plan::{Destination, Entry, HotelStay, ItemKind, ItineraryItem};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{0}` is not a valid budget amount")]
    InvalidBudget(String),
}

static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("valid decimal pattern")
});
static INTEGER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer pattern"));

fn numeric_prefix<'a>(pattern: &Regex, raw: &'a str) -> Option<&'a str> {
    pattern.find(raw.trim_start()).map(|m| m.as_str())
}

/// Parse the leading decimal number of a form value, the way browsers read
/// numeric text: `"12.5 EUR"` is 12.5, `"abc"` is nothing.
#[must_use]
pub fn leading_number(raw: &str) -> Option<f64> {
    numeric_prefix(&DECIMAL_PREFIX, raw)
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Leading integer of a form value; `"2.5"` is 2.
#[must_use]
pub fn leading_integer(raw: &str) -> Option<i64> {
    numeric_prefix(&INTEGER_PREFIX, raw).and_then(|digits| digits.parse().ok())
}

/// Cost field: unparsable input counts as 0 and negatives are clamped to 0.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    leading_number(raw).unwrap_or(0.0).max(0.0)
}

/// Night count: unparsable or non-positive input counts as one night.
#[must_use]
pub fn parse_nights(raw: &str) -> u32 {
    leading_integer(raw)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Wallet field: must be a non-negative number.
///
/// # Errors
///
/// Returns `InputError::InvalidBudget` if the value is not a number or is negative.
pub fn parse_budget(raw: &str) -> Result<f64, InputError> {
    leading_number(raw)
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| InputError::InvalidBudget(raw.trim().to_string()))
}

fn required(value: &str, field: &'static str) -> Result<String, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InputError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Raw flight or activity form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDraft {
    pub details: String,
    pub date: String,
    pub cost: String,
}

impl ItemDraft {
    #[must_use]
    pub fn new(details: &str, date: &str, cost: &str) -> Self {
        Self {
            details: details.to_string(),
            date: date.to_string(),
            cost: cost.to_string(),
        }
    }

    /// Build a flight or activity entry.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingField` if details or date are blank.
    // Hotels normally come through `HotelDraft`; here they get a single night.
    pub fn build(&self, kind: ItemKind, id: i64) -> Result<ItineraryItem, InputError> {
        let details = required(&self.details, "details")?;
        let date = required(&self.date, "date")?;
        let cost = parse_amount(&self.cost);
        Ok(match kind {
            ItemKind::Flight => ItineraryItem::Flight(Entry::new(id, details, date, cost)),
            ItemKind::Activity => ItineraryItem::Activity(Entry::new(id, details, date, cost)),
            ItemKind::Hotel => ItineraryItem::Hotel(HotelStay::new(id, details, date, cost, 1)),
        })
    }
}

/// Raw hotel form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HotelDraft {
    pub details: String,
    pub date: String,
    pub cost_per_night: String,
    pub nights: String,
}

impl HotelDraft {
    #[must_use]
    pub fn new(details: &str, date: &str, cost_per_night: &str, nights: &str) -> Self {
        Self {
            details: details.to_string(),
            date: date.to_string(),
            cost_per_night: cost_per_night.to_string(),
            nights: nights.to_string(),
        }
    }

    /// Build a hotel stay priced at rate times nights.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingField` if details or date are blank.
    pub fn build(&self, id: i64) -> Result<ItineraryItem, InputError> {
        let details = required(&self.details, "details")?;
        let date = required(&self.date, "date")?;
        Ok(ItineraryItem::Hotel(HotelStay::new(
            id,
            details,
            date,
            parse_amount(&self.cost_per_night),
            parse_nights(&self.nights),
        )))
    }
}

/// Raw custom-destination form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationDraft {
    pub name: String,
    pub continent: String,
    pub description: String,
    pub min_budget_day: String,
}

impl DestinationDraft {
    /// Build a custom destination with the placeholder image.
    ///
    /// # Errors
    ///
    /// Returns `InputError::MissingField` if name or continent are blank.
    pub fn build(&self, id: i64) -> Result<Destination, InputError> {
        let name = required(&self.name, "name")?;
        let continent = required(&self.continent, "continent")?;
        Ok(Destination::custom(
            id,
            name,
            continent,
            self.description.trim(),
            parse_amount(&self.min_budget_day),
        ))
    }
}
