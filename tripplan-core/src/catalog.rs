//! Read-only destination catalog.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plan::Destination;

/// Number of entries shown on the landing page.
pub const POPULAR_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog(pub Vec<Destination>);

impl Catalog {
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Load the catalog from a JSON array of destinations.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into destinations.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Destination> {
        self.0.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Destination> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Leading entries featured on the landing page.
    #[must_use]
    pub fn popular(&self) -> &[Destination] {
        &self.0[..self.0.len().min(POPULAR_COUNT)]
    }

    /// Entries matching `filter`, in catalog order.
    #[must_use]
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Destination> {
        self.0.iter().filter(|d| filter.matches(d)).collect()
    }

    /// Distinct continents in first-seen order, for populating a filter control.
    #[must_use]
    pub fn continents(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for dest in &self.0 {
            if !seen.contains(&dest.continent.as_str()) {
                seen.push(dest.continent.as_str());
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Destination;
    type IntoIter = std::slice::Iter<'a, Destination>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Daily-spend band used by the explore filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    #[default]
    All,
    /// Under 100 per day
    Low,
    /// 100 to 200 per day inclusive
    Medium,
    /// Over 200 per day
    High,
}

impl BudgetTier {
    #[must_use]
    pub fn contains(self, per_day: f64) -> bool {
        match self {
            Self::All => true,
            Self::Low => per_day < 100.0,
            Self::Medium => (100.0..=200.0).contains(&per_day),
            Self::High => per_day > 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter value `{0}`")]
pub struct UnknownFilter(pub String);

impl FromStr for BudgetTier {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(Self::All),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContinentFilter {
    #[default]
    All,
    Only(String),
}

impl ContinentFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "all" | "" => Self::All,
            other => Self::Only(other.to_string()),
        }
    }

    #[must_use]
    pub fn matches(&self, continent: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == continent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    pub continent: ContinentFilter,
    pub budget: BudgetTier,
}

impl CatalogFilter {
    /// Build a filter from the raw values of the explore controls.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget value is not one of `all`, `low`,
    /// `medium` or `high`.
    pub fn from_controls(continent: &str, budget: &str) -> Result<Self, UnknownFilter> {
        Ok(Self {
            continent: ContinentFilter::parse(continent),
            budget: budget.parse()?,
        })
    }

    #[must_use]
    pub fn matches(&self, destination: &Destination) -> bool {
        self.continent.matches(&destination.continent)
            && self.budget.contains(destination.min_budget_day)
    }
}

/// Price band of a whole trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Budget,
    Mid,
    Luxury,
}

impl BudgetCategory {
    /// Classify a trip by its spend range. The ceiling is checked first, so a
    /// range entirely under 800 counts as budget even with a high floor.
    #[must_use]
    pub fn classify(min_budget: f64, max_budget: f64) -> Self {
        if max_budget < 800.0 {
            Self::Budget
        } else if min_budget > 1500.0 {
            Self::Luxury
        } else {
            Self::Mid
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Mid => "mid",
            Self::Luxury => "luxury",
        }
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
