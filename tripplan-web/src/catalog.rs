//! Destination catalog bundled with the page.

use once_cell::sync::Lazy;
use tripplan_core::Catalog;

const CATALOG_JSON: &str = include_str!("../static/data/destinations.json");

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(CATALOG_JSON).unwrap_or_else(|err| {
        log::error!("bundled destination catalog is invalid: {err}");
        Catalog::empty()
    })
});

/// The bundled catalog, parsed on first use.
#[must_use]
pub fn bundled_catalog() -> &'static Catalog {
    &CATALOG
}
