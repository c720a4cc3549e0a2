//! `TripPlanner` class exported to the page scripts.
//!
//! Every method returns plain JS objects built with `serde-wasm-bindgen`.
//! Rejections the user should see come back as `{ kind, message }` notices;
//! storage failures are thrown as `Error`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen::Serializer;
use tripplan_core::ids::millis_to_id;
use tripplan_core::{
    BudgetCategory, CatalogFilter, DestinationDraft, HotelDraft, ItemDraft, Planner,
};
use wasm_bindgen::prelude::*;

use crate::catalog::bundled_catalog;
use crate::clock::JsClock;
use crate::storage::LocalStorageSlot;

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn js_error(err: &impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Ids arrive as JS numbers; they are whole milliseconds or small catalog ids.
fn js_id(id: f64) -> i64 {
    millis_to_id(id)
}

#[wasm_bindgen]
pub struct TripPlanner {
    inner: Planner<LocalStorageSlot, JsClock>,
}

#[wasm_bindgen]
impl TripPlanner {
    /// Open the planner over `localStorage` and load the saved plan,
    /// upgrading a legacy record if one is found.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TripPlanner, JsValue> {
        let inner = Planner::new(LocalStorageSlot, bundled_catalog().clone(), JsClock)
            .map_err(|err| js_error(&err))?;
        Ok(Self { inner })
    }

    pub fn plan(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.plan())
    }

    /// Display rows for the itinerary list:
    /// `{ index, id, kind, heading, dateLine, costLine, completed }`.
    /// `index` is what the drag hooks expect.
    #[wasm_bindgen(js_name = itineraryRows)]
    pub fn itinerary_rows(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.plan().rows())
    }

    /// Re-read the stored plan, picking up changes from other tabs.
    pub fn refresh(&mut self) -> Result<JsValue, JsValue> {
        let plan = self.inner.refresh().map_err(|err| js_error(&err))?;
        to_js(plan)
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.summary())
    }

    pub fn catalog(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.catalog())
    }

    pub fn popular(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.catalog().popular())
    }

    pub fn continents(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.catalog().continents())
    }

    /// Catalog entries matching the explore controls.
    #[wasm_bindgen(js_name = filterCatalog)]
    pub fn filter_catalog(&self, continent: &str, budget: &str) -> Result<JsValue, JsValue> {
        let filter = CatalogFilter::from_controls(continent, budget).map_err(|err| js_error(&err))?;
        to_js(&self.inner.catalog().filter(&filter))
    }

    pub fn login(&mut self, username: &str) -> Result<JsValue, JsValue> {
        let notice = self.inner.login(username).map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    pub fn logout(&mut self) -> Result<JsValue, JsValue> {
        let notice = self.inner.logout().map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = currentUser)]
    pub fn current_user(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .session()
            .current_user()
            .map_err(|err| js_error(&err))
    }

    #[wasm_bindgen(js_name = addToPlan)]
    pub fn add_to_plan(&mut self, id: f64) -> Result<JsValue, JsValue> {
        let notice = self
            .inner
            .add_to_plan(js_id(id))
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    /// `draft` is `{ name, continent, description, minBudgetDay }` as form strings.
    #[wasm_bindgen(js_name = addCustomDestination)]
    pub fn add_custom_destination(&mut self, draft: JsValue) -> Result<JsValue, JsValue> {
        let draft: DestinationDraft = from_js(draft)?;
        let notice = self
            .inner
            .add_custom_destination(&draft)
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = removeDestination)]
    pub fn remove_destination(&mut self, id: f64) -> Result<JsValue, JsValue> {
        let notice = self
            .inner
            .remove_destination(js_id(id))
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    /// `draft` is `{ details, date, cost }`.
    #[wasm_bindgen(js_name = addFlight)]
    pub fn add_flight(&mut self, draft: JsValue) -> Result<JsValue, JsValue> {
        let draft: ItemDraft = from_js(draft)?;
        let notice = self.inner.add_flight(&draft).map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    /// `draft` is `{ details, date, costPerNight, nights }`.
    #[wasm_bindgen(js_name = addHotel)]
    pub fn add_hotel(&mut self, draft: JsValue) -> Result<JsValue, JsValue> {
        let draft: HotelDraft = from_js(draft)?;
        let notice = self.inner.add_hotel(&draft).map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = addActivity)]
    pub fn add_activity(&mut self, draft: JsValue) -> Result<JsValue, JsValue> {
        let draft: ItemDraft = from_js(draft)?;
        let notice = self
            .inner
            .add_activity(&draft)
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, id: f64) -> Result<JsValue, JsValue> {
        let notice = self
            .inner
            .remove_item(js_id(id))
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = toggleCompleted)]
    pub fn toggle_completed(&mut self, id: f64) -> Result<JsValue, JsValue> {
        let notice = self
            .inner
            .toggle_completed(js_id(id))
            .map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = setBudget)]
    pub fn set_budget(&mut self, raw: &str) -> Result<JsValue, JsValue> {
        let notice = self.inner.set_budget(raw).map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = clearPlan)]
    pub fn clear_plan(&mut self) -> Result<JsValue, JsValue> {
        let notice = self.inner.clear_plan().map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = resetAll)]
    pub fn reset_all(&mut self) -> Result<JsValue, JsValue> {
        let notice = self.inner.reset_all().map_err(|err| js_error(&err))?;
        to_js(&notice)
    }

    #[wasm_bindgen(js_name = dragState)]
    pub fn drag_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_state())
    }

    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&mut self, index: u32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_start(index as usize))
    }

    #[wasm_bindgen(js_name = dragEnter)]
    pub fn drag_enter(&mut self, index: u32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_enter(index as usize))
    }

    #[wasm_bindgen(js_name = dragLeave)]
    pub fn drag_leave(&mut self, index: u32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_leave(index as usize))
    }

    /// Drop onto row `index`. A `move` effect has already been saved when
    /// this returns; the caller re-renders from `plan()`.
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_on(&mut self, index: u32) -> Result<JsValue, JsValue> {
        let effect = self
            .inner
            .drag_drop(index as usize)
            .map_err(|err| js_error(&err))?;
        to_js(&effect)
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.drag_end())
    }
}

/// `budget`, `mid` or `luxury` for a trip spending between `min` and `max`.
#[wasm_bindgen(js_name = budgetCategory)]
#[must_use]
pub fn budget_category(min: f64, max: f64) -> String {
    BudgetCategory::classify(min, max).to_string()
}
