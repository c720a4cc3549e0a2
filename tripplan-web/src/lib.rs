#![forbid(unsafe_code)]
//! Browser bindings for the trip planner: `localStorage` slots, the bundled
//! catalog and the `TripPlanner` class the page scripts drive.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub mod bridge;
pub mod catalog;
pub mod clock;
pub mod dom;
pub mod logging;
pub mod storage;

pub use catalog::bundled_catalog;
pub use clock::JsClock;
pub use storage::{LocalStorageSlot, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if let Err(err) = logging::init(log::LevelFilter::Info) {
        dom::console_error(&format!("Failed to install console logger: {err}"));
    }
}
