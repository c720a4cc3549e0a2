//! `localStorage` backend for the plan and session slots.

use tripplan_core::KeyValueStore;
use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("localStorage {op} failed for `{key}`: {message}")]
    Operation {
        op: &'static str,
        key: String,
        message: String,
    },
}

impl WebStorageError {
    fn operation(op: &'static str, key: &str, err: &JsValue) -> Self {
        Self::Operation {
            op,
            key: key.to_string(),
            message: dom::js_error_message(err),
        }
    }
}

impl From<WebStorageError> for JsValue {
    fn from(err: WebStorageError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Key-value slots in the page's `localStorage`.
///
/// The handle is re-acquired on each access, so a slot created before storage
/// becomes available (or after it is revoked) reports the failure per call
/// rather than at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSlot;

impl LocalStorageSlot {
    fn storage() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage().map_err(|err| WebStorageError::Unavailable(dom::js_error_message(&err)))
    }
}

impl KeyValueStore for LocalStorageSlot {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| WebStorageError::operation("read", key, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| WebStorageError::operation("write", key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| WebStorageError::operation("remove", key, &err))
    }
}
