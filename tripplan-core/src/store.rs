//! Durable plan slot: load, save and clear over a key-value backend.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use serde_json::Value;

use crate::migration;
use crate::plan::{DEFAULT_WALLET, Plan};

/// Key holding the serialized plan record.
pub const PLAN_KEY: &str = "tripPlan";

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// String key-value storage backing the plan and session slots.
/// Platform-specific implementations should provide this.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`; deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-process backend. Clones share the same underlying map, which makes it
/// usable as a stand-in for a browser profile shared by several handles.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. a legacy or corrupted record.
    #[must_use]
    pub fn with_entry(self, key: &str, value: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key.to_string(), value.into());
        self
    }

    /// Raw value currently stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] BoxedError),
    #[error("stored record under `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("plan serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }

    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }
}

/// What `load` does when the stored record cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Surface `StoreError::Corrupt` to the caller.
    #[default]
    Fail,
    /// Log a warning and hand back a fresh default plan. The slot is not
    /// rewritten until the next save.
    ResetToDefault,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub plan_key: String,
    pub default_wallet: f64,
    pub corrupt_policy: CorruptPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            plan_key: PLAN_KEY.to_string(),
            default_wallet: DEFAULT_WALLET,
            corrupt_policy: CorruptPolicy::Fail,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn with_corrupt_policy(mut self, policy: CorruptPolicy) -> Self {
        self.corrupt_policy = policy;
        self
    }
}

/// Owner of the canonical plan record.
///
/// Every write replaces the whole record; there is no merge with what another
/// handle (or another browser tab) may have written in between, so the last
/// `save` wins.
#[derive(Debug, Clone)]
pub struct PlanStore<S> {
    backend: S,
    config: StoreConfig,
}

impl<S: KeyValueStore> PlanStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub const fn with_config(backend: S, config: StoreConfig) -> Self {
        Self { backend, config }
    }

    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the current plan.
    ///
    /// An empty slot yields the default plan without writing anything. A
    /// record in the legacy layout is migrated and written back before it is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails, if a migrated record cannot be
    /// written back, or if the record is corrupt under `CorruptPolicy::Fail`.
    pub fn load(&self) -> Result<Plan, StoreError> {
        let key = self.config.plan_key.as_str();
        let Some(raw) = self.backend.get(key).map_err(StoreError::backend)? else {
            return Ok(Plan::with_wallet(self.config.default_wallet));
        };

        let mut value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(source) => return self.recover(source),
        };
        let migrated = migration::migrate_value(&mut value);
        migration::fill_null_lists(&mut value);
        let plan: Plan = match serde_json::from_value(value) {
            Ok(plan) => plan,
            Err(source) => return self.recover(source),
        };

        if migrated {
            self.save(&plan)?;
        }
        Ok(plan)
    }

    /// Overwrite the slot with `plan`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be serialized or the backend
    /// rejects the write.
    pub fn save(&self, plan: &Plan) -> Result<(), StoreError> {
        let json = serde_json::to_string(plan)?;
        self.backend
            .set(&self.config.plan_key, &json)
            .map_err(StoreError::backend)
    }

    /// Delete the slot; the next `load` yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend
            .remove(&self.config.plan_key)
            .map_err(StoreError::backend)
    }

    fn recover(&self, source: serde_json::Error) -> Result<Plan, StoreError> {
        match self.config.corrupt_policy {
            CorruptPolicy::Fail => Err(StoreError::Corrupt {
                key: self.config.plan_key.clone(),
                source,
            }),
            CorruptPolicy::ResetToDefault => {
                log::warn!(
                    "stored plan under `{}` is corrupt, falling back to defaults: {source}",
                    self.config.plan_key
                );
                Ok(Plan::with_wallet(self.config.default_wallet))
            }
        }
    }
}
