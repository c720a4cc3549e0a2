//! Username slot. Presence of a non-empty name means "logged in"; there is no
//! password, token or expiry.
use crate::store::{KeyValueStore, StoreError};

/// Key holding the signed-in username.
pub const SESSION_KEY: &str = "user";

#[derive(Debug, Clone)]
pub struct Session<S> {
    backend: S,
}

impl<S: KeyValueStore> Session<S> {
    pub const fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Store `username` as the signed-in user. Blank names are ignored.
    /// Returns whether a user is now signed in.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub fn login(&self, username: &str) -> Result<bool, StoreError> {
        let name = username.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.backend
            .set(SESSION_KEY, name)
            .map_err(StoreError::backend)?;
        log::debug!("signed in as {name}");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.backend
            .remove(SESSION_KEY)
            .map_err(StoreError::backend)
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn current_user(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .backend
            .get(SESSION_KEY)
            .map_err(StoreError::backend)?
            .filter(|name| !name.is_empty()))
    }

    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn is_logged_in(&self) -> Result<bool, StoreError> {
        Ok(self.current_user()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn login_and_logout_round_trip() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_logged_in().unwrap());
        assert!(session.login("  amina ").unwrap());
        assert_eq!(session.current_user().unwrap().as_deref(), Some("amina"));
        session.logout().unwrap();
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn blank_username_is_not_stored() {
        let backend = MemoryStore::new();
        let session = Session::new(backend.clone());
        assert!(!session.login("   ").unwrap());
        assert!(backend.raw(SESSION_KEY).is_none());
    }

    #[test]
    fn empty_stored_name_is_logged_out() {
        let session = Session::new(MemoryStore::new().with_entry(SESSION_KEY, ""));
        assert!(!session.is_logged_in().unwrap());
    }
}
