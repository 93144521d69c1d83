//! Authenticated session: the user identifier and bearer token handed
//! out by the auth provider.
//!
//! Token issuance, refresh, and verification all live in the backend;
//! this module only carries the result around and persists it in the OS
//! keyring between CLI invocations.

use serde::{Deserialize, Serialize};

use super::keyring_store;
use crate::error::StoreError;

const SESSION_KEY: &str = "session";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

/// Persist the session in the keyring.
pub fn save_session(session: &Session) -> Result<(), StoreError> {
    let json = serde_json::to_string(session)?;
    keyring_store::set(SESSION_KEY, &json)
        .map_err(|e| StoreError::SessionStorage(e.to_string()))
}

/// Load the stored session, if any.
pub fn load_session() -> Result<Option<Session>, StoreError> {
    let json = keyring_store::get(SESSION_KEY)
        .map_err(|e| StoreError::SessionStorage(e.to_string()))?;
    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Forget the stored session.
pub fn clear_session() -> Result<(), StoreError> {
    keyring_store::delete(SESSION_KEY)
        .map_err(|e| StoreError::SessionStorage(e.to_string()))
}
