pub mod auth;
pub mod config;
pub mod habit;
pub mod stats;

use strive_core::store::session;
use strive_core::{Config, Session, StoreClient};

/// Build the store client from the saved configuration.
pub(crate) fn client() -> Result<StoreClient, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if config.backend.anon_key.is_empty() {
        return Err(
            "backend is not configured; run `strive-cli config set backend.anon_key <key>`".into(),
        );
    }
    Ok(StoreClient::new(&config.backend.url, &config.backend.anon_key)?)
}

/// Load the stored session or explain how to sign in.
pub(crate) fn require_session() -> Result<Session, Box<dyn std::error::Error>> {
    match session::load_session()? {
        Some(s) => Ok(s),
        None => Err("not signed in; run `strive-cli auth sign-in`".into()),
    }
}

/// Runtime for blocking on the async store client.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Runtime::new()?)
}
