//! StoreClient: habit CRUD and credential flow against the hosted
//! backend.
//!
//! The backend exposes a Supabase-shaped surface: `/auth/v1/*` for the
//! auth provider and `/rest/v1/habits` for row access. Rows are scoped
//! to the signed-in user by the backend's row-level policies; every data
//! call carries the project API key plus the session's bearer token.
//!
//! No retries happen here; a failure is surfaced as a [`StoreError`] and
//! the caller decides what to do with its unchanged local state.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::session::Session;
use crate::error::StoreError;
use crate::habit::{Habit, History};

/// Partial update written back after a toggle: the full history map plus
/// the recomputed completion total, replaced in one call so two rapid
/// toggles cannot interleave half-applied maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitPatch {
    pub history: History,
    pub total_completions: u32,
}

impl From<&Habit> for HabitPatch {
    fn from(habit: &Habit) -> Self {
        Self {
            history: habit.history.clone(),
            total_completions: habit.total_completions,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    user: AuthUser,
}

/// Client for the hosted auth/storage backend.
pub struct StoreClient {
    base_url: Url,
    api_key: String,
    http: Client,
}

impl StoreClient {
    /// Create a client for the given project URL and public API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            api_key: api_key.to_string(),
            http: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Register a new account. Returns the fresh session.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/signup"))
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        self.into_session(resp, email).await
    }

    /// Exchange credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        self.into_session(resp, email).await
    }

    /// Invalidate the session's token on the backend.
    pub async fn sign_out(&self, session: &Session) -> Result<(), StoreError> {
        let resp = self
            .http
            .post(self.endpoint("auth/v1/logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Fetch the user's habits, ordered by creation date.
    pub async fn list_habits(&self, session: &Session) -> Result<Vec<Habit>, StoreError> {
        let resp = self
            .http
            .get(self.endpoint("rest/v1/habits"))
            .query(&[("select", "*"), ("order", "created_at.asc")])
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        let habits = check(resp).await?.json().await?;
        Ok(habits)
    }

    /// Insert a freshly created habit.
    pub async fn insert_habit(&self, session: &Session, habit: &Habit) -> Result<(), StoreError> {
        let resp = self
            .http
            .post(self.endpoint("rest/v1/habits"))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.access_token)
            .json(habit)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Replace a habit's history and completion total.
    pub async fn update_habit(
        &self,
        session: &Session,
        id: &str,
        patch: &HabitPatch,
    ) -> Result<(), StoreError> {
        let resp = self
            .http
            .patch(self.endpoint("rest/v1/habits"))
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .json(patch)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Delete a habit and its entire history in one call.
    pub async fn delete_habit(&self, session: &Session, id: &str) -> Result<(), StoreError> {
        let resp = self
            .http
            .delete(self.endpoint("rest/v1/habits"))
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn into_session(
        &self,
        resp: reqwest::Response,
        email: &str,
    ) -> Result<Session, StoreError> {
        let auth: AuthResponse = check(resp).await?.json().await?;
        Ok(Session {
            user_id: auth.user.id,
            email: if auth.user.email.is_empty() {
                email.to_string()
            } else {
                auth.user.email
            },
            access_token: auth.access_token,
        })
    }
}

/// Turn a non-success response into a `StoreError::Api`, pulling the
/// human-readable message out of the JSON body when one is present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(String::from))
        })
        .unwrap_or(body);

    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        assert!(StoreClient::new("not a url", "key").is_err());
    }

    #[test]
    fn endpoint_handles_trailing_slash() {
        let with = StoreClient::new("https://example.supabase.co/", "key").unwrap();
        let without = StoreClient::new("https://example.supabase.co", "key").unwrap();
        assert_eq!(
            with.endpoint("rest/v1/habits"),
            "https://example.supabase.co/rest/v1/habits"
        );
        assert_eq!(with.endpoint("rest/v1/habits"), without.endpoint("rest/v1/habits"));
    }
}
