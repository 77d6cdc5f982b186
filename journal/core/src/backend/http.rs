//! HTTP Backend Implementation
//!
//! The real [`ApiBackend`] over reqwest. Wire shapes follow the journal
//! service's JSON API:
//!
//! - GET `/users` → `{ "users": [...] }`
//! - POST `/register` → created user
//! - GET `/journal` → `{ "records": [...] }` (identified)
//! - GET `/end-day` → `{ "current_date": "..." }` (identified)
//! - POST `/journal` → 204 (identified)

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ApiError;
use super::traits::{ApiBackend, IDENTITY_HEADER};
use crate::model::{JournalEntry, NewEntry, RegisterUserInputs, User};

/// Default service address, overridable through the environment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1";

#[derive(Deserialize)]
struct UsersApiResponse {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct JournalApiResponse {
    records: Vec<JournalEntry>,
}

#[derive(Deserialize)]
struct EndDayApiResponse {
    current_date: String,
}

/// HTTP client for the journal service.
#[derive(Clone)]
pub struct HttpBackend {
    /// Service base URL, without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend against the given base URL (e.g.
    /// `http://localhost:8080/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            // No request timeout: a call resolves only by completing or by a
            // transport-level failure.
            http_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create from environment variables.
    ///
    /// `FJ_SERVER_URL` wins outright; otherwise `FJ_HOST`/`FJ_PORT` are
    /// spliced into the default address.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var("FJ_SERVER_URL") {
            return Self::new(url);
        }
        let host = std::env::var("FJ_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = std::env::var("FJ_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);
        Self::new(format!("http://{host}:{port}/v1"))
    }

    /// The configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn register_url(&self) -> String {
        format!("{}/register", self.base_url)
    }

    fn journal_url(&self) -> String {
        format!("{}/journal", self.base_url)
    }

    fn end_day_url(&self) -> String {
        format!("{}/end-day", self.base_url)
    }

    /// Check the status, then decode the body into `T`.
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus(status.as_u16()));
        }
        // Decode from the raw bytes so a malformed body is always BadBody,
        // never misclassified as a transport error.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::BadBody(e.to_string()))
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.users_url())
            .send()
            .await
            .is_ok()
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self
            .http_client
            .get(self.users_url())
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let body: UsersApiResponse = Self::decode(response).await?;
        Ok(body.users)
    }

    async fn register(&self, inputs: &RegisterUserInputs) -> Result<User, ApiError> {
        let response = self
            .http_client
            .post(self.register_url())
            .json(inputs)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        Self::decode(response).await
    }

    async fn journal(&self, user_name: &str) -> Result<Vec<JournalEntry>, ApiError> {
        let response = self
            .http_client
            .get(self.journal_url())
            .header(IDENTITY_HEADER, user_name)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let body: JournalApiResponse = Self::decode(response).await?;
        Ok(body.records)
    }

    async fn end_day(&self, user_name: &str) -> Result<String, ApiError> {
        let response = self
            .http_client
            .get(self.end_day_url())
            .header(IDENTITY_HEADER, user_name)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let body: EndDayApiResponse = Self::decode(response).await?;
        Ok(body.current_date)
    }

    async fn add_entry(&self, user_name: &str, entry: &NewEntry) -> Result<(), ApiError> {
        let response = self
            .http_client
            .post(self.journal_url())
            .header(IDENTITY_HEADER, user_name)
            .json(entry)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_backend_urls() {
        let backend = HttpBackend::new("http://localhost:8080/v1");
        assert_eq!(backend.users_url(), "http://localhost:8080/v1/users");
        assert_eq!(backend.register_url(), "http://localhost:8080/v1/register");
        assert_eq!(backend.journal_url(), "http://localhost:8080/v1/journal");
        assert_eq!(backend.end_day_url(), "http://localhost:8080/v1/end-day");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8080/v1/");
        assert_eq!(backend.base_url(), "http://localhost:8080/v1");
        assert_eq!(backend.users_url(), "http://localhost:8080/v1/users");
    }

    #[test]
    fn test_default_base_url() {
        let backend = HttpBackend::default();
        assert_eq!(backend.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_users_envelope_decodes() {
        let body: UsersApiResponse = serde_json::from_str(
            r#"{"users":[{
                "image": "data:,x", "user_name": "alice", "display_name": "Alice",
                "current_date": "2024-03-01", "target_calories": 2000,
                "target_fat": 250, "target_protein": 166, "target_carbohydrate": 44
            }]}"#,
        )
        .unwrap();
        assert_eq!(body.users.len(), 1);
        assert_eq!(body.users[0].user_name, "alice");
    }

    #[test]
    fn test_end_day_envelope_decodes() {
        let body: EndDayApiResponse =
            serde_json::from_str(r#"{"current_date": "2024-03-02"}"#).unwrap();
        assert_eq!(body.current_date, "2024-03-02");
    }
}
