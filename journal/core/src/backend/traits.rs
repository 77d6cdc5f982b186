//! Backend Trait
//!
//! Trait definition for the journal service. The app core is generic over
//! this trait so the whole state machine can run against a scripted mock in
//! tests, exactly as it runs against HTTP in production.
//!
//! # Identity
//!
//! The service has no token or session mechanism: the username itself is the
//! credential, carried in the `x-fj-user` header on journal and end-day
//! calls. Registration and user-listing are anonymous. That trust boundary
//! belongs to the service; this client preserves it as-is.

use async_trait::async_trait;

use super::error::ApiError;
use crate::model::{JournalEntry, NewEntry, RegisterUserInputs, User};

/// Header naming the acting user on identified calls.
pub const IDENTITY_HEADER: &str = "x-fj-user";

/// The journal service, as seen by the client.
///
/// All operations are one-shot: no retries, no deduplication, no
/// cancellation. A call either completes or fails with an [`ApiError`].
#[async_trait]
pub trait ApiBackend: Send + Sync {
    /// Backend name for logs (e.g. "http")
    fn name(&self) -> &str;

    /// Whether the service is reachable at all
    async fn health_check(&self) -> bool;

    /// GET `/users` — every registered user, anonymous.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// POST `/register` — create a user; the service computes the nutrition
    /// targets and answers with the full [`User`].
    async fn register(&self, inputs: &RegisterUserInputs) -> Result<User, ApiError>;

    /// GET `/journal` — the identified user's entries for the current day.
    async fn journal(&self, user_name: &str) -> Result<Vec<JournalEntry>, ApiError>;

    /// GET `/end-day` — roll the identified user's journal date forward;
    /// answers with the new current date.
    async fn end_day(&self, user_name: &str) -> Result<String, ApiError>;

    /// POST `/journal` — log a food entry for the identified user.
    async fn add_entry(&self, user_name: &str, entry: &NewEntry) -> Result<(), ApiError>;
}
