//! API Error Taxonomy
//!
//! Every way a call to the journal service can fail, and the user-facing
//! message for each. The app stores the message, not the error, in its
//! communication state; keeping the mapping here means the surface never
//! inspects errors itself.

use thiserror::Error;

/// A failed call to the journal service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request URL could not be built or parsed
    #[error("bad url: {0}")]
    BadUrl(String),
    /// The transport gave up waiting
    #[error("request timed out")]
    Timeout,
    /// Connection-level failure before any response arrived
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status
    #[error("bad status: {0}")]
    BadStatus(u16),
    /// The response body did not decode to the expected shape
    #[error("bad body: {0}")]
    BadBody(String),
}

impl ApiError {
    /// Classify a reqwest error into the taxonomy.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() {
            Self::BadUrl(
                err.url()
                    .map_or_else(|| err.to_string(), ToString::to_string),
            )
        } else if err.is_decode() {
            Self::BadBody(err.to_string())
        } else if let Some(status) = err.status() {
            Self::BadStatus(status.as_u16())
        } else {
            Self::Network(err.to_string())
        }
    }

    /// The message shown to the human. Stable wording: the surface renders
    /// this verbatim in the status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BadUrl(url) => format!("That server address doesn't look right: {url}"),
            Self::Timeout => "The server took too long to answer.".to_string(),
            Self::Network(_) => "Couldn't reach the server. Is it running?".to_string(),
            Self::BadStatus(500) => {
                "The server hit an internal error (500). Try again in a moment.".to_string()
            }
            Self::BadStatus(400) => {
                "The server rejected the request (400). This is probably a client bug.".to_string()
            }
            Self::BadStatus(code) => format!("The server answered with status {code}."),
            Self::BadBody(detail) => format!("The server sent something unexpected: {detail}"),
        }
    }
}
