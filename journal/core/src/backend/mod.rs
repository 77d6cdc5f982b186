//! Journal Service Backend
//!
//! Abstraction over the remote journal service plus the HTTP implementation.

pub mod error;
pub mod http;
pub mod traits;

pub use error::ApiError;
pub use http::HttpBackend;
pub use traits::{ApiBackend, IDENTITY_HEADER};
