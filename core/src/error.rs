//! Error types for the Product Hunt API client.
//!
//! # Design
//! "No query configured" is deliberately *not* represented here: a `get()`
//! on a client with no resource type selected is a defined nothing-to-do
//! outcome (`Ok(None)`), not a failure. Everything that actually goes wrong
//! — a missing token, an unparseable date filter, a non-200 response, or a
//! transport-level failure — lands in one of these variants.

use std::fmt;

/// Errors returned by `ProductHuntClient` and the `Step` query DSL.
#[derive(Debug)]
pub enum ApiError {
    /// The bearer token was empty at construction time. Fatal; no request
    /// is ever attempted.
    MissingToken,

    /// A date filter argument had a shape the DSL does not understand.
    UnrecognizedDateFormat(String),

    /// The server answered with a non-200 status. Never retried.
    RequestFailed { status: u16 },

    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    Transport(String),

    /// A 200 response body that was not valid JSON.
    InvalidJson(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingToken => {
                write!(f, "a Product Hunt API token is required")
            }
            ApiError::UnrecognizedDateFormat(input) => {
                write!(f, "unrecognized date format: {input:?}")
            }
            ApiError::RequestFailed { status } => {
                write!(f, "request failed with HTTP {status}")
            }
            ApiError::Transport(msg) => {
                write!(f, "transport error: {msg}")
            }
            ApiError::InvalidJson(msg) => {
                write!(f, "response body is not valid JSON: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
