//! Error types for the FreshBooks adapter.
//!
//! # Design
//! FreshBooks signals application errors inside HTTP 200 bodies, so the
//! `Api` variant gets its own shape: the classifier fixes its code at 400
//! and attaches the raw `response` object for caller inspection. Everything
//! that went wrong at the HTTP layer — non-2xx status, connection failure,
//! an unparseable body — lands in `Transport` with whatever diagnostics
//! could be salvaged. Neither kind is retryable at this layer.

use std::fmt;

use serde_json::Value;

/// Errors returned by `FreshbooksClient` build and parse methods.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// The server returned HTTP 200 with an embedded `"@status": "fail"`.
    /// `code` is always 400; `response` is the offending response object.
    Api {
        message: String,
        code: u16,
        response: Value,
    },

    /// Non-2xx status, connection failure, or a body that could not be
    /// read as the mapping form. `body` holds whatever diagnostics the
    /// error body yielded, `Value::Null` when there were none.
    Transport {
        message: String,
        code: u16,
        body: Value,
    },

    /// The request could not be built (empty method name, reserved key in
    /// the payload).
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status to surface to the caller.
    pub fn code(&self) -> u16 {
        match self {
            ApiError::Api { code, .. } | ApiError::Transport { code, .. } => *code,
            ApiError::InvalidRequest(_) => 400,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Api { message, .. } => write!(f, "{message}"),
            ApiError::Transport { message, code, .. } => {
                write!(f, "{message} (HTTP {code})")
            }
            ApiError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
