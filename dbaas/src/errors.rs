//! Unified error types for the `dbaas` crate.
//!
//! This module centralizes all failures that can occur while talking to the
//! admin API and provides a single top-level [`Error`] enum plus the
//! convenient [`Result`] alias. Errors from lower layers (`reqwest`, URL
//! parsing) are mapped into structured variants so callers can handle them
//! precisely.
//!
//! The important distinction (and invariant) is between
//! [`RequestError::Transport`] — the network call itself failed, no HTTP
//! response exists — and [`RequestError::Server`] — the transport completed
//! but the server answered with a non-2xx status. The pipeline never
//! converts one into the other.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`Client`](crate::Client).
#[derive(Debug, Error)]
pub enum BuildError {
    /// No base origin was configured.
    #[error("A base origin is required (e.g. https://portal.example.com)")]
    MissingOrigin,

    /// The configured base origin is not a valid URL.
    #[error("Invalid base origin: {0}")]
    Origin(#[from] url::ParseError),

    /// The base origin must carry a host (e.g. `https://portal.example.com`).
    #[error("Base origin has no host: {0}")]
    OriginWithoutHost(String),

    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- The Main Operational Error Enum ---

/// The crate's top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`] — HTTP transport/server/validation issues
/// - [`Error::Parse`] — URL parsing failures
/// - [`Error::Build`] — construction of the client failed
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, validation, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL parsing failed while preparing a request or path.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Building the client failed (reqwest or origin configuration).
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    /// No HTTP response was obtained; treat as unrecoverable for this call.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Carries the status and the
    /// parsed-or-raw response payload.
    #[error("Server responded with non-ok code: {status}")]
    Server {
        /// The HTTP status code returned by the server.
        status: StatusCode,
        /// The response body: JSON when it decodes, raw text otherwise.
        payload: ErrorPayload,
    },

    /// Caller supplied an invalid URL/path/argument for this API.
    #[error("Invalid request: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON decoding failed when parsing a server response into a typed value.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

/// The body of a non-2xx response, as carried by [`RequestError::Server`].
///
/// The pipeline re-attempts a JSON decode of the already-parsed response
/// data; when that fails the payload is kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// The error body decoded as JSON.
    Json(serde_json::Value),
    /// The error body as raw text.
    Text(String),
}

impl ErrorPayload {
    /// The payload as JSON, when it decoded as such.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ErrorPayload::Json(value) => Some(value),
            ErrorPayload::Text(_) => None,
        }
    }

    /// The payload as raw text, when it did not decode as JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ErrorPayload::Json(_) => None,
            ErrorPayload::Text(text) => Some(text),
        }
    }

    /// The server's human-readable message, if the payload carries one
    /// under the conventional `message` key.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorPayload::Json(value) => value.get("message").and_then(|m| m.as_str()),
            ErrorPayload::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Json(value) => write!(f, "{value}"),
            ErrorPayload::Text(text) => write!(f, "{text}"),
        }
    }
}

impl Error {
    /// The HTTP status code, when this error is a server response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(RequestError::Server { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// A specialized `Result` type for `dbaas` operations.
pub type Result<T> = std::result::Result<T, Error>;

// Ergonomic "Staircase" From Implementations ---
// A macro to reduce boilerplate for converting base errors into the top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

// Request Errors
impl_from_for_error!(reqwest::Error, Error::Request);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_exposes_status_and_payload() {
        let err: Error = RequestError::Server {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            payload: ErrorPayload::Json(serde_json::json!({"error": "bad"})),
        }
        .into();

        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(err.to_string().contains("non-ok code: 422"));

        match err {
            Error::Request(RequestError::Server { payload, .. }) => {
                assert_eq!(
                    payload.as_json(),
                    Some(&serde_json::json!({"error": "bad"}))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn payload_message_reads_conventional_key() {
        let json = ErrorPayload::Json(serde_json::json!({"message": "Database not found."}));
        assert_eq!(json.message(), Some("Database not found."));

        let text = ErrorPayload::Text("plain failure".into());
        assert_eq!(text.message(), Some("plain failure"));
        assert!(text.as_json().is_none());
    }
}
