//! Response parsing and result shaping.
//!
//! Response-kind parsing ([`parse_body`]) and error-body decoding
//! ([`error_payload`]) are two independent paths on purpose: the first
//! interprets a successful body per the requested kind with a text
//! fallback, the second re-attempts a JSON decode of whatever the first
//! produced for a non-2xx response. Status and headers are captured before
//! the body is consumed, so the fallback never loses them.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::options::ResponseKind;
use crate::errors::{ErrorPayload, RequestError, Result};

/// A parsed response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The body decoded as JSON.
    Json(Value),
    /// The body as text (requested, or the fallback for undecodable JSON).
    Text(String),
    /// The raw body bytes.
    Bytes(Bytes),
}

impl ResponseBody {
    /// Deserialize the body into a typed value, decoding text or bytes as
    /// JSON when needed.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let decoded = match self {
            ResponseBody::Json(value) => serde_json::from_value(value),
            ResponseBody::Text(text) => serde_json::from_str(&text),
            ResponseBody::Bytes(bytes) => serde_json::from_slice(&bytes),
        };
        decoded.map_err(|e| {
            RequestError::DecodeJson {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// The body as a JSON value, when it was parsed as one.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The body as text. JSON re-serializes, bytes decode lossily.
    pub fn into_text(self) -> String {
        match self {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text,
            ResponseBody::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

/// The full result of a call: parsed body plus response metadata.
#[derive(Debug, Clone)]
pub struct FullResponse {
    /// The parsed response body.
    pub body: ResponseBody,
    /// The response headers.
    pub headers: HeaderMap,
    /// The HTTP status code.
    pub status: StatusCode,
}

/// What [`query`](crate::Client::query) returns: just the parsed body by
/// default, or the full response when the call asked for it.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The parsed body alone.
    Body(ResponseBody),
    /// Body plus headers and status.
    Full(FullResponse),
}

impl Reply {
    /// The parsed body, discarding response metadata if present.
    pub fn into_body(self) -> ResponseBody {
        match self {
            Reply::Body(body) => body,
            Reply::Full(full) => full.body,
        }
    }

    /// The full response, when the call requested one.
    pub fn into_full(self) -> Option<FullResponse> {
        match self {
            Reply::Body(_) => None,
            Reply::Full(full) => Some(full),
        }
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.into_body().json()
    }
}

/// Interpret a successful body per the requested kind.
///
/// JSON decode failures fall back to text; text and bytes cannot fail.
pub(crate) fn parse_body(kind: ResponseKind, bytes: Bytes) -> ResponseBody {
    match kind {
        ResponseKind::Json => match serde_json::from_slice(&bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()),
        },
        ResponseKind::Text => ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()),
        ResponseKind::Bytes => ResponseBody::Bytes(bytes),
    }
}

/// Decode a non-2xx body for the structured error: re-attempt JSON on
/// whatever parsing produced, keep it as-is when that fails.
pub(crate) fn error_payload(body: ResponseBody) -> ErrorPayload {
    match body {
        ResponseBody::Json(value) => ErrorPayload::Json(value),
        ResponseBody::Text(text) => match serde_json::from_str(&text) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(text),
        },
        ResponseBody::Bytes(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => ErrorPayload::Json(value),
            Err(_) => ErrorPayload::Text(String::from_utf8_lossy(&bytes).into_owned()),
        },
    }
}
