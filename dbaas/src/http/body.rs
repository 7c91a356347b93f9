//! Request body shapes.
//!
//! The original wire behavior branches on the runtime shape of the body
//! (string vs object vs blob). Here that is an explicit tagged union the
//! caller picks, which makes every encoding branch exhaustively testable.

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{RequestError, Result};
use crate::shape::flatten;

/// The body of one request, tagged by how it must be encoded.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// JSON-serialized with `Content-Type: application/json`.
    Json(Value),
    /// Sent verbatim with `Content-Type: application/json`; the pipeline
    /// never re-serializes a string body.
    Raw(String),
    /// Encoded as `multipart/form-data`, one part per entry. Nested keys
    /// are flattened to dotted paths first unless the call disables
    /// [`flatten_form`](crate::RequestOptions::flatten_form).
    Form(Map<String, Value>),
    /// A file payload. With `octet_stream` set the bytes are sent as-is
    /// under `Content-Type: application/octet-stream`; otherwise the file
    /// becomes a single multipart part keyed `value`.
    File {
        /// File name reported in the multipart part.
        name: String,
        /// The raw file content.
        content: Bytes,
        /// Bypass multipart wrapping and send the bytes directly.
        octet_stream: bool,
    },
}

impl RequestBody {
    /// JSON body from any serializable value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| RequestError::Validation {
            message: format!("failed to encode request body: {e}"),
        })?;
        Ok(RequestBody::Json(value))
    }

    /// Form body from any value serializing to a JSON object.
    pub fn form<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value).map_err(|e| RequestError::Validation {
            message: format!("failed to encode form body: {e}"),
        })? {
            Value::Object(map) => Ok(RequestBody::Form(map)),
            other => Err(RequestError::Validation {
                message: format!("form body must be an object, got {other}"),
            }
            .into()),
        }
    }

    /// File upload wrapped as a single multipart part keyed `value`.
    pub fn file<S: Into<String>, B: Into<Bytes>>(name: S, content: B) -> Self {
        RequestBody::File {
            name: name.into(),
            content: content.into(),
            octet_stream: false,
        }
    }

    /// Raw file bytes sent as `application/octet-stream`, no wrapping.
    pub fn octet_stream<S: Into<String>, B: Into<Bytes>>(name: S, content: B) -> Self {
        RequestBody::File {
            name: name.into(),
            content: content.into(),
            octet_stream: true,
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RequestBody::Raw(s),
            other => RequestBody::Json(other),
        }
    }
}

impl From<&str> for RequestBody {
    fn from(value: &str) -> Self {
        RequestBody::Raw(value.to_string())
    }
}

/// Encode one form entry. `Null` becomes the empty string, containers are
/// JSON text, strings pass through unquoted, scalars use their display form.
fn form_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        other => other.to_string(),
    }
}

/// Build the multipart form for a [`RequestBody::Form`] body.
pub(crate) fn multipart_form(fields: &Map<String, Value>, flatten_keys: bool) -> Form {
    let mut form = Form::new();

    if flatten_keys {
        let source = Value::Object(fields.clone());
        for (key, value) in flatten(&source) {
            form = form.text(key, form_value(&value));
        }
    } else {
        for (key, value) in fields {
            form = form.text(key.clone(), form_value(value));
        }
    }

    form
}

/// Build the multipart form for a plain file upload: exactly one part,
/// keyed `value`.
pub(crate) fn file_form(name: &str, content: &Bytes) -> Form {
    Form::new().part(
        "value",
        Part::bytes(content.to_vec()).file_name(name.to_string()),
    )
}
