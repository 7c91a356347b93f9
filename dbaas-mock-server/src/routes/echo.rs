//! Request-reflection endpoints.
//!
//! `raw` reports method, relevant headers, and the body as text.
//! `multipart` decodes a multipart body and reports its parts, so client
//! tests can assert form-encoding behavior without inspecting boundaries.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

fn header_str(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

pub(crate) async fn raw(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "content_type": header_str(&headers, "content-type"),
        "authorization": header_str(&headers, "authorization"),
        "cookie": header_str(&headers, "cookie"),
        "body": String::from_utf8_lossy(&body),
        "body_len": body.len(),
    }))
}

pub(crate) async fn multipart(headers: HeaderMap, mut parts: Multipart) -> Response {
    let mut fields = Map::new();

    while let Ok(Some(field)) = parts.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(file_name) => {
                let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
                fields.insert(
                    name,
                    json!({"file_name": file_name, "length": len}),
                );
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                fields.insert(name, Value::String(text));
            }
        }
    }

    Json(json!({
        "cookie": header_str(&headers, "cookie"),
        "fields": fields,
    }))
    .into_response()
}
