//! Pipeline behavior against a live mock server: credential modes, body
//! encodings, response parsing, and error translation.

use dbaas::{
    Client, Error, ErrorPayload, Reply, RequestBody, RequestError, RequestOptions, ResponseBody,
    ResponseKind, StatusCode,
};
use dbaas_mock_server::MockApi;
use serde_json::{json, Value};

async fn setup() -> (MockApi, Client) {
    let server = MockApi::run().await.unwrap();
    let client = Client::new(server.url()).unwrap();
    (server, client)
}

#[tokio::test]
async fn get_returns_parsed_body_unchanged_on_2xx() {
    let (_server, client) = setup().await;

    let reply = client
        .get("/api/v1/databases", RequestOptions::default())
        .await
        .unwrap();

    assert!(matches!(reply, Reply::Body(_)));
    assert_eq!(reply.into_body(), ResponseBody::Json(json!([])));
}

#[tokio::test]
async fn non_2xx_json_becomes_a_structured_server_error() {
    let (_server, client) = setup().await;

    let err = client
        .get("/api/v1/databases/DB-9999", RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        Error::Request(RequestError::Server { status, payload }) => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(
                payload,
                ErrorPayload::Json(json!({"message": "Database not found."}))
            );
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn cookies_are_replayed_by_default_and_omitted_on_request() {
    let (_server, client) = setup().await;

    // Establish the session cookie through the cookie-jar transport.
    client
        .post("/api/v1/session", None, RequestOptions::default())
        .await
        .unwrap();

    let echoed: Value = client
        .post("/api/v1/echo", None, RequestOptions::default())
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echoed["cookie"], json!("sid=mock-session"));

    let echoed: Value = client
        .post(
            "/api/v1/echo",
            None,
            RequestOptions::default().allow_cookies(false),
        )
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echoed["cookie"], Value::Null);
}

#[tokio::test]
async fn single_file_upload_is_one_multipart_part_keyed_value() {
    let (_server, client) = setup().await;

    let echoed: Value = client
        .post(
            "/api/v1/echo/multipart",
            Some(RequestBody::file("report.csv", "a,b\n1,2\n")),
            RequestOptions::default(),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    let fields = echoed["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["value"]["file_name"], json!("report.csv"));
    assert_eq!(fields["value"]["length"], json!(8));
}

#[tokio::test]
async fn form_bodies_flatten_nested_keys_to_dotted_paths() {
    let (_server, client) = setup().await;

    let body = RequestBody::form(&json!({"a": 1, "b": {"c": 2}})).unwrap();
    let echoed: Value = client
        .post(
            "/api/v1/echo/multipart",
            Some(body),
            RequestOptions::default(),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(
        echoed["fields"],
        json!({"a": "1", "b.c": "2"})
    );
}

#[tokio::test]
async fn form_flattening_can_be_disabled() {
    let (_server, client) = setup().await;

    let body = RequestBody::form(&json!({"a": null, "b": {"c": 2}})).unwrap();
    let echoed: Value = client
        .post(
            "/api/v1/echo/multipart",
            Some(body),
            RequestOptions::default().flatten_form(false),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    // Null encodes as the empty string; nested objects as JSON text.
    assert_eq!(
        echoed["fields"],
        json!({"a": "", "b": "{\"c\":2}"})
    );
}

#[tokio::test]
async fn octet_stream_uploads_bypass_multipart_wrapping() {
    let (_server, client) = setup().await;

    let echoed: Value = client
        .post(
            "/api/v1/echo",
            Some(RequestBody::octet_stream("dump.bin", &b"\x01\x02\x03\x04"[..])),
            RequestOptions::default(),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["content_type"], json!("application/octet-stream"));
    assert_eq!(echoed["body_len"], json!(4));
}

#[tokio::test]
async fn raw_string_bodies_are_sent_verbatim_as_json() {
    let (_server, client) = setup().await;

    let echoed: Value = client
        .post(
            "/api/v1/echo",
            Some(RequestBody::from("{\"pre\": 1}")),
            RequestOptions::default(),
        )
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["content_type"], json!("application/json"));
    assert_eq!(echoed["body"], json!("{\"pre\": 1}"));
}

#[tokio::test]
async fn full_response_carries_headers_and_status() {
    let (_server, client) = setup().await;

    let reply = client
        .get(
            "/api/v1/regions",
            RequestOptions::default().full_response(true),
        )
        .await
        .unwrap();

    let full = reply.into_full().expect("full response requested");
    assert_eq!(full.status, StatusCode::OK);
    assert!(full.headers.contains_key("content-type"));
    assert!(matches!(full.body, ResponseBody::Json(Value::Array(_))));
}

#[tokio::test]
async fn response_kind_text_skips_json_decoding() {
    let (_server, client) = setup().await;

    let body = client
        .get(
            "/api/v1/regions",
            RequestOptions::default().parse_response_as(ResponseKind::Text),
        )
        .await
        .unwrap()
        .into_body();

    match body {
        ResponseBody::Text(text) => assert!(text.contains("eu-west")),
        other => panic!("expected text body, got {other:?}"),
    }
}

#[tokio::test]
async fn api_key_is_passed_through_as_authorization() {
    let server = MockApi::run().await.unwrap();
    let client = Client::builder()
        .origin(server.url())
        .api_key("ApiKey SU-000:default")
        .build()
        .unwrap();

    let echoed: Value = client
        .post("/api/v1/echo", None, RequestOptions::default())
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echoed["authorization"], json!("ApiKey SU-000:default"));

    // A per-call key overrides the client default.
    let echoed: Value = client
        .post(
            "/api/v1/echo",
            None,
            RequestOptions::default().api_key("ApiKey SU-000:per-call"),
        )
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(echoed["authorization"], json!("ApiKey SU-000:per-call"));
}

#[tokio::test]
async fn transport_faults_stay_distinct_from_server_errors() {
    // Nothing listens on this port.
    let client = Client::new("http://127.0.0.1:9").unwrap();

    let err = client
        .get("/api/v1/databases", RequestOptions::default())
        .await
        .unwrap_err();

    assert!(err.status().is_none());
    assert!(matches!(
        err,
        Error::Request(RequestError::Transport(_))
    ));
}

#[tokio::test]
async fn patch_carries_its_method_and_json_body() {
    let (_server, client) = setup().await;

    let reply = client
        .patch(
            "/api/v1/echo",
            Some(RequestBody::json(&json!({"description": "renamed"})).unwrap()),
            RequestOptions::default(),
        )
        .await
        .unwrap()
        .into_body();

    let echoed = reply.as_value().unwrap();
    assert_eq!(echoed["method"], json!("PATCH"));
    assert_eq!(echoed["content_type"], json!("application/json"));
    assert_eq!(echoed["body"], json!(r#"{"description":"renamed"}"#));
}

#[tokio::test]
async fn typed_post_and_put_helpers_decode_the_json_reply() {
    let (_server, client) = setup().await;
    let payload = json!({"name": "orders"});

    let echoed: Value = client.post_json("/api/v1/echo", &payload).await.unwrap();
    assert_eq!(echoed["method"], json!("POST"));
    assert_eq!(echoed["body"], json!(payload.to_string()));

    let echoed: Value = client.put_json("/api/v1/echo", &payload).await.unwrap();
    assert_eq!(echoed["method"], json!("PUT"));
}
