//! The pipeline itself, plus verb bindings and typed JSON helpers.

use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{error_payload, file_form, multipart_form, parse_body};
use super::{FullResponse, Reply, RequestBody, RequestOptions};
use crate::errors::{RequestError, Result};
use crate::Client;

impl Client {
    /// Issue one HTTP request and produce a parsed, normalized outcome.
    ///
    /// Processing order: resolve root-relative paths against the client's
    /// origin, pick the transport for the call's credential mode, encode
    /// the body per its tag, send (exactly once, no retries, no caching),
    /// parse the body per the requested kind, translate non-2xx statuses
    /// into [`RequestError::Server`], and shape the result per
    /// `full_response`.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Transport`] when the network call itself fails;
    ///   no HTTP response exists in that case.
    /// - [`RequestError::Server`] when the server answered non-2xx; carries
    ///   the status and the parsed-or-raw body.
    pub async fn query(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        let url = self.resolve(path)?;
        let transport = self.transport(options.allow_cookies);

        let mut request = transport
            .request(method.clone(), url.clone())
            .headers(options.headers.clone());

        if let Some(key) = options.api_key.as_deref().or(self.api_key.as_deref()) {
            let value = HeaderValue::from_str(key).map_err(|_| RequestError::Validation {
                message: "API key is not a valid header value".to_string(),
            })?;
            request = request.header(AUTHORIZATION, value);
        }

        request = match body {
            Some(RequestBody::File {
                content,
                octet_stream: true,
                ..
            }) => request
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(content),
            Some(RequestBody::File {
                name,
                content,
                octet_stream: false,
            }) => request.multipart(file_form(&name, &content)),
            Some(RequestBody::Form(fields)) => {
                request.multipart(multipart_form(&fields, options.flatten_form))
            }
            Some(RequestBody::Json(value)) => request
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            Some(RequestBody::Raw(text)) => {
                request.header(CONTENT_TYPE, "application/json").body(text)
            }
            None => request,
        };

        tracing::debug!(%method, %url, cookies = options.allow_cookies, "sending request");

        let response = request.send().await?;

        // Status and headers are read before the body is consumed, so the
        // text fallback in parse_body never loses them.
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        let parsed = parse_body(options.parse_response_as, bytes);

        if !status.is_success() {
            tracing::debug!(%status, %url, "server answered non-2xx");
            return Err(RequestError::Server {
                status,
                payload: error_payload(parsed),
            }
            .into());
        }

        if options.full_response {
            Ok(Reply::Full(FullResponse {
                body: parsed,
                headers,
                status,
            }))
        } else {
            Ok(Reply::Body(parsed))
        }
    }

    /// HTTP `GET`.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Reply> {
        self.query(Method::GET, path, None, options).await
    }

    /// HTTP `POST`.
    pub async fn post(
        &self,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        self.query(Method::POST, path, body, options).await
    }

    /// HTTP `PUT`.
    pub async fn put(
        &self,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        self.query(Method::PUT, path, body, options).await
    }

    /// HTTP `PATCH`.
    pub async fn patch(
        &self,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        self.query(Method::PATCH, path, body, options).await
    }

    /// HTTP `DELETE`.
    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Reply> {
        self.query(Method::DELETE, path, None, options).await
    }

    /// GET and deserialize JSON into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path, RequestOptions::default()).await?.json()
    }

    /// POST `body` as JSON and deserialize the JSON reply into `T`.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(path, Some(RequestBody::json(body)?), RequestOptions::default())
            .await?
            .json()
    }

    /// PUT `body` as JSON and deserialize the JSON reply into `T`.
    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put(path, Some(RequestBody::json(body)?), RequestOptions::default())
            .await?
            .json()
    }
}
