//! Per-call request options.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// How the response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Decode the body as JSON (the default). Falls back to text when the
    /// body does not decode.
    #[default]
    Json,
    /// Return the body as text.
    Text,
    /// Return the raw body bytes.
    Bytes,
}

/// Options for a single call through the pipeline.
///
/// Constructed per call and never persisted. All fields have conventional
/// defaults; the chainable setters cover the common adjustments.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// API key sent as the `Authorization` header. Overrides the client's
    /// default key for this call. Passed through verbatim.
    pub api_key: Option<String>,
    /// Extra headers for this call.
    pub headers: HeaderMap,
    /// Response body interpretation. Defaults to [`ResponseKind::Json`].
    pub parse_response_as: ResponseKind,
    /// Whether ambient cookies may be sent and stored for this call.
    ///
    /// `true` (the default) uses the cookie-jar transport: cookies the
    /// server previously set for this host are replayed. `false` selects
    /// the jar-less transport, the equivalent of the browser's "omit"
    /// credential mode.
    pub allow_cookies: bool,
    /// When set, the caller receives the full
    /// [`FullResponse`](crate::FullResponse) (body, headers, status)
    /// instead of just the parsed body.
    pub full_response: bool,
    /// When the body is form-encoded, flatten nested object keys to dotted
    /// paths before encoding. Defaults to `true`.
    pub flatten_form: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            headers: HeaderMap::new(),
            parse_response_as: ResponseKind::Json,
            allow_cookies: true,
            full_response: false,
            flatten_form: true,
        }
    }
}

impl RequestOptions {
    /// Options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-call API key.
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Add one header. Invalid names or values are silently dropped; headers
    /// are caller-controlled strings, not wire input.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Set the response parsing mode.
    pub fn parse_response_as(mut self, kind: ResponseKind) -> Self {
        self.parse_response_as = kind;
        self
    }

    /// Set the credential mode. See [`RequestOptions::allow_cookies`].
    pub fn allow_cookies(mut self, allow: bool) -> Self {
        self.allow_cookies = allow;
        self
    }

    /// Request the full `{body, headers, status}` result shape.
    pub fn full_response(mut self, full: bool) -> Self {
        self.full_response = full;
        self
    }

    /// Control dotted-path flattening of form bodies.
    pub fn flatten_form(mut self, flatten: bool) -> Self {
        self.flatten_form = flatten;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_contract() {
        let options = RequestOptions::default();
        assert!(options.allow_cookies);
        assert!(!options.full_response);
        assert!(options.flatten_form);
        assert_eq!(options.parse_response_as, ResponseKind::Json);
        assert!(options.headers.is_empty());
    }

    #[test]
    fn header_setter_keeps_valid_entries() {
        let options = RequestOptions::new()
            .header("X-Custom", "yes")
            .header("bad header", "dropped");
        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.headers.get("x-custom").unwrap(), "yes");
    }
}
