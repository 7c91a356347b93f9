//! Transport-only client for the admin API. Reusable and stateless per call.

use std::time::Duration;

use url::Url;

use crate::errors::BuildError;

const DEFAULT_USER_AGENT: &str = concat!("dbaas-client", "@", env!("CARGO_PKG_VERSION"));

/// Builder for [`Client`].
#[derive(Debug, Default, Clone)]
pub struct ClientBuilder {
    origin: Option<String>,
    request_timeout: Option<Duration>,
    /// Optional user-agent segment appended to the default UA for app-level telemetry.
    user_agent_extra: Option<String>,
    api_key: Option<String>,
}

impl ClientBuilder {
    /// Set the base origin root-relative paths are resolved against,
    /// e.g. `https://portal.example.com`.
    ///
    /// Required: [`build`](Self::build) fails without it.
    pub fn origin<S: Into<String>>(&mut self, origin: S) -> &mut Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set HTTP requests timeout. Forwarded to the transport; the pipeline
    /// itself enforces none.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Append an extra user-agent segment after the default
    /// `dbaas-client@<version>`.
    ///
    /// Example: `.user_agent_extra("admin-portal/1.2.3")`
    pub fn user_agent_extra<S: Into<String>>(&mut self, extra: S) -> &mut Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Set a default API key, sent as the `Authorization` header on every
    /// request unless overridden per call. The key is passed through
    /// verbatim, never validated client-side.
    pub fn api_key<S: Into<String>>(&mut self, api_key: S) -> &mut Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Build [`Client`].
    pub fn build(&self) -> Result<Client, BuildError> {
        let raw = self.origin.as_deref().ok_or(BuildError::MissingOrigin)?;
        let origin = Url::parse(raw)?;
        if origin.host_str().is_none() {
            return Err(BuildError::OriginWithoutHost(raw.to_string()));
        }

        // Compose user agent with optional extra part.
        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let mut cookie_builder = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .cookie_store(true);
        let mut bare_builder = reqwest::Client::builder().user_agent(user_agent);

        if let Some(timeout) = self.request_timeout {
            cookie_builder = cookie_builder.timeout(timeout);
            bare_builder = bare_builder.timeout(timeout);
        }

        Ok(Client {
            origin,
            cookie_http: cookie_builder.build()?,
            bare_http: bare_builder.build()?,
            api_key: self.api_key.clone(),
        })
    }
}

/// HTTP client bound to one API origin.
///
/// Holds two reqwest clients: one with a cookie store (used when a call
/// allows ambient credentials) and one without (the "omit" mode, used when
/// `allow_cookies` is off). Selecting between them per call is what keeps
/// the pipeline itself stateless.
///
/// Cheap to clone; the underlying transports are shared.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) origin: Url,
    pub(crate) cookie_http: reqwest::Client,
    pub(crate) bare_http: reqwest::Client,
    pub(crate) api_key: Option<String>,
}

impl Client {
    /// Returns a builder to edit settings before creating [`Client`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client for `origin` with default settings.
    pub fn new<S: Into<String>>(origin: S) -> Result<Client, BuildError> {
        Self::builder().origin(origin).build()
    }

    /// The base origin this client resolves root-relative paths against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a request path: root-relative paths (`/a/b`) are joined onto
    /// the configured origin, anything else must already be an absolute URL.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url, url::ParseError> {
        if path.starts_with('/') {
            self.origin.join(path)
        } else {
            Url::parse(path)
        }
    }

    /// Pick the transport for the requested credential mode.
    pub(crate) fn transport(&self, allow_cookies: bool) -> &reqwest::Client {
        if allow_cookies {
            &self.cookie_http
        } else {
            &self.bare_http
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_valid_origin() {
        assert!(matches!(
            Client::builder().build(),
            Err(BuildError::MissingOrigin)
        ));
        assert!(matches!(
            Client::new("not a url"),
            Err(BuildError::Origin(_))
        ));
        assert!(matches!(
            Client::new("data:text/plain,x"),
            Err(BuildError::OriginWithoutHost(_))
        ));
        assert!(Client::new("https://portal.example.com").is_ok());
    }

    #[test]
    fn resolve_prefixes_root_relative_paths() {
        let client = Client::new("https://portal.example.com").unwrap();

        let resolved = client.resolve("/api/v1/databases?limit=5").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://portal.example.com/api/v1/databases?limit=5"
        );

        let absolute = client.resolve("https://elsewhere.example.com/x").unwrap();
        assert_eq!(absolute.host_str(), Some("elsewhere.example.com"));

        assert!(client.resolve("neither/url/nor/root-relative").is_err());
    }
}
