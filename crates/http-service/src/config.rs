use std::fmt::Debug;

const DEFAULT_PATH: &str = "/interview/chat";

/// Builder for [`HttpServiceConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpServiceConfigBuilder {
    base_url: String,
    api_key: Option<String>,
    path: Option<String>,
}

impl HttpServiceConfigBuilder {
    /// Creates a builder with the given base URL, e.g.
    /// `https://diligence.example.com/api`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            path: None,
        }
    }

    /// Sets the API key sent as a bearer token.
    #[inline]
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets a custom endpoint path, relative to the base URL.
    #[inline]
    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpServiceConfig {
        let base_url = self.base_url.trim_end_matches('/').to_owned();
        let path = self.path.unwrap_or_else(|| DEFAULT_PATH.to_owned());
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        HttpServiceConfig {
            api_key: self.api_key.filter(|key| !key.is_empty()),
            endpoint: format!("{base_url}{path}"),
        }
    }
}

impl Debug for HttpServiceConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServiceConfigBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<deducted>"))
            .field("path", &self.path)
            .finish()
    }
}

/// Configuration for the HTTP interview service.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpServiceConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) endpoint: String,
}

impl HttpServiceConfig {
    /// Returns the full URL requests are posted to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Debug for HttpServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServiceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<deducted>"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
