//! Public client surface + builder.
//! Defaults live in `constants`; request execution is in `get_json`.

mod constants;

use crate::core::{AnalyticsError, net};
use crate::query::{self, DateRangeParams};
use constants::{BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Thin wrapper that holds a configured HTTP client and the analytics service base URL.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl Default for AnalyticsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl AnalyticsClient {
    /// Create a new builder.
    pub fn builder() -> AnalyticsClientBuilder {
        AnalyticsClientBuilder::default()
    }

    /// The base every resource path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Overall per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves `path` plus the optional date filter against the base URL.
    pub(crate) fn endpoint(
        &self,
        path: &str,
        params: Option<&DateRangeParams>,
    ) -> Result<Url, AnalyticsError> {
        let query = query::build(params);
        Ok(self.base_url.join(&format!("{path}{query}"))?)
    }

    /// Issues a GET for `path` and decodes the JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&DateRangeParams>,
    ) -> Result<T, AnalyticsError> {
        let url = self.endpoint(path, params)?;
        tracing::debug!(%url, "analytics request");

        let resp = self.http.get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(AnalyticsError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = net::get_text(resp).await?;
        serde_json::from_str(&body)
            .map_err(|e| AnalyticsError::Data(format!("json parse error at {path}: {e}")))
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Debug, Default)]
pub struct AnalyticsClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl AnalyticsClientBuilder {
    /// Starts from the base URL in `ANALYTICS_SERVICE_URL`, if set and valid.
    pub fn from_env() -> Result<Self, AnalyticsError> {
        Self::from_base_url_var(std::env::var(BASE_URL_ENV).ok())
    }

    // Blank values count as unset.
    fn from_base_url_var(raw: Option<String>) -> Result<Self, AnalyticsError> {
        let mut b = Self::default();
        if let Some(raw) = raw
            && !raw.trim().is_empty()
        {
            b.base_url = Some(Url::parse(raw.trim())?);
        }
        Ok(b)
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the analytics service base (e.g., `https://analytics.example.org/api/`).
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: 10 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<AnalyticsClient, AnalyticsError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        // "localhost:5000/api" parses with scheme "localhost" and cannot be joined onto.
        if base_url.cannot_be_a_base() {
            return Err(AnalyticsError::InvalidBaseUrl(base_url.to_string()));
        }
        let base_url = with_trailing_slash(base_url);
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers)
            .timeout(timeout);

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(AnalyticsClient {
            http: httpb.build()?,
            base_url,
            timeout,
        })
    }
}

// `Url::join` replaces the last segment unless the base ends in '/'.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
