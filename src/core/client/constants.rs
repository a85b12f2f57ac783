//! Centralized constants for default endpoints and client settings.

use std::time::Duration;

/// Identifies this client to the analytics service.
pub(crate) const USER_AGENT: &str = concat!("dashboard-analytics/", env!("CARGO_PKG_VERSION"));

/// Analytics service base used when nothing else is configured.
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/";

/// Environment variable consulted by `AnalyticsClientBuilder::from_env`.
pub(crate) const BASE_URL_ENV: &str = "ANALYTICS_SERVICE_URL";

/// Overall request timeout applied unless overridden.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
