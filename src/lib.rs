//! dashboard-analytics: the data layer behind the analytics dashboard.
//!
//! Widgets never talk to the analytics service directly. They go through a
//! [`DashboardSession`], which:
//! - turns a [`DateRangeType`] plus offset into a calendar-aligned [`DateWindow`] ([`range`]),
//! - serializes that window into the `?startDate=..&endDate=..` filter ([`query`]),
//! - coalesces concurrent requests for the same period into one call and keeps the
//!   result until told to refresh ([`cache`]),
//! - fetches a current/previous pair for trend deltas ([`comparison`]).
//!
//! Call sites that prefer placeholder data over an error wrap their fetches with
//! [`resilient`].

pub mod cache;
pub mod comparison;
pub mod core;
pub mod query;
pub mod range;
pub mod resilient;
pub mod session;
pub mod widgets;

pub use cache::{CacheKey, CacheMode, FailurePolicy, FetchState, Flight, SingleFlightCache};
pub use comparison::{DualPeriodFetcher, OverviewPair, fetch_comparison, percent_change};
pub use crate::core::{AnalyticsClient, AnalyticsClientBuilder, AnalyticsError, MetricSeries};
pub use query::DateRangeParams;
pub use range::{Clock, DateRangeType, DateWindow, compute_range, compute_range_on};
pub use session::{DashboardSession, DashboardSessionBuilder, PollHandle, ResourcePolicy, WidgetQuery};
pub use widgets::Resource;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
