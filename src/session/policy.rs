use std::time::Duration;

use crate::cache::{CacheMode, FailurePolicy};
use crate::range::DateRangeType;
use crate::widgets::Resource;

/// Per-resource caching and refresh behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourcePolicy {
    /// Whether a failed fetch stays cached.
    pub failure: FailurePolicy,
    /// Refetch period for [`DashboardSession::start_polling`](super::DashboardSession::start_polling).
    /// `None` fetches once and serves the cached value until invalidated.
    pub poll_interval: Option<Duration>,
}

impl ResourcePolicy {
    /// The type distribution widget refreshes every minute; everything else fetches
    /// once. Every resource retries failed fetches on next access.
    pub fn default_for(resource: Resource) -> Self {
        match resource {
            Resource::TypeDistribution => Self {
                failure: FailurePolicy::EvictOnFailure,
                poll_interval: Some(Duration::from_secs(60)),
            },
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn failure(mut self, failure: FailurePolicy) -> Self {
        self.failure = failure;
        self
    }

    #[must_use]
    pub fn poll_every(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    #[must_use]
    pub fn fetch_once(mut self) -> Self {
        self.poll_interval = None;
        self
    }
}

/// Which period of a resource to load, and how to treat the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetQuery {
    pub range_type: DateRangeType,
    /// Periods relative to the current one; `-1` is the previous period.
    pub offset: i32,
    pub cache_mode: CacheMode,
}

impl WidgetQuery {
    pub fn new(range_type: DateRangeType) -> Self {
        Self {
            range_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }
}

impl From<DateRangeType> for WidgetQuery {
    fn from(range_type: DateRangeType) -> Self {
        WidgetQuery::new(range_type)
    }
}
