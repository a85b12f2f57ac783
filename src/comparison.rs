//! Current-vs-previous period fetching for trend deltas.

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::cache::{CacheKey, CacheMode, Flight, SingleFlightCache};
use crate::range::{Clock, DateRangeType, DateWindow, compute_range_on};

/// A metric for the selected period and, when comparable, the period before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPair<T> {
    pub current: T,
    /// `None` for [`DateRangeType::All`], or when the previous period falls outside the calendar.
    pub previous: Option<T>,
}

impl<T> OverviewPair<T> {
    /// Percent change of one metric between the two periods.
    pub fn change<F>(&self, metric: F) -> Option<f64>
    where
        F: Fn(&T) -> f64,
    {
        self.previous
            .as_ref()
            .map(|prev| percent_change(metric(&self.current), metric(prev)))
    }

    pub fn map<U, F>(self, f: F) -> OverviewPair<U>
    where
        F: Fn(T) -> U,
    {
        OverviewPair {
            current: f(self.current),
            previous: self.previous.map(f),
        }
    }
}

/// Percent change from `previous` to `current`.
///
/// A zero baseline reports `100.0` for any growth and `0.0` otherwise.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

/// Fetches the pair for `range_type` at `current_offset` / `previous_offset` through `cache`.
///
/// See [`DualPeriodFetcher`] for the guarantees.
pub async fn fetch_comparison<T, E, F, Fut>(
    cache: &SingleFlightCache<T, E>,
    range_type: DateRangeType,
    current_offset: i32,
    previous_offset: i32,
    fetch_fn: F,
) -> Result<OverviewPair<T>, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + fmt::Display + 'static,
    F: Fn(Option<DateWindow>) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    DualPeriodFetcher::new(cache)
        .offsets(current_offset, previous_offset)
        .fetch(range_type, fetch_fn)
        .await
}

/// Orchestrates a "current vs previous" pair of fetches.
///
/// Both windows are computed from one reading of the clock. Each window's
/// fetch goes through the [`SingleFlightCache`] under its [`CacheKey`], so a
/// window already cached (or in flight) is reused. Both flights are registered
/// before either is awaited and then awaited together, so latency is that of
/// the slower one.
pub struct DualPeriodFetcher<'a, T, E> {
    cache: &'a SingleFlightCache<T, E>,
    clock: Clock,
    current_offset: i32,
    previous_offset: i32,
    mode: CacheMode,
}

impl<'a, T, E> DualPeriodFetcher<'a, T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + fmt::Display + 'static,
{
    /// Offsets default to `0` (current) and `-1` (previous).
    pub fn new(cache: &'a SingleFlightCache<T, E>) -> Self {
        Self {
            cache,
            clock: Clock::System,
            current_offset: 0,
            previous_offset: -1,
            mode: CacheMode::Use,
        }
    }

    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn offsets(mut self, current: i32, previous: i32) -> Self {
        self.current_offset = current;
        self.previous_offset = previous;
        self
    }

    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    pub async fn fetch<F, Fut>(self, range_type: DateRangeType, fetch_fn: F) -> Result<OverviewPair<T>, E>
    where
        F: Fn(Option<DateWindow>) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let today = self.clock.today();

        let current = self.flight(
            compute_range_on(today, range_type, self.current_offset),
            &fetch_fn,
        );
        // A previous period outside the calendar has nothing to compare against.
        let previous = range_type
            .is_comparable()
            .then(|| compute_range_on(today, range_type, self.previous_offset))
            .flatten()
            .map(|window| self.flight(Some(window), &fetch_fn));
        if previous.is_none() && range_type.is_comparable() {
            tracing::debug!(%range_type, offset = self.previous_offset, "previous period out of range");
        }

        match previous {
            None => Ok(OverviewPair {
                current: current.await?,
                previous: None,
            }),
            Some(previous) => {
                let (current, previous) = futures::try_join!(current, previous)?;
                Ok(OverviewPair {
                    current,
                    previous: Some(previous),
                })
            }
        }
    }

    fn flight<F, Fut>(&self, window: Option<DateWindow>, fetch_fn: &F) -> Flight<T, E>
    where
        F: Fn(Option<DateWindow>) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let key = CacheKey::for_window(window.as_ref());
        self.cache.get_with(&key, self.mode, || fetch_fn(window))
    }
}
