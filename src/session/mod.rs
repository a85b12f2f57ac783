//! The per-application data context shared by every dashboard widget.
//!
//! A [`DashboardSession`] owns the HTTP client and one [`SingleFlightCache`] per
//! resource. Widgets ask the session for data; identical requests issued by any
//! number of widgets collapse into one network call per period, and results are
//! served from memory until the session is told to refresh. Create one session per
//! application (or per test); clones share the same caches.

mod policy;
mod poll;

pub use policy::{ResourcePolicy, WidgetQuery};
pub use poll::PollHandle;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use crate::cache::{CacheKey, CacheMode, Flight, SingleFlightCache};
use crate::comparison::{DualPeriodFetcher, OverviewPair};
use crate::core::{AnalyticsClient, AnalyticsError};
use crate::query::DateRangeParams;
use crate::range::{Clock, DateRangeType, DateWindow, compute_range_on};
use crate::widgets::{
    self, EscalationReport, HeatmapData, MttrResponse, Overview, RankingResponse, Resource,
    SlaComplianceResponse, TypeDistributionResponse,
};

type Cache<T> = SingleFlightCache<T, AnalyticsError>;

struct Caches {
    ranking: Cache<RankingResponse>,
    heatmap: Cache<HeatmapData>,
    escalation: Cache<EscalationReport>,
    sla_compliance: Cache<SlaComplianceResponse>,
    mttr_by_type: Cache<MttrResponse>,
    type_distribution: Cache<TypeDistributionResponse>,
    overview: Cache<Overview>,
}

struct SessionInner {
    client: AnalyticsClient,
    clock: Clock,
    policies: BTreeMap<Resource, ResourcePolicy>,
    caches: Caches,
}

/// Shared, cached access to every analytics resource.
///
/// # Example
///
/// ```no_run
/// # use dashboard_analytics::{AnalyticsClient, DashboardSession, DateRangeType, resilient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let session = DashboardSession::new(AnalyticsClient::default());
///
/// let pair = session.overview_comparison(DateRangeType::Week).await?;
/// println!("reports this week: {}", pair.current.total_reports);
///
/// // Degrade to an empty heatmap rather than failing the view.
/// let heatmap = resilient::call_or_else(session.heatmap(DateRangeType::All), || {
///     dashboard_analytics::widgets::HeatmapData { points: vec![], clusters: vec![], bounds: None }
/// })
/// .await;
/// println!("{} heatmap points", heatmap.points.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DashboardSession {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardSession")
            .field("base_url", &self.inner.client.base_url().as_str())
            .field("clock", &self.inner.clock)
            .finish_non_exhaustive()
    }
}

impl DashboardSession {
    /// A session with the system clock and default policies.
    pub fn new(client: AnalyticsClient) -> Self {
        Self::builder(client).build()
    }

    pub fn builder(client: AnalyticsClient) -> DashboardSessionBuilder {
        DashboardSessionBuilder {
            client,
            clock: Clock::System,
            policies: Resource::ALL
                .into_iter()
                .map(|r| (r, ResourcePolicy::default_for(r)))
                .collect(),
        }
    }

    pub fn client(&self) -> &AnalyticsClient {
        &self.inner.client
    }

    pub fn clock(&self) -> Clock {
        self.inner.clock
    }

    pub fn policy(&self, resource: Resource) -> ResourcePolicy {
        self.inner
            .policies
            .get(&resource)
            .copied()
            .unwrap_or_else(|| ResourcePolicy::default_for(resource))
    }

    /// The window and cache key a query resolves to today.
    pub fn resolve(&self, query: impl Into<WidgetQuery>) -> (Option<DateWindow>, CacheKey) {
        let q = query.into();
        let window = compute_range_on(self.inner.clock.today(), q.range_type, q.offset);
        let key = CacheKey::for_window(window.as_ref());
        (window, key)
    }

    /* -------- per-resource fetches -------- */

    #[tracing::instrument(skip(self, query))]
    pub fn ranking(&self, query: impl Into<WidgetQuery>) -> Flight<RankingResponse, AnalyticsError> {
        self.flight(&self.inner.caches.ranking, query.into(), |client, params| async move {
            widgets::fetch_ranking(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn heatmap(&self, query: impl Into<WidgetQuery>) -> Flight<HeatmapData, AnalyticsError> {
        self.flight(&self.inner.caches.heatmap, query.into(), |client, params| async move {
            widgets::fetch_heatmap(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn escalation(&self, query: impl Into<WidgetQuery>) -> Flight<EscalationReport, AnalyticsError> {
        self.flight(&self.inner.caches.escalation, query.into(), |client, params| async move {
            widgets::fetch_escalation(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn sla_compliance(
        &self,
        query: impl Into<WidgetQuery>,
    ) -> Flight<SlaComplianceResponse, AnalyticsError> {
        self.flight(&self.inner.caches.sla_compliance, query.into(), |client, params| async move {
            widgets::fetch_sla_compliance(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn mttr_by_type(&self, query: impl Into<WidgetQuery>) -> Flight<MttrResponse, AnalyticsError> {
        self.flight(&self.inner.caches.mttr_by_type, query.into(), |client, params| async move {
            widgets::fetch_mttr_by_type(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn type_distribution(
        &self,
        query: impl Into<WidgetQuery>,
    ) -> Flight<TypeDistributionResponse, AnalyticsError> {
        self.flight(&self.inner.caches.type_distribution, query.into(), |client, params| async move {
            widgets::fetch_type_distribution(&client, params.as_ref()).await
        })
    }

    #[tracing::instrument(skip(self, query))]
    pub fn overview(&self, query: impl Into<WidgetQuery>) -> Flight<Overview, AnalyticsError> {
        self.flight(&self.inner.caches.overview, query.into(), |client, params| async move {
            widgets::fetch_overview(&client, params.as_ref()).await
        })
    }

    /// Overview counters for the current period and, unless `range_type` is
    /// [`DateRangeType::All`], the previous one.
    #[tracing::instrument(skip(self), err)]
    pub async fn overview_comparison(
        &self,
        range_type: DateRangeType,
    ) -> Result<OverviewPair<Overview>, AnalyticsError> {
        self.overview_comparison_with(range_type, CacheMode::Use).await
    }

    pub async fn overview_comparison_with(
        &self,
        range_type: DateRangeType,
        mode: CacheMode,
    ) -> Result<OverviewPair<Overview>, AnalyticsError> {
        let client = self.inner.client.clone();
        DualPeriodFetcher::new(&self.inner.caches.overview)
            .clock(self.inner.clock)
            .cache_mode(mode)
            .fetch(range_type, move |window| {
                let client = client.clone();
                async move {
                    let params = window.map(DateRangeParams::from);
                    widgets::fetch_overview(&client, params.as_ref()).await
                }
            })
            .await
    }

    /* -------- invalidation / refresh -------- */

    /// Drops the cached entry for one resource and period.
    pub fn invalidate(&self, resource: Resource, query: impl Into<WidgetQuery>) -> bool {
        let (_, key) = self.resolve(query);
        let c = &self.inner.caches;
        match resource {
            Resource::Ranking => c.ranking.invalidate(key.as_str()),
            Resource::Heatmap => c.heatmap.invalidate(key.as_str()),
            Resource::Escalation => c.escalation.invalidate(key.as_str()),
            Resource::SlaCompliance => c.sla_compliance.invalidate(key.as_str()),
            Resource::MttrByType => c.mttr_by_type.invalidate(key.as_str()),
            Resource::TypeDistribution => c.type_distribution.invalidate(key.as_str()),
            Resource::Overview => c.overview.invalidate(key.as_str()),
        }
    }

    /// Drops every cached period of one resource.
    pub fn invalidate_resource(&self, resource: Resource) {
        let c = &self.inner.caches;
        match resource {
            Resource::Ranking => c.ranking.invalidate_all(),
            Resource::Heatmap => c.heatmap.invalidate_all(),
            Resource::Escalation => c.escalation.invalidate_all(),
            Resource::SlaCompliance => c.sla_compliance.invalidate_all(),
            Resource::MttrByType => c.mttr_by_type.invalidate_all(),
            Resource::TypeDistribution => c.type_distribution.invalidate_all(),
            Resource::Overview => c.overview.invalidate_all(),
        }
    }

    /// Drops everything; the next request for anything hits the network.
    pub fn invalidate_all(&self) {
        for r in Resource::ALL {
            self.invalidate_resource(r);
        }
        tracing::info!("dashboard caches cleared");
    }

    pub fn is_cached(&self, resource: Resource, query: impl Into<WidgetQuery>) -> bool {
        let (_, key) = self.resolve(query);
        let c = &self.inner.caches;
        match resource {
            Resource::Ranking => c.ranking.contains(key.as_str()),
            Resource::Heatmap => c.heatmap.contains(key.as_str()),
            Resource::Escalation => c.escalation.contains(key.as_str()),
            Resource::SlaCompliance => c.sla_compliance.contains(key.as_str()),
            Resource::MttrByType => c.mttr_by_type.contains(key.as_str()),
            Resource::TypeDistribution => c.type_distribution.contains(key.as_str()),
            Resource::Overview => c.overview.contains(key.as_str()),
        }
    }

    /// Refetches one resource and period, replacing its cached entry.
    pub async fn refresh(
        &self,
        resource: Resource,
        query: impl Into<WidgetQuery>,
    ) -> Result<(), AnalyticsError> {
        let q = query.into().cache_mode(CacheMode::Refresh);
        match resource {
            Resource::Ranking => self.ranking(q).await.map(drop),
            Resource::Heatmap => self.heatmap(q).await.map(drop),
            Resource::Escalation => self.escalation(q).await.map(drop),
            Resource::SlaCompliance => self.sla_compliance(q).await.map(drop),
            Resource::MttrByType => self.mttr_by_type(q).await.map(drop),
            Resource::TypeDistribution => self.type_distribution(q).await.map(drop),
            Resource::Overview => self.overview(q).await.map(drop),
        }
    }

    /// Starts a poller for every resource whose policy has a poll interval.
    ///
    /// Must be called from within a tokio runtime. Pollers stop when their handles drop.
    pub fn start_polling(&self, range_type: DateRangeType) -> Vec<PollHandle> {
        Resource::ALL
            .into_iter()
            .filter_map(|r| {
                let every = self.policy(r).poll_interval?;
                if every.is_zero() {
                    tracing::warn!(resource = %r, "ignoring zero poll interval");
                    return None;
                }
                tracing::debug!(resource = %r, ?every, "starting poller");
                Some(poll::spawn(self.clone(), r, WidgetQuery::new(range_type), every))
            })
            .collect()
    }

    fn flight<T, F, Fut>(&self, cache: &Cache<T>, query: WidgetQuery, fetch: F) -> Flight<T, AnalyticsError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(AnalyticsClient, Option<DateRangeParams>) -> Fut,
        Fut: Future<Output = Result<T, AnalyticsError>> + Send + 'static,
    {
        let (window, key) = self.resolve(query);
        let client = self.inner.client.clone();
        let params = window.map(DateRangeParams::from);
        cache.get_with(&key, query.cache_mode, move || fetch(client, params))
    }
}

/* ----------------------- Builder ----------------------- */

pub struct DashboardSessionBuilder {
    client: AnalyticsClient,
    clock: Clock,
    policies: BTreeMap<Resource, ResourcePolicy>,
}

impl DashboardSessionBuilder {
    /// Pin "today" (tests, reproducible reports). Default: the system clock.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Override one resource's caching and refresh behavior.
    pub fn policy(mut self, resource: Resource, policy: ResourcePolicy) -> Self {
        self.policies.insert(resource, policy);
        self
    }

    pub fn build(self) -> DashboardSession {
        let failure = |r: Resource| {
            self.policies
                .get(&r)
                .map_or_else(|| ResourcePolicy::default_for(r).failure, |p| p.failure)
        };
        let caches = Caches {
            ranking: Cache::with_failure_policy("ranking", failure(Resource::Ranking)),
            heatmap: Cache::with_failure_policy("heatmap", failure(Resource::Heatmap)),
            escalation: Cache::with_failure_policy("escalation", failure(Resource::Escalation)),
            sla_compliance: Cache::with_failure_policy(
                "sla_compliance",
                failure(Resource::SlaCompliance),
            ),
            mttr_by_type: Cache::with_failure_policy("mttr_by_type", failure(Resource::MttrByType)),
            type_distribution: Cache::with_failure_policy(
                "type_distribution",
                failure(Resource::TypeDistribution),
            ),
            overview: Cache::with_failure_policy("overview", failure(Resource::Overview)),
        };

        DashboardSession {
            inner: Arc::new(SessionInner {
                client: self.client,
                clock: self.clock,
                policies: self.policies,
                caches,
            }),
        }
    }
}
