//! Typed access to the analytics service resources behind each dashboard widget.
//!
//! Every resource is a GET under `analytics/` accepting the optional
//! `startDate`/`endDate` filter. List-shaped resources decode into
//! [`MetricSeries`](crate::core::MetricSeries); the rest have their own shapes.

mod api;
mod model;

pub use api::{
    fetch_escalation, fetch_heatmap, fetch_mttr_by_type, fetch_overview, fetch_ranking,
    fetch_sla_compliance, fetch_type_distribution,
};
pub use model::{
    ComplianceBand, EscalationReport, EscalationStats, EscalationTrend, GeoBounds, HeatmapCluster,
    HeatmapData, HeatmapPoint, MttrByType, MttrResponse, Overview, OverviewTrend, RankingEntry,
    RankingResponse, SlaCompliance, SlaComplianceResponse, TypeDistribution,
    TypeDistributionResponse,
};

use std::fmt;

/// The analytics resources, one per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Ranking,
    Heatmap,
    Escalation,
    SlaCompliance,
    MttrByType,
    TypeDistribution,
    Overview,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Ranking,
        Resource::Heatmap,
        Resource::Escalation,
        Resource::SlaCompliance,
        Resource::MttrByType,
        Resource::TypeDistribution,
        Resource::Overview,
    ];

    /// Path relative to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Ranking => "analytics/ranking",
            Resource::Heatmap => "analytics/heatmap",
            Resource::Escalation => "analytics/escalation",
            Resource::SlaCompliance => "analytics/sla-compliance",
            Resource::MttrByType => "analytics/mttr-by-type",
            Resource::TypeDistribution => "analytics/report-type-distribution",
            Resource::Overview => "analytics/overview",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Ranking => "ranking",
            Resource::Heatmap => "heatmap",
            Resource::Escalation => "escalation",
            Resource::SlaCompliance => "sla_compliance",
            Resource::MttrByType => "mttr_by_type",
            Resource::TypeDistribution => "type_distribution",
            Resource::Overview => "overview",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
