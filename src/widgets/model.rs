use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::comparison::OverviewPair;
use crate::core::MetricSeries;

/* ----- RANKING ----- */

/// One agency's position in the resolution ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: u32,
    pub agency_name: String,
    pub sla_breached_count: u64,
    pub avg_resolution_time_hours: f64,
    pub total_reports: u64,
    pub score: f64,
}

pub type RankingResponse = MetricSeries<RankingEntry>;

/* ----- HEATMAP ----- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCluster {
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
    /// Report count per report type within the cluster.
    #[serde(default)]
    pub types: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapData {
    pub points: Vec<HeatmapPoint>,
    pub clusters: Vec<HeatmapCluster>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<GeoBounds>,
}

impl HeatmapData {
    /// Bounds reported by the service, or the box around every point.
    pub fn effective_bounds(&self) -> Option<GeoBounds> {
        if self.bounds.is_some() {
            return self.bounds;
        }
        let mut pts = self.points.iter();
        let first = pts.next()?;
        let init = GeoBounds {
            north: first.latitude,
            south: first.latitude,
            east: first.longitude,
            west: first.longitude,
        };
        Some(pts.fold(init, |b, p| GeoBounds {
            north: b.north.max(p.latitude),
            south: b.south.min(p.latitude),
            east: b.east.max(p.longitude),
            west: b.west.min(p.longitude),
        }))
    }
}

/* ----- ESCALATION ----- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationStats {
    pub total_escalated: u64,
    pub total_rejected: u64,
    pub escalation_rate: f64,
    pub rejection_rate: f64,
    pub total_reports: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationTrend {
    pub period: String,
    pub escalated: u64,
    pub rejected: u64,
    pub resolved: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationReport {
    pub stats: EscalationStats,
    pub trends: Vec<EscalationTrend>,
    pub updated_at: DateTime<Utc>,
}

/* ----- SLA COMPLIANCE ----- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaCompliance {
    pub agency: String,
    pub total_assigned_reports: u64,
    pub sla_breached_count: u64,
    /// Percentage in `0..=100`.
    pub sla_compliance_rate: f64,
}

/// Coarse grading of an SLA compliance rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceBand {
    /// 80% and above.
    Good,
    /// 60% up to 80%.
    Warning,
    /// Below 60%.
    Breach,
}

impl SlaCompliance {
    pub fn band(&self) -> ComplianceBand {
        match self.sla_compliance_rate {
            r if r >= 80.0 => ComplianceBand::Good,
            r if r >= 60.0 => ComplianceBand::Warning,
            _ => ComplianceBand::Breach,
        }
    }

    /// Reports resolved within SLA.
    pub fn within_sla(&self) -> u64 {
        self.total_assigned_reports.saturating_sub(self.sla_breached_count)
    }
}

pub type SlaComplianceResponse = MetricSeries<SlaCompliance>;

/* ----- MTTR ----- */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MttrByType {
    pub report_type: String,
    /// `None` when nothing of this type has been resolved yet.
    pub avg_resolution_hours: Option<f64>,
    pub resolved_count: u64,
    pub total_count: u64,
}

pub type MttrResponse = MetricSeries<MttrByType>;

/* ----- TYPE DISTRIBUTION ----- */

/// Status breakdown for one report type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDistribution {
    pub report_type: String,
    pub submitted: u64,
    pub verified: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
    pub escalated: u64,
    pub total: u64,
}

pub type TypeDistributionResponse = MetricSeries<TypeDistribution>;

/* ----- OVERVIEW ----- */

/// Headline counters for the stats cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_reports: u64,
    pub pending_reports: u64,
    pub resolved_reports: u64,
    pub total_users: u64,
}

/// Percent change per headline counter between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewTrend {
    pub total_reports: f64,
    pub pending_reports: f64,
    pub resolved_reports: f64,
    pub total_users: f64,
}

impl Overview {
    /// Trend deltas for a comparison pair; `None` when there is no previous period.
    #[allow(clippy::cast_precision_loss)]
    pub fn trend(pair: &OverviewPair<Overview>) -> Option<OverviewTrend> {
        Some(OverviewTrend {
            total_reports: pair.change(|o| o.total_reports as f64)?,
            pending_reports: pair.change(|o| o.pending_reports as f64)?,
            resolved_reports: pair.change(|o| o.resolved_reports as f64)?,
            total_users: pair.change(|o| o.total_users as f64)?,
        })
    }
}
