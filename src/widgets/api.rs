use super::Resource;
use super::model::{
    EscalationReport, HeatmapData, MttrResponse, Overview, RankingResponse, SlaComplianceResponse,
    TypeDistributionResponse,
};
use crate::core::{AnalyticsClient, AnalyticsError};
use crate::query::DateRangeParams;

/// `GET analytics/ranking`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_ranking(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<RankingResponse, AnalyticsError> {
    client.get_json(Resource::Ranking.path(), params).await
}

/// `GET analytics/heatmap`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_heatmap(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<HeatmapData, AnalyticsError> {
    client.get_json(Resource::Heatmap.path(), params).await
}

/// `GET analytics/escalation`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_escalation(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<EscalationReport, AnalyticsError> {
    client.get_json(Resource::Escalation.path(), params).await
}

/// `GET analytics/sla-compliance`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_sla_compliance(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<SlaComplianceResponse, AnalyticsError> {
    client.get_json(Resource::SlaCompliance.path(), params).await
}

/// `GET analytics/mttr-by-type`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_mttr_by_type(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<MttrResponse, AnalyticsError> {
    client.get_json(Resource::MttrByType.path(), params).await
}

/// `GET analytics/report-type-distribution`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_type_distribution(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<TypeDistributionResponse, AnalyticsError> {
    client.get_json(Resource::TypeDistribution.path(), params).await
}

/// `GET analytics/overview`
#[tracing::instrument(skip(client), err)]
pub async fn fetch_overview(
    client: &AnalyticsClient,
    params: Option<&DateRangeParams>,
) -> Result<Overview, AnalyticsError> {
    client.get_json(Resource::Overview.path(), params).await
}
