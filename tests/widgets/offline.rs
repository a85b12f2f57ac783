use crate::common::{client_for, date, fixture, mock_json, setup_server};
use dashboard_analytics::DateRangeParams;
use dashboard_analytics::widgets::{self, ComplianceBand};
use httpmock::Method::GET;

#[tokio::test]
async fn ranking_decodes_into_metric_series() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/ranking", "ranking");
    let client = client_for(&server);

    let ranking = widgets::fetch_ranking(&client, None).await.unwrap();
    mock.assert();

    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking.data[0].agency_name, "Dinas Bina Marga");
    assert_eq!(ranking.data[2].sla_breached_count, 11);
    assert_eq!(ranking.top(2).len(), 2);
    assert_eq!(ranking.updated_at.to_rfc3339(), "2024-02-15T08:30:00+00:00");
}

#[tokio::test]
async fn heatmap_without_bounds_derives_them_from_points() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/heatmap", "heatmap");
    let client = client_for(&server);

    let heatmap = widgets::fetch_heatmap(&client, None).await.unwrap();
    mock.assert();

    assert_eq!(heatmap.points.len(), 3);
    assert_eq!(heatmap.points[1].kind, "Kebersihan");
    assert_eq!(heatmap.clusters[0].types["Infrastruktur"], 20);
    assert!(heatmap.bounds.is_none());

    let b = heatmap.effective_bounds().unwrap();
    assert_eq!(b.north, -6.1751);
    assert_eq!(b.south, -6.2297);
    assert_eq!(b.east, 106.8650);
    assert_eq!(b.west, 106.6894);
}

#[tokio::test]
async fn escalation_report_has_stats_and_trends() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/escalation", "escalation");
    let client = client_for(&server);

    let report = widgets::fetch_escalation(&client, None).await.unwrap();
    mock.assert();

    assert_eq!(report.stats.total_escalated, 24);
    assert_eq!(report.trends.len(), 2);
    assert_eq!(report.trends[1].period, "2024-02");
}

#[tokio::test]
async fn sla_compliance_rows_are_banded() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/sla-compliance", "sla_compliance");
    let client = client_for(&server);

    let sla = widgets::fetch_sla_compliance(&client, None).await.unwrap();
    mock.assert();

    let bands: Vec<_> = sla.data.iter().map(|r| r.band()).collect();
    assert_eq!(
        bands,
        vec![ComplianceBand::Good, ComplianceBand::Warning, ComplianceBand::Breach]
    );
    assert_eq!(sla.data[1].within_sla(), 42);
}

#[tokio::test]
async fn mttr_allows_missing_average() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/mttr-by-type", "mttr_by_type");
    let client = client_for(&server);

    let mttr = widgets::fetch_mttr_by_type(&client, None).await.unwrap();
    mock.assert();

    assert_eq!(mttr.data[0].avg_resolution_hours, Some(30.5));
    assert_eq!(mttr.data[1].avg_resolution_hours, None);
}

#[tokio::test]
async fn type_distribution_decodes_status_breakdown() {
    let server = setup_server();
    let mock = mock_json(&server, "analytics/report-type-distribution", "type_distribution");
    let client = client_for(&server);

    let dist = widgets::fetch_type_distribution(&client, None).await.unwrap();
    mock.assert();

    let row = &dist.data[0];
    assert_eq!(row.in_progress, 20);
    assert_eq!(row.total, 109);
}

#[tokio::test]
async fn overview_sends_date_filter_as_query() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/analytics/overview")
            .query_param("startDate", "2024-01-01")
            .query_param("endDate", "2024-01-07");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("overview"));
    });
    let client = client_for(&server);

    let params = DateRangeParams {
        start_date: Some(date(2024, 1, 1)),
        end_date: Some(date(2024, 1, 7)),
    };
    let overview = widgets::fetch_overview(&client, Some(&params)).await.unwrap();
    mock.assert();

    assert_eq!(overview.total_reports, 1200);
    assert_eq!(overview.total_users, 450);
}
