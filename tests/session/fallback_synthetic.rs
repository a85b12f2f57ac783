use crate::common::{fixture, session_for, setup_server};
use dashboard_analytics::widgets::{HeatmapData, Overview};
use dashboard_analytics::{DateRangeType, MetricSeries, OverviewPair, resilient};
use httpmock::Method::GET;

#[tokio::test]
async fn failing_resource_degrades_to_fallback() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/ranking");
        then.status(500).body("oops");
    });
    let session = session_for(&server);

    let placeholder = MetricSeries {
        data: vec![],
        updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
    };
    let ranking = resilient::call(session.ranking(DateRangeType::All), placeholder.clone()).await;
    mock.assert();
    assert_eq!(ranking, placeholder);
}

#[tokio::test]
async fn detailed_call_reports_degraded_state() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/heatmap");
        then.status(200).body("<html>not json</html>");
    });
    let session = session_for(&server);

    let empty = HeatmapData {
        points: vec![],
        clusters: vec![],
        bounds: None,
    };
    let resolved = resilient::call_detailed(session.heatmap(DateRangeType::All), empty).await;
    mock.assert();
    assert!(resolved.is_fallback());
    assert!(resolved.value().points.is_empty());
}

#[tokio::test]
async fn success_is_not_replaced() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/overview");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("overview"));
    });
    let session = session_for(&server);

    let resolved =
        resilient::call_detailed(session.overview(DateRangeType::All), Overview::default()).await;
    mock.assert();
    assert!(!resolved.is_fallback());
    assert_eq!(resolved.into_inner().total_reports, 1200);
}

#[tokio::test]
async fn comparison_failure_can_be_absorbed() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/overview");
        then.status(503);
    });
    let session = session_for(&server);

    let pair = resilient::call_or_else(session.overview_comparison(DateRangeType::Week), || {
        OverviewPair {
            current: Overview::default(),
            previous: None,
        }
    })
    .await;

    assert!(mock.calls() >= 1);
    assert_eq!(pair.current, Overview::default());
    assert!(pair.previous.is_none());
}
