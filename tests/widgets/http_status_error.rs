use crate::common::{client_for, setup_server};
use dashboard_analytics::{AnalyticsError, widgets};
use httpmock::Method::GET;

#[tokio::test]
async fn non_2xx_maps_to_status_error() {
    let server = setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/ranking");
        then.status(503).body("maintenance");
    });

    let client = client_for(&server);
    let err = widgets::fetch_ranking(&client, None).await.unwrap_err();
    mock.assert();

    match err {
        AnalyticsError::Status { status, url } => {
            assert_eq!(status, 503);
            assert!(url.contains("/api/analytics/ranking"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_data_error() {
    let server = setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/overview");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalReports":"lots"}"#);
    });

    let client = client_for(&server);
    let err = widgets::fetch_overview(&client, None).await.unwrap_err();
    mock.assert();

    assert!(matches!(err, AnalyticsError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_maps_to_http_error() {
    let client = dashboard_analytics::AnalyticsClient::builder()
        .base_url(url::Url::parse("http://127.0.0.1:9/api/").unwrap())
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();

    let err = widgets::fetch_heatmap(&client, None).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::Http(_)), "got {err:?}");
}
