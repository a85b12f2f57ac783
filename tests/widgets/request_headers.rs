use crate::common::{client_for, fixture, setup_server};
use dashboard_analytics::widgets;
use httpmock::Method::GET;

#[tokio::test]
async fn requests_declare_json_and_identify_the_client() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/analytics/overview")
            .header("content-type", "application/json")
            .header(
                "user-agent",
                concat!("dashboard-analytics/", env!("CARGO_PKG_VERSION")),
            );
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("overview"));
    });

    let client = client_for(&server);
    widgets::fetch_overview(&client, None).await.unwrap();
    mock.assert_calls(1);
}

#[tokio::test]
async fn user_agent_can_be_overridden() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/analytics/overview")
            .header("user-agent", "ops-console/2");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("overview"));
    });

    let client = dashboard_analytics::AnalyticsClient::builder()
        .base_url(url::Url::parse(&format!("{}/api", server.base_url())).unwrap())
        .user_agent("ops-console/2")
        .build()
        .unwrap();
    widgets::fetch_overview(&client, None).await.unwrap();
    mock.assert_calls(1);
}
