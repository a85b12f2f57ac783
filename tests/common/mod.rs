#![allow(dead_code)]

use chrono::NaiveDate;
use dashboard_analytics::{AnalyticsClient, Clock, DashboardSession};
use httpmock::{Method::GET, Mock, MockServer};
use std::{fs, path::Path};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn client_for(server: &MockServer) -> AnalyticsClient {
    AnalyticsClient::builder()
        .base_url(Url::parse(&format!("{}/api", server.base_url())).unwrap())
        .build()
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Thursday 2024-02-15.
pub fn today() -> NaiveDate {
    date(2024, 2, 15)
}

pub fn session_for(server: &MockServer) -> DashboardSession {
    DashboardSession::builder(client_for(server))
        .clock(Clock::Fixed(today()))
        .build()
}

/// Serves `fixture` for `path` regardless of query string.
pub fn mock_json<'a>(server: &'a MockServer, path: &str, fixture_name: &str) -> Mock<'a> {
    let body = fixture(fixture_name);
    server.mock(|when, then| {
        when.method(GET).path(format!("/api/{path}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// Serves `body` for `path` only when both date bounds match.
pub fn mock_window<'a>(
    server: &'a MockServer,
    path: &str,
    start: &str,
    end: &str,
    body: &str,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/{path}"))
            .query_param("startDate", start)
            .query_param("endDate", end);
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

pub fn overview_body(total_reports: u64, pending: u64, resolved: u64, users: u64) -> String {
    format!(
        r#"{{"totalReports":{total_reports},"pendingReports":{pending},"resolvedReports":{resolved},"totalUsers":{users}}}"#
    )
}
