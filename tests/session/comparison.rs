use crate::common::{mock_window, overview_body, session_for, setup_server};
use dashboard_analytics::widgets::Overview;
use dashboard_analytics::{DateRangeType, WidgetQuery};
use httpmock::Method::GET;
use std::time::{Duration, Instant};

#[tokio::test]
async fn month_comparison_fetches_current_and_previous_month() {
    let server = setup_server();
    let feb = mock_window(
        &server,
        "analytics/overview",
        "2024-02-01",
        "2024-02-29",
        &overview_body(120, 30, 80, 50),
    );
    let jan = mock_window(
        &server,
        "analytics/overview",
        "2024-01-01",
        "2024-01-31",
        &overview_body(100, 40, 60, 50),
    );
    let session = session_for(&server);

    let pair = session.overview_comparison(DateRangeType::Month).await.unwrap();
    feb.assert_calls(1);
    jan.assert_calls(1);

    assert_eq!(pair.current.total_reports, 120);
    assert_eq!(pair.previous.unwrap().total_reports, 100);

    let trend = Overview::trend(&pair).unwrap();
    assert_eq!(trend.total_reports, 20.0);
    assert_eq!(trend.pending_reports, -25.0);
    assert_eq!(trend.total_users, 0.0);
}

#[tokio::test]
async fn all_time_has_no_previous_period() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/analytics/overview");
        then.status(200)
            .header("content-type", "application/json")
            .body(overview_body(1200, 150, 900, 450));
    });
    let session = session_for(&server);

    let pair = session.overview_comparison(DateRangeType::All).await.unwrap();
    mock.assert_calls(1);

    assert_eq!(pair.current.total_reports, 1200);
    assert!(pair.previous.is_none());
    assert!(Overview::trend(&pair).is_none());
}

#[tokio::test]
async fn week_windows_are_monday_aligned() {
    let server = setup_server();
    let this_week = mock_window(
        &server,
        "analytics/overview",
        "2024-02-12",
        "2024-02-18",
        &overview_body(10, 1, 5, 3),
    );
    let last_week = mock_window(
        &server,
        "analytics/overview",
        "2024-02-05",
        "2024-02-11",
        &overview_body(0, 0, 0, 3),
    );
    let session = session_for(&server);

    let pair = session.overview_comparison(DateRangeType::Week).await.unwrap();
    this_week.assert_calls(1);
    last_week.assert_calls(1);

    let trend = Overview::trend(&pair).unwrap();
    assert_eq!(trend.total_reports, 100.0);
    assert_eq!(trend.total_users, 0.0);
}

#[tokio::test]
async fn already_cached_period_is_reused() {
    let server = setup_server();
    let this_year = mock_window(
        &server,
        "analytics/overview",
        "2024-01-01",
        "2024-12-31",
        &overview_body(5, 1, 2, 3),
    );
    let last_year = mock_window(
        &server,
        "analytics/overview",
        "2023-01-01",
        "2023-12-31",
        &overview_body(4, 1, 2, 3),
    );
    let session = session_for(&server);

    // Another widget already loaded last year.
    session
        .overview(WidgetQuery::new(DateRangeType::Year).offset(-1))
        .await
        .unwrap();
    last_year.assert_calls(1);

    session.overview_comparison(DateRangeType::Year).await.unwrap();
    this_year.assert_calls(1);
    last_year.assert_calls(1);
}

#[tokio::test]
async fn concurrent_comparisons_issue_one_call_per_period() {
    let server = setup_server();
    let today = mock_window(
        &server,
        "analytics/overview",
        "2024-02-15",
        "2024-02-15",
        &overview_body(7, 2, 4, 9),
    );
    let yesterday = mock_window(
        &server,
        "analytics/overview",
        "2024-02-14",
        "2024-02-14",
        &overview_body(6, 2, 3, 9),
    );
    let session = session_for(&server);

    let (a, b) = tokio::join!(
        session.overview_comparison(DateRangeType::Day),
        session.overview_comparison(DateRangeType::Day),
    );

    today.assert_calls(1);
    yesterday.assert_calls(1);
    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn both_periods_are_fetched_concurrently() {
    let server = setup_server();
    let periods = [("2024-02-01", "2024-02-29"), ("2024-01-01", "2024-01-31")];
    let mocks: Vec<_> = periods
        .into_iter()
        .map(|(start, end)| {
            let body = overview_body(10, 2, 5, 4);
            server.mock(|when, then| {
                when.method(GET)
                    .path("/api/analytics/overview")
                    .query_param("startDate", start)
                    .query_param("endDate", end);
                then.status(200)
                    .header("content-type", "application/json")
                    .delay(Duration::from_millis(400))
                    .body(body);
            })
        })
        .collect();
    let session = session_for(&server);

    let started = Instant::now();
    let pair = session.overview_comparison(DateRangeType::Month).await.unwrap();
    let elapsed = started.elapsed();

    for m in &mocks {
        m.assert_calls(1);
    }
    assert!(pair.previous.is_some());
    assert!(
        elapsed < Duration::from_millis(750),
        "periods were fetched one after the other: {elapsed:?}"
    );
}
