use crate::common::{client_for, mock_json, setup_server, today};
use dashboard_analytics::{Clock, DashboardSession, DateRangeType, Resource, ResourcePolicy};
use std::time::Duration;

#[tokio::test]
async fn polled_resource_is_refetched_until_stopped() {
    let server = setup_server();
    let ranking = mock_json(&server, "analytics/ranking", "ranking");
    let session = DashboardSession::builder(client_for(&server))
        .clock(Clock::Fixed(today()))
        .policy(
            Resource::Ranking,
            ResourcePolicy::default().poll_every(Duration::from_millis(50)),
        )
        .policy(Resource::TypeDistribution, ResourcePolicy::default().fetch_once())
        .build();

    session.ranking(DateRangeType::All).await.unwrap();
    ranking.assert_calls(1);

    let handles = session.start_polling(DateRangeType::All);
    assert_eq!(handles.len(), 1);
    assert_eq!(handles[0].resource(), Resource::Ranking);

    tokio::time::sleep(Duration::from_millis(350)).await;
    for h in handles {
        h.stop();
    }
    let polled = ranking.calls();
    assert!(polled >= 3, "expected periodic refetches, saw {polled}");

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(ranking.calls() <= polled + 1);
}

#[tokio::test]
async fn default_policies_poll_only_type_distribution() {
    let server = setup_server();
    let session = DashboardSession::new(client_for(&server));

    let handles = session.start_polling(DateRangeType::Month);
    let polled: Vec<_> = handles.iter().map(|h| h.resource()).collect();
    assert_eq!(polled, vec![Resource::TypeDistribution]);
    assert!(!handles[0].is_finished());
}
