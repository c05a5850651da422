//! Single requests through the manager facade

use crate::prelude::*;
use geofix_core::{ErrorClass, FakeClock, FakeSource, LocationError};
use std::time::Duration;

#[tokio::test]
async fn last_known_prefers_a_fresh_cache() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let expected = sample("gps", &clock);
    fake.set_cached("gps", Some(expected.clone()));
    let manager = manager(&fake, &clock);

    clock.advance(Duration::from_secs(30));

    let result = manager
        .last_known("gps", Some(Duration::from_secs(60)), &[])
        .await;
    assert_eq!(result.unwrap(), Some(expected));
}

#[tokio::test]
async fn a_stale_cache_fails_and_carries_the_sample() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let cached = sample("gps", &clock);
    fake.set_cached("gps", Some(cached.clone()));
    let manager = manager(&fake, &clock);

    clock.advance(Duration::from_secs(60));

    let err = manager
        .last_known("gps", Some(Duration::from_secs(60)), &[])
        .await
        .unwrap_err();
    match err {
        LocationError::StaleSample { sample: carried } => assert_eq!(carried, cached),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn request_location_resolves_on_the_first_update() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let task = tokio::spawn({
        let manager = manager.clone();
        async move { manager.request_location("gps", None, &[]).await }
    });

    until(|| !fake.live_registrations().is_empty()).await;
    let expected = sample("gps", &clock);
    fake.deliver_sample("gps", expected.clone());

    assert_eq!(task.await.unwrap().unwrap(), Some(expected));
    assert_eq!(fake.total_removals(), 1);
}

#[tokio::test(start_paused = true)]
async fn a_timed_out_request_reports_the_limit() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let err = manager
        .request_location("gps", Some(Duration::from_secs(5)), &[])
        .await
        .unwrap_err();

    assert_eq!(err.class(), ErrorClass::Timeout);
    assert!(fake.live_registrations().is_empty());
}

#[tokio::test]
async fn dropping_a_request_releases_the_registration() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let task = tokio::spawn({
        let manager = manager.clone();
        async move { manager.request_location("gps", None, &[]).await }
    });

    until(|| !fake.live_registrations().is_empty()).await;
    let token = fake.live_registrations()[0];
    task.abort();
    let _ = task.await;

    assert_eq!(fake.removal_count(token), 1);
    assert!(fake.live_registrations().is_empty());
}
