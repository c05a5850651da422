// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;

fn sample(clock: &FakeClock) -> LocationSample {
    LocationSample::new("gps", Position::new(59.93, 30.33), clock)
}

#[test]
fn age_tracks_the_clock() {
    let clock = FakeClock::new();
    let sample = sample(&clock);

    assert_eq!(sample.age(&clock), Duration::ZERO);

    clock.advance(Duration::from_secs(90));
    assert_eq!(sample.age(&clock), Duration::from_secs(90));
}

#[test]
fn fresh_while_age_strictly_below_max() {
    let clock = FakeClock::new();
    let sample = sample(&clock);
    let max_age = Duration::from_secs(60);

    clock.advance(Duration::from_secs(59));
    assert!(sample.is_fresh(max_age, &clock));
}

#[test]
fn age_equal_to_max_is_stale() {
    let clock = FakeClock::new();
    let sample = sample(&clock);
    let max_age = Duration::from_secs(60);

    clock.advance(max_age);
    assert!(!sample.is_fresh(max_age, &clock));

    clock.advance(Duration::from_secs(1));
    assert!(!sample.is_fresh(max_age, &clock));
}

#[test]
fn provider_id_display_and_from() {
    let id = ProviderId::from("network");
    assert_eq!(id.to_string(), "network");
    assert_eq!(id, ProviderId::from("network".to_string()));
}

#[test]
fn position_accuracy_is_optional() {
    let bare = Position::new(0.0, 0.0);
    assert!(bare.accuracy_m.is_none());

    let accurate = bare.with_accuracy(12.5);
    assert_eq!(accurate.accuracy_m, Some(12.5));
}
