//! Falling through a chain of sources

use crate::prelude::*;
use geofix_core::{ErrorClass, FakeClock, FakeSource};
use geofix_engine::{ChainEntry, ThrowIfDisabledBehavior};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn falls_through_to_the_first_entry_that_produces() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    fake.add_provider("net", true);
    fake.add_provider("passive", true);
    let expected = sample("passive", &clock);
    fake.set_cached("passive", Some(expected.clone()));
    let manager = manager(&fake, &clock);

    // gps times out, net has no cache, passive satisfies the chain;
    // the trailing live entry must never register.
    let result = manager
        .chain()
        .add_live("gps", Some(Duration::from_millis(10)))
        .add_cached("net", None)
        .add_cached("passive", None)
        .add_live("net", None)
        .build()
        .execute()
        .await;

    assert_eq!(result.unwrap(), Some(expected));
    assert_eq!(fake.registration_count(), 1);
}

#[tokio::test]
async fn disabled_sources_fall_back_to_the_default() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", false);
    fake.add_provider("net", false);
    let manager = manager(&fake, &clock);
    let fallback = sample("manual", &clock);

    let result = manager
        .chain()
        .add_live("gps", None)
        .add_live("net", None)
        .set_default(Some(fallback.clone()))
        .build()
        .execute()
        .await;

    assert_eq!(result.unwrap(), Some(fallback));
    assert_eq!(fake.registration_count(), 0);
}

#[tokio::test]
async fn an_escalated_disabled_source_aborts_despite_the_default() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", false);
    fake.add_provider("net", true);
    fake.set_cached("net", Some(sample("net", &clock)));
    let manager = manager(&fake, &clock);

    let result = manager
        .chain()
        .push(ChainEntry::live("gps").behavior(ThrowIfDisabledBehavior::new()))
        .add_cached("net", None)
        .set_default(Some(sample("manual", &clock)))
        .build()
        .execute()
        .await;

    assert_eq!(result.unwrap_err().class(), ErrorClass::Fatal);
}
