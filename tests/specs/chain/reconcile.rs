//! Reconciling a finished chain into one outcome

use crate::prelude::*;
use geofix_core::{FakeClock, FakeSource};
use geofix_engine::{AcquireFuture, Behavior, BehaviorParams, ChainEntry};

/// Behavior that turns any outcome into a valid absence
struct Clear;

impl Behavior for Clear {
    fn apply<'a>(
        &'a self,
        upstream: AcquireFuture<'a>,
        _params: &'a BehaviorParams,
    ) -> AcquireFuture<'a> {
        Box::pin(async move {
            let _ = upstream.await;
            Ok(None)
        })
    }
}

#[tokio::test]
async fn an_empty_chain_resolves_immediately() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    let manager = manager(&fake, &clock);
    let fallback = sample("manual", &clock);

    let result = manager
        .chain()
        .set_default(Some(fallback.clone()))
        .build()
        .execute()
        .await;

    assert_eq!(result.unwrap(), Some(fallback));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn an_exhausted_chain_without_default_resolves_to_nothing() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let result = manager.chain().add_cached("gps", None).build().execute().await;

    assert_eq!(result.unwrap(), None);
}

#[tokio::test]
async fn an_entry_that_accepts_absence_ends_the_chain() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    fake.add_provider("net", true);
    fake.set_cached("net", Some(sample("net", &clock)));
    let manager = manager(&fake, &clock);
    let fallback = sample("manual", &clock);

    let result = manager
        .chain()
        .push(ChainEntry::cached("gps").behavior(Clear).accept_empty())
        .add_cached("net", None)
        .set_default(Some(fallback.clone()))
        .build()
        .execute()
        .await;

    // The chain ends at the first entry; the default still stands in.
    assert_eq!(result.unwrap(), Some(fallback));
}
