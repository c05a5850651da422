//! Permission and enable gates resolved through manager ingress

use crate::prelude::*;
use geofix_core::{ErrorClass, FakeClock, FakePermissionHost, FakeResolutionHost, FakeSource,
    PermissionGrant, ResolutionOutcome};
use geofix_engine::{ChainEntry, EnableSourceBehavior, PermissionBehavior};
use std::sync::Arc;

#[tokio::test]
async fn a_granted_prompt_lets_the_request_proceed() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let host = FakePermissionHost::new();
    host.set_denied(&["fine"]);
    let gate = PermissionBehavior::new(Arc::new(host.clone()), manager.permission_relay());

    let task = tokio::spawn({
        let manager = manager.clone();
        let behaviors: Vec<Arc<dyn geofix_engine::Behavior>> = vec![Arc::new(gate)];
        async move { manager.request_location("gps", None, &behaviors).await }
    });

    until(|| !host.requests().is_empty()).await;
    manager.on_permission_result(vec!["fine".into()], vec![PermissionGrant::Granted]);

    until(|| !fake.live_registrations().is_empty()).await;
    let expected = sample("gps", &clock);
    fake.deliver_sample("gps", expected.clone());

    assert_eq!(task.await.unwrap().unwrap(), Some(expected));
}

#[tokio::test]
async fn a_denied_prompt_aborts_the_chain_despite_the_default() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", true);
    let manager = manager(&fake, &clock);

    let host = FakePermissionHost::new();
    host.set_denied(&["fine"]);
    let gate = PermissionBehavior::new(Arc::new(host.clone()), manager.permission_relay());

    let chain = manager
        .chain()
        .push(ChainEntry::live("gps").behavior(gate))
        .set_default(Some(sample("manual", &clock)))
        .build();
    let task = tokio::spawn(chain.execute());

    until(|| !host.requests().is_empty()).await;
    manager.on_permission_result(vec!["fine".into()], vec![PermissionGrant::Denied]);

    let err = task.await.unwrap().unwrap_err();
    assert_eq!(err.class(), ErrorClass::PermissionDenied);
    assert_eq!(fake.registration_count(), 0);
}

#[tokio::test]
async fn enabling_the_source_in_settings_unblocks_the_chain() {
    let clock = FakeClock::new();
    let fake = FakeSource::new();
    fake.add_provider("gps", false);
    let manager = manager(&fake, &clock);

    let resolution = FakeResolutionHost::new();
    let gate = EnableSourceBehavior::with_settings(
        manager.source(),
        Arc::new(resolution.clone()),
        manager.resolution_relay(),
    );

    let chain = manager
        .chain()
        .push(ChainEntry::live("gps").behavior(gate))
        .build();
    let task = tokio::spawn(chain.execute());

    until(|| resolution.settings_launches() == 1).await;
    fake.set_enabled("gps", true);
    manager.on_resolution_result(ResolutionOutcome::new(0));

    until(|| !fake.live_registrations().is_empty()).await;
    let expected = sample("gps", &clock);
    fake.deliver_sample("gps", expected.clone());

    assert_eq!(task.await.unwrap().unwrap(), Some(expected));
}
