//! Behavioural tests for the notification relay lifecycle.
//!
//! Step functions are shared between scenarios and invoked from `rstest`
//! cases; async checks are plain helpers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, when};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use orders::domain::ports::{OrderCreatedNotifier, OrderNotifierError};
use orders::domain::{
    CustomerName, ItemName, NotificationRelay, Order, OrderCreatedEvent, OrderId, RelayConfig,
    RelayHandle, RelayState, ShutdownCoordinator, SubmitOutcome,
};
use orders::test_support::RecordingNotifier;

/// Notifier that never finishes, standing in for a hung downstream.
#[derive(Default)]
struct StalledNotifier {
    entered: Notify,
}

#[async_trait]
impl OrderCreatedNotifier for StalledNotifier {
    async fn notify(&self, _event: &OrderCreatedEvent) -> Result<(), OrderNotifierError> {
        self.entered.notify_one();
        std::future::pending::<()>().await;
        Ok(())
    }
}

struct RelayWorld {
    coordinator: ShutdownCoordinator,
    handle: RelayHandle,
    task: JoinHandle<RelayState>,
}

fn event(item: &str) -> OrderCreatedEvent {
    OrderCreatedEvent::new(Order::new(
        OrderId::random(),
        CustomerName::new("Grace").expect("valid name"),
        ItemName::new(item).expect("valid item"),
        Utc::now(),
    ))
}

#[fixture]
fn recorder() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::new())
}

#[given("a running relay with a small queue")]
fn a_running_relay(notifier: Arc<dyn OrderCreatedNotifier>, capacity: usize) -> RelayWorld {
    let coordinator = ShutdownCoordinator::new();
    let config = RelayConfig::default()
        .with_capacity(capacity)
        .with_submit_timeout(Duration::from_millis(20));
    let (relay, handle) = NotificationRelay::new(config, notifier);
    let task = relay.spawn(coordinator.signal());
    RelayWorld {
        coordinator,
        handle,
        task,
    }
}

/// Submit one event per item, returning each outcome.
async fn events_are_submitted(world: &RelayWorld, items: &[&str]) -> Vec<SubmitOutcome> {
    let mut outcomes = Vec::with_capacity(items.len());
    for item in items {
        outcomes.push(world.handle.submit(event(item)).await);
    }
    outcomes
}

#[when("shutdown is triggered")]
fn shutdown_is_triggered(world: &RelayWorld) {
    world.coordinator.trigger();
}

async fn the_relay_stops_within_bounded_time(world: RelayWorld) -> RelayHandle {
    let state = tokio::time::timeout(Duration::from_secs(1), world.task)
        .await
        .expect("relay stops within a second")
        .expect("relay task joins");
    assert_eq!(state, RelayState::Stopped);
    world.handle
}

async fn later_submissions_are_dropped(handle: RelayHandle) {
    assert!(handle.is_closed());
    assert_eq!(
        handle.submit(event("late")).await,
        SubmitOutcome::DroppedClosed
    );
}

#[rstest]
#[tokio::test]
async fn delivered_events_then_clean_stop(recorder: Arc<RecordingNotifier>) {
    let world = a_running_relay(recorder.clone(), 4);
    let outcomes = events_are_submitted(&world, &["lamp", "desk"]).await;
    assert!(outcomes.iter().all(|o| *o == SubmitOutcome::Enqueued));
    recorder.wait_for(2).await;

    shutdown_is_triggered(&world);
    let handle = the_relay_stops_within_bounded_time(world).await;
    later_submissions_are_dropped(handle).await;

    let items: Vec<String> = recorder
        .events()
        .iter()
        .map(|e| e.order().item().to_string())
        .collect();
    assert_eq!(items, ["lamp", "desk"]);
}

#[rstest]
#[tokio::test]
async fn shutdown_interrupts_a_hung_notifier() {
    let stalled = Arc::new(StalledNotifier::default());
    let world = a_running_relay(stalled.clone(), 2);
    events_are_submitted(&world, &["first"]).await;
    stalled.entered.notified().await;

    shutdown_is_triggered(&world);
    let handle = the_relay_stops_within_bounded_time(world).await;
    later_submissions_are_dropped(handle).await;
}

#[rstest]
#[tokio::test]
async fn saturated_queue_drops_without_blocking_callers() {
    let stalled = Arc::new(StalledNotifier::default());
    let world = a_running_relay(stalled.clone(), 1);
    events_are_submitted(&world, &["in-flight"]).await;
    stalled.entered.notified().await;

    let outcomes = events_are_submitted(&world, &["queued", "overflow"]).await;
    assert_eq!(
        outcomes,
        [SubmitOutcome::Enqueued, SubmitOutcome::DroppedFull]
    );

    shutdown_is_triggered(&world);
    the_relay_stops_within_bounded_time(world).await;
}

#[rstest]
#[tokio::test]
async fn failing_notifier_keeps_the_relay_running() {
    let failing = Arc::new(RecordingNotifier::failing());
    let world = a_running_relay(failing.clone(), 4);
    events_are_submitted(&world, &["one", "two", "three"]).await;
    failing.wait_for(3).await;
    assert!(!world.task.is_finished());

    shutdown_is_triggered(&world);
    the_relay_stops_within_bounded_time(world).await;
}
