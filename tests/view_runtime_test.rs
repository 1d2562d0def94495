//! View runtime scenarios with fetches completed by the test.
//!
//! The runtime and the test share a current-thread runtime, so once a reply or
//! a state change is observed, every completion handed over before it has
//! already been reconciled.
//!
//! Run with: cargo test --test view_runtime_test

mod common;

use plant_monitor::error::FetchError;
use plant_monitor::plant_api::WindowSelector;

use common::{reading, scripted_view, startup_readings, ScriptedView};

/// Start a view and complete the startup fetch with the two-record payload.
async fn started_view() -> ScriptedView {
    let mut scripted = scripted_view();
    let initial = scripted.next_fetch().await;
    initial.succeed(startup_readings());
    scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    scripted
}

#[tokio::test(flavor = "current_thread")]
async fn startup_fetches_full_history() {
    let mut scripted = scripted_view();

    let initial = scripted.next_fetch().await;
    assert_eq!(initial.address.as_str(), "http://plants.test/plantdata");
    assert!(scripted.view.is_loading());
    assert_eq!(scripted.view.selector(), WindowSelector::All);

    initial.succeed(startup_readings());
    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();

    assert_eq!(state.selector, WindowSelector::All);
    assert_eq!(*state.readings, startup_readings());
    assert!(state.notice.is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn view_is_loading_before_runtime_first_runs() {
    let mut scripted = scripted_view();

    // The spawned runtime has not been polled yet.
    assert!(scripted.view.is_loading());
    assert!(scripted.view.readings().is_empty());
    assert!(scripted.fetches.try_recv().is_err());

    let initial = scripted.next_fetch().await;
    assert_eq!(initial.address.as_str(), "http://plants.test/plantdata");
}

#[tokio::test(flavor = "current_thread")]
async fn week_window_with_no_data_empties_the_chart() {
    let mut scripted = started_view().await;

    let state = scripted.view.select_window(WindowSelector::Last7Days).await.unwrap();
    assert!(state.is_loading);
    // Previous readings stay visible while loading.
    assert_eq!(*state.readings, startup_readings());

    let fetch = scripted.next_fetch().await;
    assert_eq!(fetch.address.as_str(), "http://plants.test/plantdata/week");
    fetch.succeed(Vec::new());

    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(state.selector, WindowSelector::Last7Days);
    assert!(state.readings.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn unreachable_service_keeps_previous_readings() {
    let mut scripted = started_view().await;

    scripted.view.select_window(WindowSelector::Last30Days).await.unwrap();
    let fetch = scripted.next_fetch().await;
    assert_eq!(fetch.address.as_str(), "http://plants.test/plantdata/month");
    fetch.fail(FetchError::unreachable("connection refused"));

    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(state.selector, WindowSelector::Last30Days);
    assert_eq!(*state.readings, startup_readings());
    assert_eq!(state.notice.as_deref(), Some("connection refused"));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_refresh_keeps_readings_and_clears_loading() {
    let mut scripted = started_view().await;

    for error in [
        FetchError::bad_response(503, "HTTP 503"),
        FetchError::malformed("expected a sequence"),
    ] {
        let state = scripted.view.refresh().await.unwrap();
        assert!(state.is_loading);

        scripted.next_fetch().await.fail(error);
        let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
        assert_eq!(*state.readings, startup_readings());
    }
}

#[tokio::test(flavor = "current_thread")]
async fn late_response_for_abandoned_window_is_discarded() {
    let mut scripted = started_view().await;

    scripted.view.select_window(WindowSelector::Last30Days).await.unwrap();
    let month = scripted.next_fetch().await;
    scripted.view.select_window(WindowSelector::Last7Days).await.unwrap();
    let week = scripted.next_fetch().await;

    week.succeed(vec![reading(7.0, 7)]);
    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(*state.readings, vec![reading(7.0, 7)]);

    let mut changes = scripted.view.subscribe();
    changes.borrow_and_update();
    month.succeed(vec![reading(30.0, 30)]);
    changes.changed().await.unwrap();

    let state = scripted.view.snapshot();
    assert_eq!(state.selector, WindowSelector::Last7Days);
    assert_eq!(*state.readings, vec![reading(7.0, 7)]);
    assert!(!state.is_loading);
}

#[tokio::test(flavor = "current_thread")]
async fn abandoned_window_completing_first_never_shows() {
    let mut scripted = started_view().await;

    scripted.view.select_window(WindowSelector::Last30Days).await.unwrap();
    let month = scripted.next_fetch().await;
    scripted.view.select_window(WindowSelector::Last7Days).await.unwrap();
    let week = scripted.next_fetch().await;

    let mut changes = scripted.view.subscribe();
    changes.borrow_and_update();
    month.succeed(vec![reading(30.0, 30)]);
    changes.changed().await.unwrap();

    let state = scripted.view.snapshot();
    assert_eq!(*state.readings, startup_readings());
    // The week request is still outstanding.
    assert!(state.is_loading);

    week.succeed(vec![reading(7.0, 7)]);
    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(*state.readings, vec![reading(7.0, 7)]);
}

#[tokio::test(flavor = "current_thread")]
async fn overlapping_refreshes_show_the_last_completed() {
    let mut scripted = started_view().await;

    scripted.view.refresh().await.unwrap();
    let older = scripted.next_fetch().await;
    scripted.view.refresh().await.unwrap();
    let newer = scripted.next_fetch().await;

    let mut changes = scripted.view.subscribe();
    changes.borrow_and_update();
    newer.fail(FetchError::unreachable("timed out"));
    changes.changed().await.unwrap();
    assert_eq!(*scripted.view.readings(), startup_readings());
    assert!(scripted.view.is_loading());

    older.succeed(vec![reading(25.0, 5)]);
    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(*state.readings, vec![reading(25.0, 5)]);
    assert!(state.notice.is_none());
    assert_eq!(*scripted.view.readings(), vec![reading(25.0, 5)]);
}

#[tokio::test(flavor = "current_thread")]
async fn reselecting_current_window_does_not_fetch() {
    let mut scripted = started_view().await;

    let state = scripted.view.select_window(WindowSelector::All).await.unwrap();

    assert!(!state.is_loading);
    assert!(scripted.fetches.try_recv().is_err());
}

#[tokio::test(flavor = "current_thread")]
async fn loading_holds_until_completion_is_reconciled() {
    let mut scripted = started_view().await;

    let state = scripted.view.refresh().await.unwrap();
    assert!(state.is_loading);

    let fetch = scripted.next_fetch().await;
    tokio::task::yield_now().await;
    assert!(scripted.view.is_loading());

    fetch.succeed(vec![reading(24.0, 3)]);
    let state = scripted.view.wait_for(|s| !s.is_loading).await.unwrap();
    assert_eq!(*state.readings, vec![reading(24.0, 3)]);
}

#[tokio::test(flavor = "current_thread")]
async fn runtime_stops_when_handles_are_dropped() {
    let scripted = started_view().await;
    let ScriptedView { view, task, .. } = scripted;

    let detached = view.clone();
    drop(view);
    assert!(!task.is_finished());

    drop(detached);
    task.await.unwrap();
}
