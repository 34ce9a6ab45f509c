//! Tests to verify that the controller emits expected tracing spans and events

mod common;

use common::*;
use tracing_test::traced_test;
use user_directory::domain::error::DomainError;

#[traced_test]
#[tokio::test]
async fn refresh_logs_loaded_count() {
    let h = harness();
    h.listing.push_ok(vec![john_doe(), jane_smith()]);

    h.ctl.refresh().await.unwrap();

    assert!(logs_contain("user_directory.controller.refresh"));
    assert!(logs_contain("Users loaded"));
}

#[traced_test]
#[tokio::test]
async fn failed_refresh_logs_warning() {
    let h = loaded(vec![john_doe()]).await;
    h.listing.push_err("upstream unavailable");

    assert!(h.ctl.refresh().await.is_err());

    assert!(logs_contain("WARN"));
    assert!(logs_contain("keeping previously loaded users"));
    assert!(logs_contain("upstream unavailable"));
}

#[traced_test]
#[tokio::test]
async fn save_span_carries_user_id() {
    let h = loaded(vec![john_doe()]).await;
    h.ctl.begin_edit("1").unwrap();
    h.ctl.save().unwrap();

    assert!(logs_contain("user_directory.controller.begin_edit"));
    assert!(logs_contain("user_id=1"));
    assert!(logs_contain("User saved"));
}

#[traced_test]
#[tokio::test]
async fn contract_violations_are_logged_as_errors() {
    let h = loaded(vec![john_doe()]).await;
    h.ctl.begin_edit("1").unwrap();

    let err = h.ctl.request_delete("1").unwrap_err();
    assert!(matches!(err, DomainError::ConflictingOperation { .. }));

    assert!(logs_contain("ERROR"));
    assert!(logs_contain("Directory contract violation"));
}

#[traced_test]
#[tokio::test]
async fn recoverable_errors_are_not_logged_as_violations() {
    let h = loaded(vec![john_doe()]).await;

    assert!(h.ctl.begin_edit("missing").is_err());
    assert!(h.ctl.confirm_delete().is_err());

    assert!(!logs_contain("Directory contract violation"));
}
