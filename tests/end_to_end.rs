//! Full runs: producer, request, decode, check, stop.

use proto_check::lifecycle::RunState;
use proto_check::object::PropertyValue;
use proto_check::{CheckMode, StyleKey, StyleRecord};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_naive_check_hits_template() {
    let mut config = common::ephemeral_config();
    config.check.modes = vec![CheckMode::Naive];

    let report = proto_check::run(&config).await.unwrap();

    assert_eq!(report.outcomes.len(), 1);
    let outcome = &report.outcomes[0];
    assert!(outcome.is_present());
    assert!(outcome.is_ambient_hit());
    let found = outcome.found.as_ref().unwrap();
    assert_ne!(found, &PropertyValue::Data(json!("white")));
    assert_eq!(found.to_string(), "[Object: null prototype] {}");
}

#[tokio::test]
async fn test_own_check_reports_no_such_key() {
    let mut config = common::ephemeral_config();
    config.check.modes = vec![CheckMode::Own];

    let report = proto_check::run(&config).await.unwrap();

    let outcome = &report.outcomes[0];
    assert!(!outcome.is_present());
    assert_eq!(outcome.message(), "no such key");
    assert_eq!(report.typed_value(), None);
}

#[tokio::test]
async fn test_default_run_shows_divergence() {
    let report = proto_check::run(&common::ephemeral_config()).await.unwrap();

    assert_eq!(report.envelope.styles.get(StyleKey::Stroke), Some("white"));
    assert_eq!(report.outcomes.len(), 2);
    assert!(report.diverged());
    assert_eq!(
        report.states,
        vec![
            RunState::Idle,
            RunState::ServerStarted,
            RunState::RequestSent,
            RunState::ResponseReceived,
            RunState::Checked,
            RunState::ServerStopped,
        ]
    );
}

#[tokio::test]
async fn test_reserved_label_served_as_data() {
    let mut config = common::ephemeral_config();
    config.server.styles = StyleRecord::new().with(StyleKey::Proto, "purple");

    let report = proto_check::run(&config).await.unwrap();

    assert!(!report.diverged());
    for outcome in &report.outcomes {
        assert_eq!(outcome.found, Some(PropertyValue::Data(json!("purple"))));
    }
    assert_eq!(report.typed_value(), Some("purple"));
}

#[tokio::test]
async fn test_data_label_agrees() {
    let mut config = common::ephemeral_config();
    config.check.key = "stroke".into();

    let report = proto_check::run(&config).await.unwrap();

    assert!(!report.diverged());
    for outcome in &report.outcomes {
        assert_eq!(outcome.found, Some(PropertyValue::Data(json!("white"))));
    }
    assert_eq!(report.typed_value(), Some("white"));
}

#[tokio::test]
async fn test_absent_label_agrees() {
    let mut config = common::ephemeral_config();
    config.check.key = "grid".into();

    let report = proto_check::run(&config).await.unwrap();

    assert!(!report.diverged());
    assert!(report.outcomes.iter().all(|o| !o.is_present()));
}

#[tokio::test]
async fn test_listener_released_after_run() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = common::ephemeral_config();
    config.server.bind_address = addr.to_string();

    let first = proto_check::run(&config).await.unwrap();
    assert_eq!(first.address, addr);
    let second = proto_check::run(&config).await.unwrap();
    assert_eq!(second.address, addr);
}
