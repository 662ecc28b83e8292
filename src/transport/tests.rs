use std::time::Duration;

use serde_json::json;

use super::message::{Command, encode_frame};
use super::socket::ConnectOptions;
use super::websocket::endpoint_url;
use crate::config::ConnectionSettings;
use crate::utils::error::TransportError;

#[test]
fn command_wire_names() {
    assert_eq!(Command::Subscribe.name(), "subscribe");
    assert_eq!(Command::Unsubscribe.name(), "unsubscribe");
    assert_eq!(Command::Publish.name(), "publish");
}

#[test]
fn encode_frame_merges_type_tag_into_envelope() {
    let envelope = json!({"account_id": 1, "topic": "/orders"});
    let frame = encode_frame(Command::Publish, &envelope).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(parsed["type"], "publish");
    assert_eq!(parsed["topic"], "/orders");
    assert_eq!(parsed["account_id"], 1);
}

#[test]
fn encode_frame_for_topic_membership_commands() {
    let frame = encode_frame(Command::Subscribe, &json!({"topic": "/orders"})).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(parsed["type"], "subscribe");

    let frame = encode_frame(Command::Unsubscribe, &json!({"topic": "/orders"})).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(parsed["type"], "unsubscribe");
}

#[test]
fn encode_frame_rejects_non_object_envelope() {
    let err = encode_frame(Command::Publish, &json!("nope")).unwrap_err();
    assert!(matches!(err, TransportError::BadEnvelope));
}

#[test]
fn endpoint_url_maps_http_schemes_onto_websocket() {
    assert_eq!(
        endpoint_url("http://localhost:3000").unwrap().as_str(),
        "ws://localhost:3000/"
    );
    assert_eq!(
        endpoint_url("https://broker.example.com").unwrap().as_str(),
        "wss://broker.example.com/"
    );
    assert_eq!(
        endpoint_url("ws://localhost:8080").unwrap().as_str(),
        "ws://localhost:8080/"
    );
}

#[test]
fn endpoint_url_rejects_unknown_scheme() {
    let err = endpoint_url("ftp://localhost").unwrap_err();
    assert!(matches!(err, TransportError::UnsupportedScheme(s) if s == "ftp"));
}

#[test]
fn endpoint_url_rejects_malformed_address() {
    let err = endpoint_url("not an address").unwrap_err();
    assert!(matches!(err, TransportError::InvalidAddress { .. }));
}

#[test]
fn connect_options_defaults() {
    let options = ConnectOptions::default();
    assert!(options.reconnect);
    assert_eq!(options.retry_delay, Duration::from_millis(1000));
}

#[test]
fn connect_options_from_settings() {
    let settings = ConnectionSettings {
        reconnect: false,
        retry_delay_ms: 250,
    };
    let options = settings.connect_options();
    assert!(!options.reconnect);
    assert_eq!(options.retry_delay, Duration::from_millis(250));
}
