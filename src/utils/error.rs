//! Error types shared across the publisher and transport layers.

use thiserror::Error;

/// Failures surfaced to callers of the publisher API.
#[derive(Debug, Error)]
pub enum PubSubError {
    /// `publish` was called while the connection state is Disconnected.
    /// Carries the target topic and a JSON rendering of the message that
    /// was dropped, so the caller can see exactly what never went out.
    #[error("cannot send {message} on topic {topic} - not connected")]
    NotConnected { topic: String, message: String },

    /// Opening the connection handle failed synchronously, before any
    /// network activity (e.g. a malformed endpoint address).
    #[error("cannot open socket connection at {address}")]
    Connection {
        address: String,
        #[source]
        source: TransportError,
    },
}

/// Failures at the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint address `{address}`: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme `{0}`")]
    UnsupportedScheme(String),

    /// The envelope handed to `emit` was not a JSON object.
    #[error("envelope must be a JSON object")]
    BadEnvelope,

    /// The connection driver is gone; nothing can be queued anymore.
    #[error("connection closed")]
    ChannelClosed,
}

/// Failures while turning a payload into a wire envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The payload serialized to something other than a JSON object, so
    /// there is no field map to inject the topic into.
    #[error("payload did not serialize to a JSON object")]
    NotAnObject,
}
