//! # PubSock
//!
//! `pubsock` is a generic publish client for topic-based real-time messaging.
//! Callers hand it a serializable message and a topic name; it seals the
//! message into a JSON envelope, injects the topic, and forwards it over a
//! persistent, auto-reconnecting WebSocket connection to a broker process.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `publisher`: The publish client itself - connection-state machine, publish preconditions, envelope sealing.
//! - `transport`: The wire protocol (subscribe/unsubscribe/publish commands) and the WebSocket connection driver.
//! - `config`: Handles loading and managing publisher configuration.
//! - `utils`: Contains shared utilities, such as error types and logging setup.

pub mod config;
pub mod publisher;
pub mod transport;
pub mod utils;
