use std::time::Duration;

use serde_json::Value;

use crate::transport::message::Command;
use crate::utils::error::TransportError;

/// Dial behavior for a connection handle.
///
/// This is the extension point for deployment-specific connection tuning;
/// the publisher passes it through untouched to whatever `Connector` it was
/// built with.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Re-dial after a dropped or failed connection attempt.
    pub reconnect: bool,
    /// Delay between re-dial attempts.
    pub retry_delay: Duration,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            reconnect: true,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

/// Lifecycle events reported by a connection driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    Connected,
    Disconnected,
    ConnectError(String),
}

/// Listener invoked on the driver task for every lifecycle event. Runs
/// concurrently with the publisher's own callers; it must only update state
/// and log.
pub type EventListener = Box<dyn Fn(SocketEvent) + Send + Sync>;

/// A live connection handle, exclusively owned by one publisher.
///
/// `connect` starts the handshake and returns immediately; completion is
/// observed through the registered listener, never by blocking. `emit`
/// queues one command frame for transmission. `disconnect` requests a
/// close and is best-effort.
pub trait Socket: Send + std::fmt::Debug {
    fn connect(&self);
    fn emit(&self, command: Command, envelope: &Value) -> Result<(), TransportError>;
    fn disconnect(&self);
}

/// Strategy for opening connection handles.
///
/// A synchronous `Err` from `open` means the handle could not be created at
/// all (e.g. malformed address); network failures are reported later through
/// the listener.
pub trait Connector: Send {
    fn open(
        &self,
        address: &str,
        options: &ConnectOptions,
        listener: EventListener,
    ) -> Result<Box<dyn Socket>, TransportError>;
}
