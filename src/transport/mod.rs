//! The `transport` module is the boundary between the publisher and the
//! network.
//!
//! It defines the wire command vocabulary and frame encoding, the connection
//! handle contract (`Socket`/`Connector`), and the WebSocket implementation
//! of that contract used against a real broker.

pub mod message;
pub mod socket;
pub mod websocket;

pub use message::Command;
pub use socket::{ConnectOptions, Connector, EventListener, Socket, SocketEvent};
pub use websocket::WsConnector;

#[cfg(test)]
mod tests;
