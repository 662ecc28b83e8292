use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::publisher::envelope;
use crate::transport::{
    Command, ConnectOptions, Connector, EventListener, Socket, SocketEvent, WsConnector,
};
use crate::utils::error::PubSubError;

/// Publish client for a topic-based messaging broker.
///
/// Owns one connection handle and a Connected/Disconnected flag that only
/// transport lifecycle events flip (plus a forced clear on `disconnect`).
/// `publish` is a synchronous call over an asynchronous transport: it checks
/// the flag, seals the envelope, and enqueues it without waiting for any
/// network I/O. Delivery is not guaranteed and not acknowledged.
pub struct JsonPublisher<T: Serialize> {
    address: String,
    default_topic: String,
    options: ConnectOptions,
    connector: Box<dyn Connector>,
    socket: Option<Box<dyn Socket>>,
    connected: Arc<AtomicBool>,
    _payload: PhantomData<fn(&T)>,
}

impl<T: Serialize> JsonPublisher<T> {
    /// Publisher over the WebSocket transport with default dial options.
    pub fn new(address: impl Into<String>, default_topic: impl Into<String>) -> Self {
        Self::with_connector(
            address,
            default_topic,
            ConnectOptions::default(),
            Box::new(WsConnector),
        )
    }

    /// Publisher over the WebSocket transport with explicit dial options.
    pub fn with_options(
        address: impl Into<String>,
        default_topic: impl Into<String>,
        options: ConnectOptions,
    ) -> Self {
        Self::with_connector(address, default_topic, options, Box::new(WsConnector))
    }

    /// Publisher over an injected transport strategy.
    pub fn with_connector(
        address: impl Into<String>,
        default_topic: impl Into<String>,
        options: ConnectOptions,
        connector: Box<dyn Connector>,
    ) -> Self {
        Self {
            address: address.into(),
            default_topic: default_topic.into(),
            options,
            connector,
            socket: None,
            connected: Arc::new(AtomicBool::new(false)),
            _payload: PhantomData,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn default_topic(&self) -> &str {
        &self.default_topic
    }

    /// Current connection state. Safe at any point in the lifecycle,
    /// including before the first `connect`.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Open a fresh connection handle to the configured address.
    ///
    /// Any existing handle is torn down first, best-effort. The call does
    /// not wait for the handshake: the state flips to Connected only when
    /// the transport reports it. Fails only when the handle itself cannot
    /// be created.
    pub fn connect(&mut self) -> Result<(), PubSubError> {
        if let Some(old) = self.socket.take() {
            old.disconnect();
        }
        self.connected.store(false, Ordering::SeqCst);

        let connected = Arc::clone(&self.connected);
        let listener: EventListener = Box::new(move |event| match event {
            SocketEvent::Connected => {
                connected.store(true, Ordering::SeqCst);
                info!("socket connected");
            }
            SocketEvent::Disconnected => {
                connected.store(false, Ordering::SeqCst);
                info!("socket disconnected");
            }
            SocketEvent::ConnectError(reason) => {
                connected.store(false, Ordering::SeqCst);
                warn!("connection error: {reason}");
            }
        });

        let socket = self
            .connector
            .open(&self.address, &self.options, listener)
            .map_err(|source| PubSubError::Connection {
                address: self.address.clone(),
                source,
            })?;
        socket.connect();
        self.socket = Some(socket);
        Ok(())
    }

    /// Request a transport-level disconnect and drop the handle.
    ///
    /// Idempotent; a publisher with no handle is left untouched. The flag is
    /// cleared immediately rather than waiting for the disconnect event.
    pub fn disconnect(&mut self) {
        if let Some(socket) = self.socket.take() {
            if self.is_connected() {
                socket.disconnect();
            }
        }
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Publish to the default topic.
    pub fn publish(&self, message: &T) -> Result<(), PubSubError> {
        self.publish_to(&self.default_topic, message)
    }

    /// Publish to an explicit topic.
    ///
    /// Fails with `NotConnected` while disconnected; nothing reaches the
    /// transport in that case. Serialization and emit failures are logged
    /// and swallowed; the call still returns `Ok`.
    pub fn publish_to(&self, topic: &str, message: &T) -> Result<(), PubSubError> {
        let socket = match &self.socket {
            Some(socket) if self.is_connected() => socket,
            _ => {
                return Err(PubSubError::NotConnected {
                    topic: topic.to_string(),
                    message: envelope::render(message),
                });
            }
        };

        let sealed = match envelope::seal(message, topic) {
            Ok(sealed) => sealed,
            Err(e) => {
                error!("dropping message for topic {topic}: {e}");
                return Ok(());
            }
        };
        debug!("PUBLISH->{sealed}");
        if let Err(e) = socket.emit(Command::Publish, &sealed) {
            error!("failed to emit publish for topic {topic}: {e}");
        }
        Ok(())
    }
}

impl<T: Serialize> Drop for JsonPublisher<T> {
    fn drop(&mut self) {
        self.disconnect();
    }
}
