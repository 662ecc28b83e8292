use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tracing::{debug, warn};
use tungstenite::protocol::Message as WsMessage;
use url::Url;

use crate::transport::message::{self, Command};
use crate::transport::socket::{ConnectOptions, Connector, EventListener, Socket, SocketEvent};
use crate::utils::error::TransportError;

/// Opens `WsSocket` handles. Broker addresses may use `http(s)` schemes,
/// which are mapped onto `ws(s)` before dialing.
#[derive(Debug, Default)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn open(
        &self,
        address: &str,
        options: &ConnectOptions,
        listener: EventListener,
    ) -> Result<Box<dyn Socket>, TransportError> {
        let url = endpoint_url(address)?;
        Ok(Box::new(WsSocket::new(url, options.clone(), listener)))
    }
}

/// Parse a broker address into a dialable WebSocket URL.
pub(crate) fn endpoint_url(address: &str) -> Result<Url, TransportError> {
    let url = Url::parse(address).map_err(|source| TransportError::InvalidAddress {
        address: address.to_string(),
        source,
    })?;
    let rewritten = match url.scheme() {
        "ws" | "wss" => return Ok(url),
        "https" => url.as_str().replacen("https", "wss", 1),
        "http" => url.as_str().replacen("http", "ws", 1),
        other => return Err(TransportError::UnsupportedScheme(other.to_string())),
    };
    Url::parse(&rewritten).map_err(|source| TransportError::InvalidAddress {
        address: address.to_string(),
        source,
    })
}

/// Everything the driver task takes ownership of when it starts.
struct DriverParts {
    outgoing: UnboundedReceiver<WsMessage>,
    listener: EventListener,
}

/// WebSocket connection handle.
///
/// `connect` hands the receiving half of the frame queue to a spawned driver
/// task; `emit` enqueues frames from any thread without touching the network.
pub struct WsSocket {
    url: Url,
    options: ConnectOptions,
    outgoing: UnboundedSender<WsMessage>,
    pending: Mutex<Option<DriverParts>>,
    closing: Arc<AtomicBool>,
}

impl std::fmt::Debug for WsSocket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsSocket")
            .field("url", &self.url)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl WsSocket {
    fn new(url: Url, options: ConnectOptions, listener: EventListener) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            url,
            options,
            outgoing: tx,
            pending: Mutex::new(Some(DriverParts {
                outgoing: rx,
                listener,
            })),
            closing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Socket for WsSocket {
    fn connect(&self) {
        let Some(parts) = self.pending.lock().unwrap().take() else {
            warn!("connect called twice on the same socket handle");
            return;
        };
        tokio::spawn(drive(
            self.url.clone(),
            self.options.clone(),
            parts,
            Arc::clone(&self.closing),
        ));
    }

    fn emit(&self, command: Command, envelope: &Value) -> Result<(), TransportError> {
        let frame = message::encode_frame(command, envelope)?;
        self.outgoing
            .send(WsMessage::Text(frame.into()))
            .map_err(|_| TransportError::ChannelClosed)
    }

    fn disconnect(&self) {
        self.closing.store(true, Ordering::SeqCst);
        // A close frame lets the peer finish the closing handshake; if the
        // driver is already gone the queue send just fails.
        let _ = self.outgoing.send(WsMessage::Close(None));
    }
}

/// Connection driver. Dials, pumps queued frames into the sink, drains
/// inbound traffic, and reports lifecycle transitions to the listener.
/// Re-dials after failures until `closing` is set or reconnect is off.
async fn drive(url: Url, options: ConnectOptions, parts: DriverParts, closing: Arc<AtomicBool>) {
    let DriverParts {
        mut outgoing,
        listener,
    } = parts;
    loop {
        if closing.load(Ordering::SeqCst) {
            break;
        }
        match connect_async(url.as_str()).await {
            Ok((stream, _response)) => {
                debug!("connected to {url}");
                listener(SocketEvent::Connected);
                let (mut sink, mut source) = stream.split();
                loop {
                    tokio::select! {
                        queued = outgoing.recv() => match queued {
                            Some(frame) => {
                                let is_close = matches!(frame, WsMessage::Close(_));
                                if let Err(e) = sink.send(frame).await {
                                    warn!("failed to send frame: {e}");
                                    break;
                                }
                                if is_close {
                                    break;
                                }
                            }
                            // Handle dropped; nothing left to transmit.
                            None => {
                                closing.store(true, Ordering::SeqCst);
                                break;
                            }
                        },
                        delivered = source.next() => match delivered {
                            // This client only publishes; inbound frames
                            // (including `_`-prefixed broker metadata) are
                            // drained and dropped unread.
                            Some(Ok(msg)) => {
                                if msg.is_close() {
                                    break;
                                }
                            }
                            Some(Err(e)) => {
                                warn!("socket error on {url}: {e}");
                                break;
                            }
                            None => break,
                        },
                    }
                }
                listener(SocketEvent::Disconnected);
            }
            Err(e) => {
                warn!("connection to {url} failed: {e}");
                listener(SocketEvent::ConnectError(e.to_string()));
            }
        }
        if closing.load(Ordering::SeqCst) || !options.reconnect {
            break;
        }
        sleep(options.retry_delay).await;
    }
}
