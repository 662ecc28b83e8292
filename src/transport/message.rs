use serde_json::Value;

use crate::utils::error::TransportError;

/// Wire command vocabulary shared with the broker.
///
/// The publisher only ever emits `Publish`; `Subscribe` and `Unsubscribe`
/// belong to the same framed protocol and are used by the receiving side to
/// manage topic membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Subscribe,
    Unsubscribe,
    Publish,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Subscribe => "subscribe",
            Command::Unsubscribe => "unsubscribe",
            Command::Publish => "publish",
        }
    }
}

/// Encode a command and its envelope into a single JSON text frame.
///
/// The frame is the envelope's field map with the command name merged in
/// under a `"type"` key. The envelope itself stays untouched; delivered
/// copies may additionally carry broker-appended fields prefixed with an
/// underscore (`_from`, `_at`), which this client never produces.
pub fn encode_frame(command: Command, envelope: &Value) -> Result<String, TransportError> {
    let Value::Object(map) = envelope else {
        return Err(TransportError::BadEnvelope);
    };
    let mut frame = map.clone();
    frame.insert("type".to_string(), Value::String(command.name().to_string()));
    Ok(Value::Object(frame).to_string())
}
