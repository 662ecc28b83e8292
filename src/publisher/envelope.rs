use serde::Serialize;
use serde_json::{Map, Value};

use crate::utils::error::EnvelopeError;

/// Field injected into every published envelope.
pub const TOPIC_FIELD: &str = "topic";

/// Seal a payload into a wire envelope for the given topic.
///
/// The payload must serialize to a JSON object. Null-valued fields are
/// pruned recursively, then the topic is written in, overwriting any payload
/// field of the same name. The envelope carries nothing else: no id, no
/// timestamp. Broker-side metadata arrives on delivered copies only.
pub fn seal<T: Serialize>(message: &T, topic: &str) -> Result<Value, EnvelopeError> {
    let mut value = serde_json::to_value(message)?;
    let Value::Object(map) = &mut value else {
        return Err(EnvelopeError::NotAnObject);
    };
    prune_nulls(map);
    map.insert(TOPIC_FIELD.to_string(), Value::String(topic.to_string()));
    Ok(value)
}

fn prune_nulls(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
    for value in map.values_mut() {
        match value {
            Value::Object(inner) => prune_nulls(inner),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(inner) = item {
                        prune_nulls(inner);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Best-effort rendering of a payload for error and log context.
pub(crate) fn render<T: Serialize>(message: &T) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| String::from("<unserializable>"))
}
