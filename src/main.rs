use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use pubsock::config::load_config;
use pubsock::publisher::JsonPublisher;
use pubsock::utils::logging;

/// Line publisher: forwards each stdin line that parses as a JSON object to
/// the configured topic. Useful as a smoke test against a running broker.
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let settings = load_config().expect("Failed to load configuration");
    logging::init(&settings.log.level);

    let mut publisher: JsonPublisher<Value> = JsonPublisher::with_options(
        &settings.publisher.address,
        &settings.publisher.default_topic,
        settings.connection.connect_options(),
    );
    if let Err(e) = publisher.connect() {
        error!("{e}");
        std::process::exit(1);
    }

    // The handshake completes asynchronously; give it a bounded head start.
    for _ in 0..50 {
        if publisher.is_connected() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    if !publisher.is_connected() {
        warn!("not yet connected to {}; lines will fail until the broker is up",
            publisher.address());
    }

    info!(
        "publishing stdin lines to {} on topic {}",
        publisher.address(),
        publisher.default_topic()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Value>(&line) {
                        Ok(value) if value.is_object() => {
                            if let Err(e) = publisher.publish(&value) {
                                warn!("{e}");
                            }
                        }
                        Ok(_) => warn!("skipping line: not a JSON object"),
                        Err(e) => warn!("skipping line: {e}"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("stdin read failed: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received. Exiting gracefully.");
                break;
            }
        }
    }

    publisher.disconnect();
}
