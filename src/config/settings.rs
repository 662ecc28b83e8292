use std::time::Duration;

use serde::Deserialize;

use crate::transport::ConnectOptions;

/// Top-level configuration settings for the publisher.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub publisher: PublisherSettings,
    pub connection: ConnectionSettings,
    pub log: LogSettings,
}

/// Where and what to publish.
#[derive(Debug, Deserialize, Clone)]
pub struct PublisherSettings {
    /// Broker endpoint; `http(s)` schemes are dialed as `ws(s)`.
    pub address: String,
    /// Topic used when the caller does not name one.
    pub default_topic: String,
}

/// Transport dial behavior.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionSettings {
    pub reconnect: bool,
    pub retry_delay_ms: u64,
}

/// Logging verbosity.
#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

impl ConnectionSettings {
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            reconnect: self.reconnect,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub publisher: Option<PartialPublisherSettings>,
    pub connection: Option<PartialConnectionSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialPublisherSettings {
    pub address: Option<String>,
    pub default_topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialConnectionSettings {
    pub reconnect: Option<bool>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

/// Provides default values for `Settings`.
///
/// Ensures the publisher has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            publisher: PublisherSettings {
                address: "http://localhost:3000".to_string(),
                default_topic: "/default".to_string(),
            },
            connection: ConnectionSettings {
                reconnect: true,
                retry_delay_ms: 1000,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
