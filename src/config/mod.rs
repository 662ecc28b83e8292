mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{ConnectionSettings, LogSettings, PublisherSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the publisher, connection and log configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        publisher: PublisherSettings {
            address: partial
                .publisher
                .as_ref()
                .and_then(|p| p.address.clone())
                .unwrap_or(default.publisher.address),
            default_topic: partial
                .publisher
                .as_ref()
                .and_then(|p| p.default_topic.clone())
                .unwrap_or(default.publisher.default_topic),
        },
        connection: ConnectionSettings {
            reconnect: partial
                .connection
                .as_ref()
                .and_then(|c| c.reconnect)
                .unwrap_or(default.connection.reconnect),
            retry_delay_ms: partial
                .connection
                .as_ref()
                .and_then(|c| c.retry_delay_ms)
                .unwrap_or(default.connection.retry_delay_ms),
        },
        log: LogSettings {
            level: partial
                .log
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.log.level),
        },
    })
}

#[cfg(test)]
mod tests;
