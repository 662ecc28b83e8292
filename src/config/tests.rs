use serial_test::serial;

use super::load_config;
use super::settings::Settings;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.publisher.address, "http://localhost:3000");
    assert_eq!(settings.publisher.default_topic, "/default");
    assert!(settings.connection.reconnect);
    assert_eq!(settings.connection.retry_delay_ms, 1000);
    assert_eq!(settings.log.level, "info");
}

#[test]
#[serial]
fn environment_overrides_defaults() {
    temp_env::with_vars(
        [
            ("PUBLISHER_ADDRESS", Some("http://broker.internal:9000")),
            ("LOG_LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.publisher.address, "http://broker.internal:9000");
            assert_eq!(cfg.log.level, "debug");
            // Untouched sections keep their defaults.
            assert_eq!(cfg.connection.retry_delay_ms, 1000);
        },
    );
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    // Create a temporary directory and set it as current dir so load_config
    // will pick up config/default.toml from there.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [publisher]
        address = "http://localhost:4000"

        [connection]
        reconnect = false
        retry_delay_ms = 250
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config().expect("load_config failed");
    assert_eq!(cfg.publisher.address, "http://localhost:4000");
    // Keys missing from the file fall back to defaults.
    assert_eq!(cfg.publisher.default_topic, "/default");
    assert!(!cfg.connection.reconnect);
    assert_eq!(cfg.connection.retry_delay_ms, 250);

    env::set_current_dir(orig).expect("restore current dir");
}
