use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Environment variables with this prefix override file values,
/// e.g. `CLIMATE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "CLIMATE";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file at
/// `path` (optional, skipped if missing), `CLIMATE__*` environment variables,
/// and finally a bare `DATABASE_URL`. A `.env` file in the working directory
/// is loaded into the environment beforehand when present.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.server.cors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_toml(
            r#"
            [database]
            url = "sqlite://data/climate.sqlite"
            max_connections = 2

            [server]
            port = 8088
            "#,
        );
        let config = config::Config::builder()
            .add_source(config::File::from(file.path()))
            .build()
            .unwrap()
            .try_deserialize::<Config>()
            .unwrap();

        assert_eq!(config.database.url, "sqlite://data/climate.sqlite");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    // Environment variables are process-wide, so every `load_config` case
    // that depends on them lives in this one test.
    #[test]
    fn load_config_layers_file_env_and_database_url() {
        let file = write_toml(
            r#"
            [database]
            url = "sqlite://from-file.sqlite"

            [server]
            port = 8088
            "#,
        );

        // SAFETY: no other test in this crate reads or writes the environment.
        unsafe {
            std::env::set_var("CLIMATE__SERVER__PORT", "9099");
            std::env::set_var("DATABASE_URL", "sqlite://from-env.sqlite");
        }
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 9099);
        assert_eq!(config.database.url, "sqlite://from-env.sqlite");
        assert_eq!(config.server.host, "127.0.0.1");

        unsafe {
            std::env::remove_var("CLIMATE__SERVER__PORT");
            std::env::remove_var("DATABASE_URL");
        }
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.database.url, "sqlite://from-file.sqlite");

        let missing = file.path().with_file_name("no-such-climate-config.toml");
        let config = load_config(&missing).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://Resources/hawaii.sqlite");

        let invalid = write_toml("[database]\nmax_connections = 0\n");
        assert!(matches!(load_config(invalid.path()), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn validation_rejects_unusable_settings() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.database.url = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let server = ServerSettings { host: "0.0.0.0".into(), port: 3000, cors: false };
        assert_eq!(server.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }
}
