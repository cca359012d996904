use std::net::SocketAddr;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

impl ServerSettings {
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

impl Settings {
    /// Defaults, then `trivia.toml` (or `$TRIVIA_CONFIG`) if present, then `TRIVIA_*` variables.
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let file = dotenv::var("TRIVIA_CONFIG").unwrap_or_else(|_| "trivia".to_owned());
        Self::builder()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("TRIVIA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("database.path", "trivia.db")?
            .set_default("database.max_connections", 5_i64)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.path, "trivia.db");
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(
            settings.server.addr().unwrap(),
            "0.0.0.0:5000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn overrides_take_precedence() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("server.port", 8080_i64)
            .unwrap()
            .set_override("database.path", "/tmp/other.db")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.path, "/tmp/other.db");
    }

    #[test]
    fn bad_host_is_rejected() {
        let server = ServerSettings {
            host: "not a host".to_owned(),
            port: 1,
        };
        assert!(server.addr().is_err());
    }
}
