use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// No default: the process refuses to start without one.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 5)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with NOTICE_BOARD__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("NOTICE_BOARD").separator("__"))

            .build()?;

        config.try_deserialize()
    }

    /// The configured database url, if it is present and non-blank.
    pub fn database_url(&self) -> Option<&str> {
        self.database
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_url(url: Option<&str>) -> Settings {
        Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: url.map(str::to_string),
                max_connections: 5,
            },
        }
    }

    #[test]
    fn test_database_url_missing_or_blank() {
        assert_eq!(settings_with_url(None).database_url(), None);
        assert_eq!(settings_with_url(Some("  ")).database_url(), None);
        assert_eq!(
            settings_with_url(Some("sqlite://notices.db")).database_url(),
            Some("sqlite://notices.db")
        );
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(settings_with_url(None).bind_address(), "127.0.0.1:5000");
    }
}
