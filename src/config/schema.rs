//! Configuration schema definitions.
//!
//! Defines the `clashdash` CLI configuration file. All sections are optional
//! and fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::server::Server;

/// Root configuration for the CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DashConfig {
    /// Name of the server used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_server: Option<String>,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// HTTP client settings.
    pub client: ClientConfig,

    /// Known controllers.
    pub servers: Vec<Server>,
}

impl DashConfig {
    /// Find a server by its name.
    pub fn server(&self, name: &str) -> Option<&Server> {
        self.servers
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
    }

    /// The explicitly named server, else `default_server`, else the first one.
    pub fn select_server(&self, name: Option<&str>) -> Option<&Server> {
        match name.or(self.default_server.as_deref()) {
            Some(name) => self.server(name),
            None => self.servers.first(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Accept self-signed controller certificates.
    pub accept_invalid_certs: bool,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            user_agent: concat!("clash-dash/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: DashConfig = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(!config.client.accept_invalid_certs);
        assert!(config.client.user_agent.starts_with("clash-dash/"));
        assert!(config.servers.is_empty());
        assert!(config.select_server(None).is_none());
    }

    #[test]
    fn test_select_server() {
        let config: DashConfig = toml::from_str(
            r#"
            default_server = "office"

            [[servers]]
            name = "home"
            host = "10.1.1.2"
            port = "9090"
            secret = "123456"

            [[servers]]
            name = "office"
            host = "clash.example.com"
            port = "443"
            secret = "abc"
            tls = true
            "#,
        )
        .unwrap();

        assert_eq!(config.select_server(None).unwrap().host, "clash.example.com");
        assert_eq!(config.select_server(Some("home")).unwrap().port, "9090");
        assert!(config.select_server(Some("nope")).is_none());
    }
}
