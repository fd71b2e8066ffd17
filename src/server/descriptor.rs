//! Connection descriptor for a proxy-core controller.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;
use uuid::Uuid;

/// A remote proxy-core controller endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Stable identity, preserved across edits.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Hostname or IP address of the controller.
    pub host: String,

    /// Controller port, kept as entered. Config files may give a number.
    #[serde(deserialize_with = "port_text")]
    pub port: String,

    /// Bearer token shared with the controller.
    #[serde(default)]
    pub secret: String,

    /// Use HTTPS instead of HTTP.
    #[serde(default)]
    pub tls: bool,
}

fn port_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Number(port) => port.to_string(),
        Port::Text(port) => port,
    })
}

impl Server {
    /// Create a plain-HTTP server descriptor with a fresh id.
    pub fn new(host: impl Into<String>, port: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            host: host.into(),
            port: port.into(),
            secret: secret.into(),
            tls: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }

    /// URL scheme for this server.
    pub fn scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    /// Absolute URL for a controller path.
    ///
    /// `path` is relative to the controller root and may carry a query
    /// string, e.g. `configs?force=true`.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let raw = format!(
            "{}://{}:{}/{}",
            self.scheme(),
            self.host,
            self.port,
            path.trim_start_matches('/')
        );
        Url::parse(&raw)
    }

    /// Label shown to users: the name when set, otherwise `host:port`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("{}:{}", self.host, self.port),
        }
    }
}
