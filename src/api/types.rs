//! Wire types for the `/configs` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field paths accepted by `PATCH /configs`.
pub mod paths {
    pub const MODE: &str = "mode";
    pub const LOG_LEVEL: &str = "log-level";
    pub const ALLOW_LAN: &str = "allow-lan";
    pub const SNIFFING: &str = "sniffing";
    pub const INTERFACE_NAME: &str = "interface-name";

    pub const TUN_ENABLE: &str = "tun.enable";
    pub const TUN_DEVICE: &str = "tun.device";
    pub const TUN_STACK: &str = "tun.stack";
    pub const TUN_AUTO_ROUTE: &str = "tun.auto-route";
    pub const TUN_AUTO_DETECT_INTERFACE: &str = "tun.auto-detect-interface";

    pub const HTTP_PORT: &str = "port";
    pub const SOCKS_PORT: &str = "socks-port";
    pub const MIXED_PORT: &str = "mixed-port";
    pub const REDIR_PORT: &str = "redir-port";
    pub const TPROXY_PORT: &str = "tproxy-port";

    /// All port keys, in display order.
    pub const PORTS: [&str; 5] = [HTTP_PORT, SOCKS_PORT, MIXED_PORT, REDIR_PORT, TPROXY_PORT];
}

/// Proxy-core operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[serde(alias = "Rule")]
    Rule,
    #[serde(alias = "Global")]
    Global,
    #[serde(alias = "Direct")]
    Direct,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Rule => "rule",
            Mode::Global => "global",
            Mode::Direct => "direct",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rule" => Ok(Mode::Rule),
            "global" => Ok(Mode::Global),
            "direct" => Ok(Mode::Direct),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// TUN device settings as reported by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TunSnapshot {
    pub enable: bool,
    #[serde(default)]
    pub device: String,
    pub stack: String,
    pub auto_route: bool,
    pub auto_detect_interface: bool,
}

/// Remote configuration as of the last successful `GET /configs`.
///
/// Replaced wholesale on each fetch; local edits never touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSnapshot {
    pub mode: Mode,
    pub log_level: String,
    pub allow_lan: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sniffing: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tun: Option<TunSnapshot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redir_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tproxy_port: Option<u16>,
}

impl ConfigSnapshot {
    /// Port for a `PATCH` key, treating an absent port as 0.
    pub fn port_for(&self, key: &str) -> Option<u16> {
        let port = match key {
            paths::HTTP_PORT => self.port,
            paths::SOCKS_PORT => self.socks_port,
            paths::MIXED_PORT => self.mixed_port,
            paths::REDIR_PORT => self.redir_port,
            paths::TPROXY_PORT => self.tproxy_port,
            _ => return None,
        };
        Some(port.unwrap_or(0))
    }

    /// Re-encode every present field as a single-key edit.
    pub fn to_edits(&self) -> Vec<PendingEdit> {
        let mut edits = vec![
            PendingEdit::new(paths::MODE, self.mode.as_str()),
            PendingEdit::new(paths::LOG_LEVEL, self.log_level.as_str()),
            PendingEdit::new(paths::ALLOW_LAN, self.allow_lan),
        ];

        if let Some(sniffing) = self.sniffing {
            edits.push(PendingEdit::new(paths::SNIFFING, sniffing));
        }
        if let Some(tun) = &self.tun {
            edits.push(PendingEdit::new(paths::TUN_ENABLE, tun.enable));
            edits.push(PendingEdit::new(paths::TUN_DEVICE, tun.device.as_str()));
            edits.push(PendingEdit::new(paths::TUN_STACK, tun.stack.as_str()));
            edits.push(PendingEdit::new(paths::TUN_AUTO_ROUTE, tun.auto_route));
            edits.push(PendingEdit::new(
                paths::TUN_AUTO_DETECT_INTERFACE,
                tun.auto_detect_interface,
            ));
        }
        if let Some(name) = &self.interface_name {
            edits.push(PendingEdit::new(paths::INTERFACE_NAME, name.as_str()));
        }

        let ports = [
            (paths::HTTP_PORT, self.port),
            (paths::SOCKS_PORT, self.socks_port),
            (paths::MIXED_PORT, self.mixed_port),
            (paths::REDIR_PORT, self.redir_port),
            (paths::TPROXY_PORT, self.tproxy_port),
        ];
        for (key, port) in ports {
            if let Some(port) = port {
                edits.push(PendingEdit::new(key, port));
            }
        }

        edits
    }
}

/// One field change destined for `PATCH /configs`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub path: String,
    pub value: Value,
}

impl PendingEdit {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Request body: a JSON object with exactly one key.
    pub fn body(&self) -> Value {
        let mut map = Map::with_capacity(1);
        map.insert(self.path.clone(), self.value.clone());
        Value::Object(map)
    }
}
