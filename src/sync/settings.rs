//! Editable view of the remote configuration.
//!
//! Every field is a [`Setting`] holding two values:
//! - `displayed`: what the user last entered (updated optimistically)
//! - `confirmed`: what the controller last acknowledged
//!
//! The two diverge between staging an edit and the PATCH answer, and stay
//! diverged if the PATCH fails, until the next fetch resets both.

use serde_json::Value;

use crate::api::types::{paths, ConfigSnapshot, Mode, PendingEdit};

/// A locally editable value paired with its server-acknowledged value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting<T> {
    displayed: T,
    confirmed: T,
}

impl<T: Clone + PartialEq> Setting<T> {
    pub fn new(value: T) -> Self {
        Self {
            displayed: value.clone(),
            confirmed: value,
        }
    }

    pub fn displayed(&self) -> &T {
        &self.displayed
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    /// Optimistic local edit.
    pub fn stage(&mut self, value: T) {
        self.displayed = value;
    }

    /// Controller acknowledged `value`.
    ///
    /// `displayed` follows unless it holds a different, still pending edit.
    pub fn confirm(&mut self, value: T) {
        if self.displayed == self.confirmed {
            self.displayed = value.clone();
        }
        self.confirmed = value;
    }

    /// Replace both values from a fresh snapshot.
    pub fn reset(&mut self, value: T) {
        self.displayed = value.clone();
        self.confirmed = value;
    }

    /// True while the displayed value has not been acknowledged.
    pub fn is_pending(&self) -> bool {
        self.displayed != self.confirmed
    }
}

/// Editable settings derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableSettings {
    pub mode: Setting<Mode>,
    pub log_level: Setting<String>,
    pub allow_lan: Setting<bool>,
    pub sniffing: Setting<bool>,
    pub tun_enable: Setting<bool>,
    pub tun_device: Setting<String>,
    pub tun_stack: Setting<String>,
    pub tun_auto_route: Setting<bool>,
    pub tun_auto_detect_interface: Setting<bool>,
    pub interface_name: Setting<String>,
    pub http_port: Setting<String>,
    pub socks_port: Setting<String>,
    pub mixed_port: Setting<String>,
    pub redir_port: Setting<String>,
    pub tproxy_port: Setting<String>,
}

impl Default for EditableSettings {
    fn default() -> Self {
        Self {
            mode: Setting::new(Mode::Rule),
            log_level: Setting::new("info".to_string()),
            allow_lan: Setting::new(true),
            sniffing: Setting::new(false),
            tun_enable: Setting::new(false),
            tun_device: Setting::new(String::new()),
            tun_stack: Setting::new("gVisor".to_string()),
            tun_auto_route: Setting::new(true),
            tun_auto_detect_interface: Setting::new(true),
            interface_name: Setting::new(String::new()),
            http_port: Setting::new("0".to_string()),
            socks_port: Setting::new("0".to_string()),
            mixed_port: Setting::new("0".to_string()),
            redir_port: Setting::new("0".to_string()),
            tproxy_port: Setting::new("0".to_string()),
        }
    }
}

impl EditableSettings {
    /// Reset every field from a freshly fetched snapshot.
    ///
    /// TUN fields and the interface name keep their current values when the
    /// snapshot omits them.
    pub fn apply_snapshot(&mut self, snapshot: &ConfigSnapshot) {
        self.mode.reset(snapshot.mode);
        self.log_level.reset(snapshot.log_level.clone());
        self.allow_lan.reset(snapshot.allow_lan);
        self.sniffing.reset(snapshot.sniffing.unwrap_or(false));

        if let Some(tun) = &snapshot.tun {
            self.tun_enable.reset(tun.enable);
            self.tun_device.reset(tun.device.clone());
            self.tun_stack.reset(tun.stack.clone());
            self.tun_auto_route.reset(tun.auto_route);
            self.tun_auto_detect_interface.reset(tun.auto_detect_interface);
        }

        if let Some(name) = &snapshot.interface_name {
            self.interface_name.reset(name.clone());
        }

        for key in paths::PORTS {
            let port = snapshot.port_for(key).unwrap_or(0);
            if let Some(setting) = self.port_mut(key) {
                setting.reset(port.to_string());
            }
        }
    }

    /// Stage `edit` into the displayed value. Returns false for unknown
    /// paths or values of the wrong type.
    pub fn stage(&mut self, edit: &PendingEdit) -> bool {
        self.apply_edit(edit, false)
    }

    /// Record that the controller acknowledged `edit`.
    pub fn confirm(&mut self, edit: &PendingEdit) -> bool {
        self.apply_edit(edit, true)
    }

    /// True if any field has an unacknowledged local edit.
    pub fn has_pending(&self) -> bool {
        self.mode.is_pending()
            || self.log_level.is_pending()
            || self.allow_lan.is_pending()
            || self.sniffing.is_pending()
            || self.tun_enable.is_pending()
            || self.tun_device.is_pending()
            || self.tun_stack.is_pending()
            || self.tun_auto_route.is_pending()
            || self.tun_auto_detect_interface.is_pending()
            || self.interface_name.is_pending()
            || paths::PORTS
                .iter()
                .any(|key| self.port(key).is_some_and(Setting::is_pending))
    }

    pub fn port(&self, key: &str) -> Option<&Setting<String>> {
        match key {
            paths::HTTP_PORT => Some(&self.http_port),
            paths::SOCKS_PORT => Some(&self.socks_port),
            paths::MIXED_PORT => Some(&self.mixed_port),
            paths::REDIR_PORT => Some(&self.redir_port),
            paths::TPROXY_PORT => Some(&self.tproxy_port),
            _ => None,
        }
    }

    fn port_mut(&mut self, key: &str) -> Option<&mut Setting<String>> {
        match key {
            paths::HTTP_PORT => Some(&mut self.http_port),
            paths::SOCKS_PORT => Some(&mut self.socks_port),
            paths::MIXED_PORT => Some(&mut self.mixed_port),
            paths::REDIR_PORT => Some(&mut self.redir_port),
            paths::TPROXY_PORT => Some(&mut self.tproxy_port),
            _ => None,
        }
    }

    fn apply_edit(&mut self, edit: &PendingEdit, confirm: bool) -> bool {
        let value = &edit.value;
        match edit.path.as_str() {
            paths::MODE => write(
                &mut self.mode,
                value.as_str().and_then(|s| s.parse().ok()),
                confirm,
            ),
            paths::LOG_LEVEL => write(&mut self.log_level, text(value), confirm),
            paths::ALLOW_LAN => write(&mut self.allow_lan, value.as_bool(), confirm),
            paths::SNIFFING => write(&mut self.sniffing, value.as_bool(), confirm),
            paths::TUN_ENABLE => write(&mut self.tun_enable, value.as_bool(), confirm),
            paths::TUN_DEVICE => write(&mut self.tun_device, text(value), confirm),
            paths::TUN_STACK => write(&mut self.tun_stack, text(value), confirm),
            paths::TUN_AUTO_ROUTE => write(&mut self.tun_auto_route, value.as_bool(), confirm),
            paths::TUN_AUTO_DETECT_INTERFACE => {
                write(&mut self.tun_auto_detect_interface, value.as_bool(), confirm)
            }
            paths::INTERFACE_NAME => write(&mut self.interface_name, text(value), confirm),
            key => match self.port_mut(key) {
                Some(setting) => write(setting, value.as_u64().map(|p| p.to_string()), confirm),
                None => false,
            },
        }
    }
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn write<T: Clone + PartialEq>(setting: &mut Setting<T>, value: Option<T>, confirm: bool) -> bool {
    match value {
        Some(v) if confirm => {
            setting.confirm(v);
            true
        }
        Some(v) => {
            setting.stage(v);
            true
        }
        None => false,
    }
}
