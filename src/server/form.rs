//! Add/edit form model for server descriptors.

use thiserror::Error;

use crate::server::Server;

/// A single problem with a server form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("server address is required")]
    EmptyHost,

    #[error("port is required")]
    EmptyPort,

    #[error("port '{0}' is not a number between 1 and 65535")]
    InvalidPort(String),

    #[error("secret is required")]
    EmptySecret,
}

/// Editable fields of a server entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerForm {
    pub name: String,
    pub host: String,
    pub port: String,
    pub secret: String,
    pub tls: bool,
}

impl ServerForm {
    /// Pre-fill a form from an existing server.
    pub fn from_server(server: &Server) -> Self {
        Self {
            name: server.name.clone().unwrap_or_default(),
            host: server.host.clone(),
            port: server.port.clone(),
            secret: server.secret.clone(),
            tls: server.tls,
        }
    }

    /// True when the host is a DNS name rather than an IPv4 literal.
    pub fn is_hostname(&self) -> bool {
        !self.host.is_empty() && !is_ipv4_literal(&self.host)
    }

    /// Hostnames are always reached over HTTPS.
    pub fn effective_tls(&self) -> bool {
        self.is_hostname() || self.tls
    }

    pub fn can_submit(&self) -> bool {
        !self.host.is_empty() && !self.port.is_empty() && !self.secret.is_empty()
    }

    /// Check every field, returning all problems found.
    pub fn validate(&self) -> Result<(), Vec<FormError>> {
        let mut errors = Vec::new();

        if self.host.is_empty() {
            errors.push(FormError::EmptyHost);
        }
        if self.port.is_empty() {
            errors.push(FormError::EmptyPort);
        } else if !matches!(self.port.parse::<u16>(), Ok(p) if p > 0) {
            errors.push(FormError::InvalidPort(self.port.clone()));
        }
        if self.secret.is_empty() {
            errors.push(FormError::EmptySecret);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build a new server with a fresh id.
    pub fn build(&self) -> Result<Server, Vec<FormError>> {
        self.validate()?;
        let server = Server::new(self.host.clone(), self.port.clone(), self.secret.clone())
            .with_tls(self.effective_tls());
        Ok(self.label(server))
    }

    /// Produce the edited version of `server`, keeping its id.
    pub fn apply_to(&self, server: &Server) -> Result<Server, Vec<FormError>> {
        self.validate()?;
        let updated = Server {
            id: server.id,
            name: None,
            host: self.host.clone(),
            port: self.port.clone(),
            secret: self.secret.clone(),
            tls: self.effective_tls(),
        };
        Ok(self.label(updated))
    }

    fn label(&self, server: Server) -> Server {
        if self.name.is_empty() {
            server
        } else {
            server.with_name(self.name.clone())
        }
    }
}

/// Matches `^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$`.
fn is_ipv4_literal(host: &str) -> bool {
    let groups: Vec<&str> = host.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(host: &str, port: &str, secret: &str) -> ServerForm {
        ServerForm {
            host: host.into(),
            port: port.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ipv4_is_not_hostname() {
        assert!(!form("10.1.1.2", "9090", "s").is_hostname());
        assert!(!form("999.1.1.2", "9090", "s").is_hostname());
        assert!(form("clash.example.com", "9090", "s").is_hostname());
        assert!(form("10.1.1", "9090", "s").is_hostname());
        assert!(!form("", "9090", "s").is_hostname());
    }

    #[test]
    fn test_hostname_forces_tls() {
        let f = form("clash.example.com", "443", "s");
        assert!(!f.tls);
        assert!(f.effective_tls());
        assert!(f.build().unwrap().tls);

        let f = form("192.168.1.1", "9090", "s");
        assert!(!f.build().unwrap().tls);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let errors = form("", "", "").validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FormError::EmptyHost, FormError::EmptyPort, FormError::EmptySecret]
        );

        let errors = form("h", "0", "s").validate().unwrap_err();
        assert_eq!(errors, vec![FormError::InvalidPort("0".into())]);
    }

    #[test]
    fn test_can_submit() {
        assert!(form("h", "1", "s").can_submit());
        assert!(!form("h", "1", "").can_submit());
    }

    #[test]
    fn test_apply_preserves_id() {
        let original = Server::new("10.0.0.1", "9090", "old").with_name("home");
        let mut f = ServerForm::from_server(&original);
        assert_eq!(f.name, "home");

        f.secret = "new".into();
        f.name.clear();
        let updated = f.apply_to(&original).unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.secret, "new");
        assert_eq!(updated.name, None);
        assert_eq!(original.secret, "old");
    }
}
