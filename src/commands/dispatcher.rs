//! Command Dispatcher.

use reqwest::Method;
use serde_json::json;

use crate::api::{ApiResult, ControllerClient};
use crate::server::Server;

/// One-shot administrative action on the proxy-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Force a reload of the configuration file.
    ReloadConfig,
    /// Re-download GEO databases.
    UpdateGeo,
    /// Drop all FakeIP mappings.
    FlushFakeIp,
    RestartCore,
    UpgradeCore,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::ReloadConfig,
        Command::UpdateGeo,
        Command::FlushFakeIp,
        Command::RestartCore,
        Command::UpgradeCore,
    ];

    pub fn method(&self) -> Method {
        match self {
            Command::ReloadConfig => Method::PUT,
            _ => Method::POST,
        }
    }

    /// Controller path, including any query string.
    pub fn path(&self) -> &'static str {
        match self {
            Command::ReloadConfig => "configs?force=true",
            Command::UpdateGeo => "configs/geo",
            Command::FlushFakeIp => "cache/fakeip/flush",
            Command::RestartCore => "restart",
            Command::UpgradeCore => "upgrade",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Command::ReloadConfig => "config reload",
            Command::UpdateGeo => "GEO database update",
            Command::FlushFakeIp => "FakeIP cache flush",
            Command::RestartCore => "core restart",
            Command::UpgradeCore => "core upgrade",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Fires maintenance commands at a controller.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    client: ControllerClient,
}

impl Dispatcher {
    pub fn new(client: ControllerClient) -> Self {
        Self { client }
    }

    /// Send `command` and return the typed outcome.
    pub async fn try_dispatch(&self, server: &Server, command: Command) -> ApiResult<()> {
        self.client
            .send_json(command.method(), server, command.path(), &json!({}))
            .await
    }

    /// Send `command`; true iff the controller answered 2xx.
    pub async fn dispatch(&self, server: &Server, command: Command) -> bool {
        match self.try_dispatch(server, command).await {
            Ok(()) => {
                tracing::info!(server = %server.display_name(), command = %command, "Command succeeded");
                true
            }
            Err(e) => {
                tracing::warn!(
                    server = %server.display_name(),
                    command = %command,
                    kind = ?e.kind(),
                    error = %e,
                    "Command failed"
                );
                false
            }
        }
    }

    pub async fn reload_config(&self, server: &Server) -> bool {
        self.dispatch(server, Command::ReloadConfig).await
    }

    pub async fn update_geo_database(&self, server: &Server) -> bool {
        self.dispatch(server, Command::UpdateGeo).await
    }

    pub async fn flush_fake_ip(&self, server: &Server) -> bool {
        self.dispatch(server, Command::FlushFakeIp).await
    }

    pub async fn restart_core(&self, server: &Server) -> bool {
        self.dispatch(server, Command::RestartCore).await
    }

    pub async fn upgrade_core(&self, server: &Server) -> bool {
        self.dispatch(server, Command::UpgradeCore).await
    }
}
