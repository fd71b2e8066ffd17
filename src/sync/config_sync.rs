//! Config Sync Client.

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ApiResult, ConfigSnapshot, ControllerClient, PendingEdit};
use crate::server::Server;
use crate::sync::ports::parse_port;
use crate::sync::settings::EditableSettings;

/// Shared handle over the latest snapshot and editable settings.
///
/// Clones share the same channels.
#[derive(Clone)]
pub struct ConfigSync {
    inner: Arc<Inner>,
}

struct Inner {
    client: ControllerClient,
    snapshot: watch::Sender<Option<Arc<ConfigSnapshot>>>,
    settings: watch::Sender<EditableSettings>,
}

impl ConfigSync {
    pub fn new(client: ControllerClient) -> Self {
        let (snapshot, _) = watch::channel(None);
        let (settings, _) = watch::channel(EditableSettings::default());
        Self {
            inner: Arc::new(Inner {
                client,
                snapshot,
                settings,
            }),
        }
    }

    /// Notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ConfigSnapshot>>> {
        self.inner.snapshot.subscribe()
    }

    /// Notified whenever editable settings change.
    pub fn subscribe_settings(&self) -> watch::Receiver<EditableSettings> {
        self.inner.settings.subscribe()
    }

    /// Latest published snapshot, if any fetch has succeeded.
    pub fn snapshot(&self) -> Option<Arc<ConfigSnapshot>> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn settings(&self) -> EditableSettings {
        self.inner.settings.borrow().clone()
    }

    /// Fetch `/configs` and publish the result.
    ///
    /// On any failure the previous snapshot stays current and nothing is
    /// published.
    pub async fn try_fetch_config(&self, server: &Server) -> ApiResult<Arc<ConfigSnapshot>> {
        let snapshot = Arc::new(self.inner.client.get_configs(server).await?);

        self.inner
            .settings
            .send_modify(|settings| settings.apply_snapshot(&snapshot));
        self.inner.snapshot.send_replace(Some(snapshot.clone()));

        tracing::debug!(server = %server.display_name(), mode = %snapshot.mode, "Config snapshot published");
        Ok(snapshot)
    }

    /// Fetch `/configs`, logging and swallowing any failure.
    pub async fn fetch_config(&self, server: &Server) {
        if let Err(e) = self.try_fetch_config(server).await {
            tracing::warn!(
                server = %server.display_name(),
                kind = ?e.kind(),
                error = %e,
                "Failed to fetch config, keeping last snapshot"
            );
        }
    }

    /// Send one PATCH and record the acknowledgement in the settings.
    ///
    /// Never touches the snapshot. The displayed value follows the
    /// acknowledged one unless a newer local edit is still pending.
    pub async fn try_update_config(&self, server: &Server, edit: &PendingEdit) -> ApiResult<()> {
        self.inner.client.patch_configs(server, edit).await?;
        self.inner.settings.send_modify(|settings| {
            settings.confirm(edit);
        });
        Ok(())
    }

    /// Optimistically stage `path = value` and PATCH it in the background.
    ///
    /// The outcome is only logged. The returned handle may be dropped; it
    /// exists so callers can wait for the request to finish. Must be called
    /// from within a Tokio runtime.
    pub fn update_config(
        &self,
        path: &str,
        value: impl Into<Value>,
        server: &Server,
    ) -> JoinHandle<()> {
        let edit = PendingEdit::new(path, value);
        self.inner.settings.send_if_modified(|settings| settings.stage(&edit));

        let this = self.clone();
        let server = server.clone();
        tokio::spawn(async move {
            match this.try_update_config(&server, &edit).await {
                Ok(()) => tracing::info!(
                    server = %server.display_name(),
                    path = %edit.path,
                    value = %edit.value,
                    "Config updated"
                ),
                Err(e) => tracing::warn!(
                    server = %server.display_name(),
                    path = %edit.path,
                    value = %edit.value,
                    kind = ?e.kind(),
                    error = %e,
                    "Config update failed"
                ),
            }
        })
    }

    /// Validate a port entry and dispatch it.
    ///
    /// Returns false, without any network call, when `port` is not an
    /// integer in `0..=65535`. True means the PATCH was dispatched, not that
    /// the controller applied it. Outside a Tokio runtime nothing can be
    /// dispatched and the call returns false.
    pub fn validate_and_update_port(&self, port: &str, config_key: &str, server: &Server) -> bool {
        match parse_port(port) {
            Some(_) if Handle::try_current().is_err() => {
                tracing::warn!(key = %config_key, "No Tokio runtime, port update not dispatched");
                false
            }
            Some(value) => {
                // Detached: the outcome is logged by the task.
                drop(self.update_config(config_key, value, server));
                true
            }
            None => {
                tracing::debug!(input = %port, key = %config_key, "Rejected port input");
                false
            }
        }
    }
}

impl std::fmt::Debug for ConfigSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSync")
            .field("has_snapshot", &self.inner.snapshot.borrow().is_some())
            .finish()
    }
}
