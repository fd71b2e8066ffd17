//! Remote configuration synchronization.
//!
//! # Data Flow
//! ```text
//! fetch_config(server)
//!     → api::ControllerClient::get_configs
//!     → ConfigSnapshot published on the snapshot channel
//!     → settings.rs derives EditableSettings (displayed = confirmed)
//!
//! update_config(path, value, server)
//!     → settings.rs stages the value (displayed only)
//!     → spawned PATCH /configs
//!     → on 2xx: confirmed = value; snapshot untouched until next fetch
//! ```
//!
//! # Design Decisions
//! - Observers subscribe to `tokio::sync::watch` channels; there is no
//!   implicit global state
//! - Failures are logged and swallowed by the plain operations; the `try_*`
//!   variants return the typed error for callers that care
//! - Requests are never queued, cancelled or de-duplicated; a fetch racing
//!   a PATCH may publish either value

pub mod config_sync;
pub mod ports;
pub mod settings;

pub use config_sync::ConfigSync;
pub use ports::parse_port;
pub use settings::{EditableSettings, Setting};
