//! Maintenance command dispatch.
//!
//! # Endpoints
//! ```text
//! ReloadConfig  PUT  /configs?force=true
//! UpdateGeo     POST /configs/geo
//! FlushFakeIp   POST /cache/fakeip/flush
//! RestartCore   POST /restart
//! UpgradeCore   POST /upgrade
//! ```
//!
//! Every command sends an empty JSON object and is judged by status code
//! alone. Commands are single-shot: no retries, no rollback.

pub mod dispatcher;

pub use dispatcher::{Command, Dispatcher};
