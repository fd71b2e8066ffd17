//! Client library for the proxy-core (Clash-compatible) HTTP control API.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller (CLI, UI layer)
//!        │
//!        ├──▶ sync::ConfigSync ──────┐   fetch / PATCH /configs
//!        ├──▶ commands::Dispatcher ──┤   reload, geo, fakeip, restart, upgrade
//!        └──▶ rules::RuleBrowser ────┤   /rules, /providers/rules
//!                                    ▼
//!                        api::ControllerClient ──▶ proxy-core controller
//!                                    ▲
//!                        server::Server (host, port, secret, tls)
//! ```
//!
//! Observers receive results through `tokio::sync::watch` channels; the
//! `try_*` operations return `api::ApiResult` for callers that need to tell
//! failures apart.

// Core subsystems
pub mod api;
pub mod commands;
pub mod rules;
pub mod server;
pub mod sync;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use api::{ApiError, ApiResult, ConfigSnapshot, ControllerClient, PendingEdit};
pub use commands::{Command, Dispatcher};
pub use rules::RuleBrowser;
pub use server::Server;
pub use sync::ConfigSync;
