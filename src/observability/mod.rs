//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! api / sync / commands / rules
//!     → tracing events with structured fields (server, path, kind)
//!     → logging.rs subscriber (EnvFilter + fmt layer)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; the binary owns the subscriber
//! - Secrets are never recorded as fields

pub mod logging;
