//! Proxy-core control API client.
//!
//! # Data Flow
//! ```text
//! Server descriptor
//!     → client.rs (URL + Authorization/Content-Type headers)
//!     → reqwest (single attempt, platform default timeouts)
//!     → status check (2xx only)
//!     → types.rs (JSON decode)
//!     → ApiResult<T> (error.rs classifies failures)
//! ```
//!
//! # Design Decisions
//! - No retries and no de-duplication; every call is one HTTP request
//! - Construction failures are reported before any I/O happens
//! - Bodies are read as text first so decode errors are distinguishable
//!   from transport errors

pub mod client;
pub mod error;
pub mod types;

pub use client::ControllerClient;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use types::{ConfigSnapshot, Mode, PendingEdit, TunSnapshot};
