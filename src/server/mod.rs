//! Remote controller descriptors.
//!
//! # Data Flow
//! ```text
//! user input / config file
//!     → form.rs (ServerForm: validation, HTTPS enforcement)
//!     → descriptor.rs (Server: immutable, identified by UUID)
//!     → passed by reference into every api/sync/commands call
//! ```
//!
//! # Design Decisions
//! - A `Server` is never mutated; editing produces a new value with the same id
//! - The port stays a string as entered, so a bad host/port pair surfaces as a
//!   URL construction error before any network I/O

pub mod descriptor;
pub mod form;

pub use descriptor::Server;
pub use form::{FormError, ServerForm};
