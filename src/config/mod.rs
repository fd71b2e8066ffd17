//! CLI configuration.
//!
//! # Data Flow
//! ```text
//! clashdash.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → DashConfig (validated, read-only)
//!     → main.rs picks a Server and builds the HTTP client
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - The server list is only read, never written back
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ClientConfig, DashConfig, LoggingConfig};
pub use validation::ValidationError;
