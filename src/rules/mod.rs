//! Routing rules and rule providers.
//!
//! # Data Flow
//! ```text
//! GET /rules ───────────┐
//!                       ├→ book.rs (RuleBook: RuleSet rules joined to providers)
//! GET /providers/rules ─┘      → browser.rs publishes on a watch channel
//!
//! PUT /providers/rules/{name} → re-fetch both
//! ```

pub mod book;
pub mod browser;
pub mod types;

pub use book::{RuleBook, RuleListItem};
pub use browser::RuleBrowser;
pub use types::{Rule, RuleProvider};
