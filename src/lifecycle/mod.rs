//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build route table → Build view registry
//!         → RouteResolver → Navigator (with history backend)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then table, then loaders
//! - Configuration errors are fatal at startup, never deferred to navigation

pub mod startup;

pub use startup::{build_navigator, build_registry, build_resolver};
