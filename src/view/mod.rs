//! Lazy view loading subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedRoute (view target)
//!     → registry lookup (component → ViewLoader)
//!     → cache.rs (single-flight shared future per RouteId)
//!     → loader.rs (external async load, first caller only)
//!     → View (cached, cloned to every caller)
//! ```
//!
//! # Design Decisions
//! - A route's loader runs at most once while loads succeed
//! - Failures reach every waiting caller, then the entry is dropped
//! - Views are cheap shared handles

pub mod cache;
pub mod loader;
pub mod types;

pub use cache::ViewCache;
pub use loader::{FileLoader, FnLoader, StaticLoader, ViewLoader, ViewRegistry};
pub use types::{LoadFailure, View};
