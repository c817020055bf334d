//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming navigation (path?query#hash)
//!     → resolver.rs (split request, normalize trailing slash)
//!     → pattern.rs (segment-by-segment match, capture params)
//!     → redirect? substitute params → match again (bounded)
//!     → Return: ResolvedRoute or RouteError
//!
//! Table construction (at startup):
//!     route entries
//!     → table.rs (parse patterns, check redirect params, unique names)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built once, immutable at runtime
//! - No regex or wildcards, exact segment counts only
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod error;
pub mod params;
pub mod pattern;
pub mod resolver;
pub mod table;

pub use error::{ConfigurationError, RouteError, RouteResult, ViewLoadError};
pub use params::RouteParams;
pub use pattern::{PathPattern, Segment};
pub use resolver::{NavigationRequest, ResolvedRoute, RouteMatch, RouteResolver};
pub use table::{RouteDefinition, RouteId, RouteTable, RouteTarget, ViewRef};
