//! Client-side route resolution for the dashboard application.
//!
//! Maps navigation paths to lazily loaded views: an ordered, first-match
//! route table with path parameters and redirects, a single-flight view
//! cache, and a navigator that commits results to a history backend.
//!
//! ```text
//! path ──► RouteResolver::resolve ──► ResolvedRoute ──► load_view ──► View
//!              (routing)                                  (view)
//!                    ▲                                       │
//!                    └──────────── Navigator (history) ◄─────┘
//! ```

pub mod config;
pub mod history;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use history::{History, MemoryHistory, Navigation, NavigationOutcome, Navigator};
pub use routing::{ResolvedRoute, RouteError, RouteResolver, RouteTable};
pub use view::{View, ViewLoader, ViewRegistry};
