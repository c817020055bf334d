//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! resolver / cache / navigator produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges via the metrics facade)
//!
//! Consumers:
//!     → tracing subscriber installed by the binary (stdout)
//!     → whatever metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; the binary decides where output goes
//! - Metrics without an installed recorder are no-ops
//! - Events never replace error propagation

pub mod logging;
pub mod metrics;
