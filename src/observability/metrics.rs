//! Router metrics.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): resolutions by outcome
//! - `router_redirects_total` (counter): redirect hops followed
//! - `router_view_loads_total` (counter): view load results by outcome
//! - `router_view_cache_size` (gauge): cached or in-flight views
//! - `router_navigations_superseded_total` (counter): navigations discarded
//!   because a newer one started
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no exporter is installed here
//! - Low-cardinality labels only (outcome strings, never paths)

/// Record the outcome of one `resolve` call.
pub fn record_resolution(outcome: &'static str) {
    ::metrics::counter!("router_resolutions_total", "outcome" => outcome).increment(1);
}

/// Record one redirect hop.
pub fn record_redirect() {
    ::metrics::counter!("router_redirects_total").increment(1);
}

/// Record a view load result seen by a caller.
pub fn record_view_load(outcome: &'static str) {
    ::metrics::counter!("router_view_loads_total", "outcome" => outcome).increment(1);
}

/// Record current view cache size.
pub fn record_view_cache_size(size: usize) {
    ::metrics::gauge!("router_view_cache_size").set(size as f64);
}

/// Record a navigation whose result was discarded.
pub fn record_superseded() {
    ::metrics::counter!("router_navigations_superseded_total").increment(1);
}
