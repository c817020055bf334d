//! Navigation history subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path) / replace(path) / back()
//!     → navigator.rs (ticket, resolve, load view)
//!     → superseded? discard result
//!     → memory.rs / host History (push or replace final path)
//!     → current navigation swapped in
//! ```
//!
//! # Design Decisions
//! - History storage is behind a trait; the host supplies the real one
//! - Base path prefixing belongs to the history, not the resolver
//! - Failed navigations never change history

pub mod memory;
pub mod navigator;

pub use memory::MemoryHistory;
pub use navigator::{Navigation, NavigationOutcome, Navigator};

/// Storage for the navigation stack.
pub trait History: Send + Sync {
    /// Base path every location is served under, without trailing slash
    /// (`""` for the root).
    fn base(&self) -> &str;

    /// Current router path (base stripped).
    fn location(&self) -> String;

    /// Add an entry after the current one, dropping forward entries.
    fn push(&self, path: &str);

    /// Overwrite the current entry.
    fn replace(&self, path: &str);

    /// Step back, returning the new location, or `None` at the start.
    fn back(&self) -> Option<String>;

    /// Step forward, returning the new location, or `None` at the end.
    fn forward(&self) -> Option<String>;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// External URL for a router path.
    fn href(&self, path: &str) -> String {
        format!("{}{}", self.base(), path)
    }
}

/// Normalize a base path: leading slash, no trailing slash, `""` for root.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Turn an external URL path into a router path by removing `base`.
///
/// Returns `None` when the URL is outside the base.
pub fn strip_base(base: &str, url: &str) -> Option<String> {
    let rest = url.strip_prefix(base)?;
    if rest.is_empty() {
        return Some("/".to_string());
    }
    if rest.starts_with('/') {
        Some(rest.to_string())
    } else if rest.starts_with('?') || rest.starts_with('#') {
        Some(format!("/{}", rest))
    } else {
        None
    }
}
