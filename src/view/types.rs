//! View handle and loader failure types.

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
struct ViewInner {
    component: String,
    source: String,
}

/// A loaded, renderable view component.
///
/// Cloning is cheap and clones share the same allocation, so a cached view
/// handed to many navigations is one component reference.
#[derive(Clone, PartialEq, Eq)]
pub struct View {
    inner: Arc<ViewInner>,
}

impl View {
    pub fn new(component: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ViewInner {
                component: component.into(),
                source: source.into(),
            }),
        }
    }

    pub fn component(&self) -> &str {
        &self.inner.component
    }

    /// Loaded module content. Empty for statically registered views.
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// True when both handles point at the same loaded component.
    pub fn ptr_eq(a: &View, b: &View) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("component", &self.inner.component)
            .field("source_len", &self.inner.source.len())
            .finish()
    }
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("View", 2)?;
        state.serialize_field("component", self.component())?;
        state.serialize_field("source_bytes", &self.source().len())?;
        state.end()
    }
}

/// Reason reported by a loader that could not produce a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LoadFailure(pub String);

impl LoadFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<std::io::Error> for LoadFailure {
    fn from(e: std::io::Error) -> Self {
        Self(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_component() {
        let view = View::new("DashboardView", "<template/>");
        let clone = view.clone();
        assert!(View::ptr_eq(&view, &clone));

        let other = View::new("DashboardView", "<template/>");
        assert_eq!(view, other);
        assert!(!View::ptr_eq(&view, &other));
    }

    #[test]
    fn test_serialize_summary() {
        let view = View::new("CreationView", "abc");
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["component"], "CreationView");
        assert_eq!(json["source_bytes"], 3);
    }
}
