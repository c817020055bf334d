//! Static route table.
//!
//! # Responsibilities
//! - Hold route definitions in declaration order
//! - Validate the table once, at construction
//! - Provide the application's built-in table
//!
//! # Design Decisions
//! - Immutable after construction, shared via Arc
//! - Route identity is the table position (`RouteId`)
//! - Redirect placeholders are checked against the source pattern eagerly

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::routing::error::ConfigurationError;
use crate::routing::pattern::PathPattern;

/// Position of a route in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteId(pub usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a lazily loaded view component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRef {
    /// Component name, the key into the view registry.
    pub component: String,
    /// Module path handed to file-backed loaders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ViewRef {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            module: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// What a route resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    View(ViewRef),
    Redirect(PathPattern),
}

/// A single immutable route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    pub id: RouteId,
    pub pattern: PathPattern,
    /// Display label, never used for matching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub target: RouteTarget,
}

impl RouteDefinition {
    /// Name if present, otherwise the pattern. Used in logs and errors.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.pattern.to_string(),
        }
    }

    pub fn view(&self) -> Option<&ViewRef> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }
}

/// Ordered, validated collection of routes. First match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Arc<RouteDefinition>>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The application's route table.
    pub fn builtin() -> Self {
        Self::builder()
            .view("/", Some("首页"), ViewRef::new("DashboardView").with_module("DashboardView.vue"))
            .redirect("/dashboard", None, "/")
            .view(
                "/plan/:platform/:account",
                Some("平台计划"),
                ViewRef::new("PlatformPlanView").with_module("PlatformPlanView.vue"),
            )
            .view(
                "/creation",
                Some("创作与分发"),
                ViewRef::new("CreationView").with_module("CreationView.vue"),
            )
            .build()
            .expect("built-in route table is valid")
    }

    pub fn routes(&self) -> &[Arc<RouteDefinition>] {
        &self.routes
    }

    pub fn get(&self, id: RouteId) -> Option<&Arc<RouteDefinition>> {
        self.routes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by its display name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<RouteDefinition>> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
    }

    /// Whether the table lists the root path `/`.
    pub fn has_root(&self) -> bool {
        self.routes.iter().any(|r| r.pattern.is_root())
    }

    /// Iterate the view references of every non-redirect route.
    pub fn views(&self) -> impl Iterator<Item = (&RouteDefinition, &ViewRef)> {
        self.routes
            .iter()
            .filter_map(|r| r.view().map(|v| (r.as_ref(), v)))
    }
}

enum PendingTarget {
    View(ViewRef),
    Redirect(String),
}

struct PendingRoute {
    path: String,
    name: Option<String>,
    target: PendingTarget,
}

/// Collects raw route entries and validates them in `build`.
#[derive(Default)]
pub struct RouteTableBuilder {
    pending: Vec<PendingRoute>,
}

impl RouteTableBuilder {
    pub fn view(mut self, path: &str, name: Option<&str>, view: ViewRef) -> Self {
        self.pending.push(PendingRoute {
            path: path.to_string(),
            name: name.map(str::to_string),
            target: PendingTarget::View(view),
        });
        self
    }

    pub fn redirect(mut self, path: &str, name: Option<&str>, to: &str) -> Self {
        self.pending.push(PendingRoute {
            path: path.to_string(),
            name: name.map(str::to_string),
            target: PendingTarget::Redirect(to.to_string()),
        });
        self
    }

    pub fn build(self) -> Result<RouteTable, ConfigurationError> {
        if self.pending.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }

        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(self.pending.len());

        for (index, entry) in self.pending.into_iter().enumerate() {
            let pattern = PathPattern::parse(&entry.path)?;

            if let Some(name) = &entry.name {
                if !names.insert(name.clone()) {
                    return Err(ConfigurationError::DuplicateName(name.clone()));
                }
            }

            let target = match entry.target {
                PendingTarget::View(view) => RouteTarget::View(view),
                PendingTarget::Redirect(to) => {
                    let redirect = PathPattern::parse(&to)?;
                    let bound: HashSet<&str> = pattern.param_names().collect();
                    if let Some(unbound) = redirect.param_names().find(|p| !bound.contains(p)) {
                        return Err(ConfigurationError::UnboundParameter {
                            param: unbound.to_string(),
                            redirect: redirect.to_string(),
                        });
                    }
                    RouteTarget::Redirect(redirect)
                }
            };

            routes.push(Arc::new(RouteDefinition {
                id: RouteId(index),
                pattern,
                name: entry.name,
                target,
            }));
        }

        Ok(RouteTable { routes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let table = RouteTable::builtin();
        assert_eq!(table.len(), 4);
        assert!(table.has_root());

        let dashboard = &table.routes()[1];
        assert_eq!(dashboard.pattern.to_string(), "/dashboard");
        assert_eq!(
            dashboard.target,
            RouteTarget::Redirect(PathPattern::parse("/").unwrap())
        );

        let plan = table.by_name("平台计划").unwrap();
        assert_eq!(plan.id, RouteId(2));
        assert_eq!(plan.view().unwrap().component, "PlatformPlanView");
        assert_eq!(table.views().count(), 3);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = RouteTable::builder().build().unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyTable);
    }

    #[test]
    fn test_unbound_redirect_rejected() {
        let err = RouteTable::builder()
            .redirect("/old/:id", None, "/new/:slug")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnboundParameter {
                param: "slug".into(),
                redirect: "/new/:slug".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = RouteTable::builder()
            .view("/a", Some("same"), ViewRef::new("A"))
            .view("/b", Some("same"), ViewRef::new("B"))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateName("same".into()));
    }

    #[test]
    fn test_label_falls_back_to_pattern() {
        let table = RouteTable::builtin();
        assert_eq!(table.routes()[0].label(), "首页");
        assert_eq!(table.routes()[1].label(), "/dashboard");
    }
}
