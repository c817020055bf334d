//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::resolver::DEFAULT_MAX_REDIRECTS;
use crate::routing::{ConfigurationError, RouteTable, ViewRef};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path the application is served under (e.g., "/console/").
    pub base_path: String,

    /// Maximum redirect hops per navigation.
    pub max_redirects: usize,

    /// View loading settings.
    pub views: ViewsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions in match order. Empty means the built-in table.
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            views: ViewsConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: Vec::new(),
        }
    }
}

impl RouterConfig {
    /// Build the route table described by this config.
    pub fn route_table(&self) -> Result<RouteTable, ConfigurationError> {
        if self.routes.is_empty() {
            return Ok(RouteTable::builtin());
        }

        let mut builder = RouteTable::builder();
        for route in &self.routes {
            builder = match (&route.component, &route.redirect) {
                (Some(component), None) => {
                    let mut view = ViewRef::new(component.as_str());
                    if let Some(module) = &route.module {
                        view = view.with_module(module.as_str());
                    }
                    builder.view(&route.path, route.name.as_deref(), view)
                }
                (None, Some(to)) => builder.redirect(&route.path, route.name.as_deref(), to),
                _ => return Err(ConfigurationError::AmbiguousTarget(route.path.clone())),
            };
        }
        builder.build()
    }
}

/// A single route entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path template (e.g., "/plan/:platform/:account").
    pub path: String,

    /// Display label.
    #[serde(default)]
    pub name: Option<String>,

    /// Component to load lazily. Exclusive with `redirect`.
    #[serde(default)]
    pub component: Option<String>,

    /// Module path for file-backed loading, relative to `views.dir`.
    #[serde(default)]
    pub module: Option<String>,

    /// Redirect target template. Exclusive with `component`.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// View loading configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Directory holding view modules. Views load statically when unset.
    pub dir: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_builtin() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_path, "/");
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.observability.log_level, "info");

        let table = config.route_table().unwrap();
        assert_eq!(table.len(), RouteTable::builtin().len());
    }

    #[test]
    fn test_parse_routes() {
        let config: RouterConfig = toml::from_str(
            r#"
            base_path = "/console/"

            [views]
            dir = "views"

            [[routes]]
            path = "/"
            name = "首页"
            component = "DashboardView"
            module = "DashboardView.vue"

            [[routes]]
            path = "/dashboard"
            redirect = "/"
            "#,
        )
        .unwrap();

        assert_eq!(config.views.dir.as_deref(), Some("views"));
        let table = config.route_table().unwrap();
        assert_eq!(table.len(), 2);
        let home = table.routes()[0].view().unwrap();
        assert_eq!(home.module.as_deref(), Some("DashboardView.vue"));
        assert!(table.routes()[1].is_redirect());
    }

    #[test]
    fn test_ambiguous_target() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            path = "/x"
            component = "X"
            redirect = "/"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.route_table().unwrap_err(),
            ConfigurationError::AmbiguousTarget("/x".into())
        );
    }
}
