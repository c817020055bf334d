//! Startup wiring from configuration to a ready navigator.

use std::sync::Arc;

use crate::config::RouterConfig;
use crate::history::{History, MemoryHistory, Navigator};
use crate::routing::{RouteResolver, RouteResult};
use crate::view::{FileLoader, StaticLoader, ViewRegistry};

/// Loader registry for `config`: file-backed when `views.dir` is set.
pub fn build_registry(config: &RouterConfig) -> ViewRegistry {
    match &config.views.dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "Loading views from directory");
            ViewRegistry::with_fallback(FileLoader::new(dir))
        }
        None => ViewRegistry::with_fallback(StaticLoader),
    }
}

/// Build the resolver described by `config` with the given registry.
pub fn build_resolver(config: &RouterConfig, registry: ViewRegistry) -> RouteResult<RouteResolver> {
    let table = config.route_table()?;
    let resolver = RouteResolver::new(table, registry)?.with_max_redirects(config.max_redirects);

    tracing::info!(
        routes = resolver.table().len(),
        max_redirects = config.max_redirects,
        "Route table loaded"
    );
    Ok(resolver)
}

/// Build a navigator over an in-memory history rooted at `config.base_path`.
pub fn build_navigator(config: &RouterConfig) -> RouteResult<Navigator> {
    let resolver = build_resolver(config, build_registry(config))?;
    let history: Arc<dyn History> = Arc::new(MemoryHistory::new(&config.base_path));
    Ok(Navigator::new(Arc::new(resolver), history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[tokio::test]
    async fn test_build_from_default_config() {
        let navigator = build_navigator(&RouterConfig::default()).unwrap();
        let outcome = navigator.start().await.unwrap();
        let nav = outcome.navigation().unwrap();
        assert_eq!(nav.view.component(), "DashboardView");
    }

    #[test]
    fn test_max_redirects_applied() {
        let config = parse_config(
            r#"
            max_redirects = 1

            [[routes]]
            path = "/"
            component = "DashboardView"

            [[routes]]
            path = "/a"
            redirect = "/b"

            [[routes]]
            path = "/b"
            redirect = "/"
            "#,
        )
        .unwrap();

        let resolver = build_resolver(&config, build_registry(&config)).unwrap();
        assert!(resolver.resolve("/b").is_ok());
        assert!(resolver.resolve("/a").is_err());
    }

    #[test]
    fn test_base_path_applied() {
        let mut config = RouterConfig::default();
        config.base_path = "/console/".into();
        let navigator = build_navigator(&config).unwrap();
        assert_eq!(navigator.history().href("/creation"), "/console/creation");
    }
}
