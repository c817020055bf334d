//! Route resolution and view loading.
//!
//! # Responsibilities
//! - Classify a navigation request against the route table
//! - Extract path parameters
//! - Follow redirects with loop protection
//! - Load the selected view through the single-flight cache
//!
//! # Design Decisions
//! - First match in table order wins, no specificity ranking
//! - Redirect chains are bounded by a visited set and `max_redirects`
//! - Unknown components are rejected when the resolver is built
//! - Errors are always returned, never swallowed or retried

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::observability::metrics;
use crate::routing::error::{ConfigurationError, RouteError, RouteResult, ViewLoadError};
use crate::routing::params::RouteParams;
use crate::routing::pattern::split_segments;
use crate::routing::table::{RouteDefinition, RouteTable, RouteTarget};
use crate::view::{View, ViewCache, ViewRegistry};

/// Default bound on redirect hops per request.
pub const DEFAULT_MAX_REDIRECTS: usize = 16;

/// An incoming path with its query and fragment split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl NavigationRequest {
    /// Split `raw` into path, query and hash. The path must start with `/`.
    pub fn parse(raw: &str) -> RouteResult<Self> {
        let (rest, hash) = match raw.split_once('#') {
            Some((rest, hash)) => (rest, Some(hash.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(raw.to_string()));
        }

        Ok(Self {
            path: normalize(path),
            query,
            hash,
        })
    }
}

impl fmt::Display for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(hash) = &self.hash {
            write!(f, "#{}", hash)?;
        }
        Ok(())
    }
}

/// Drop a single trailing slash, except on the root path. A path ending in
/// `//` is left alone so its empty segment fails matching.
fn normalize(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() && !stripped.ends_with('/') => {
            stripped.to_string()
        }
        _ => path.to_string(),
    }
}

/// One matching step, before any redirect is followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Arc<RouteDefinition>,
    pub params: RouteParams,
    pub path: String,
}

impl RouteMatch {
    /// Substituted redirect path, or `None` for view routes.
    pub fn redirect_path(&self) -> Option<RouteResult<String>> {
        match &self.route.target {
            RouteTarget::Redirect(target) => {
                Some(target.substitute(&self.params).map_err(RouteError::from))
            }
            RouteTarget::View(_) => None,
        }
    }
}

/// Final outcome of `resolve`: always a view route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub route: Arc<RouteDefinition>,
    pub params: RouteParams,
    /// Path after all redirects were applied.
    pub path: String,
    /// Paths that redirected here, oldest first.
    pub redirected_from: Vec<String>,
    pub query: Option<String>,
    pub hash: Option<String>,
}

impl ResolvedRoute {
    /// Path with query and hash restored, as pushed to history.
    pub fn full_path(&self) -> String {
        NavigationRequest {
            path: self.path.clone(),
            query: self.query.clone(),
            hash: self.hash.clone(),
        }
        .to_string()
    }

    pub fn name(&self) -> Option<&str> {
        self.route.name.as_deref()
    }
}

impl Serialize for ResolvedRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedRoute", 6)?;
        state.serialize_field("route", self.route.as_ref())?;
        state.serialize_field("params", &self.params)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("redirected_from", &self.redirected_from)?;
        state.serialize_field("query", &self.query)?;
        state.serialize_field("hash", &self.hash)?;
        state.end()
    }
}

/// Resolves navigation requests against a route table.
///
/// Explicitly constructed and shared via `Arc`; there is no global instance.
pub struct RouteResolver {
    table: Arc<RouteTable>,
    registry: ViewRegistry,
    cache: ViewCache,
    max_redirects: usize,
}

impl RouteResolver {
    /// Build a resolver, checking that every view component has a loader.
    pub fn new(table: RouteTable, registry: ViewRegistry) -> RouteResult<Self> {
        for (route, view) in table.views() {
            if !registry.contains(&view.component) {
                return Err(ConfigurationError::UnknownComponent {
                    route: route.pattern.to_string(),
                    component: view.component.clone(),
                }
                .into());
            }
        }

        tracing::debug!(routes = table.len(), "Route resolver initialized");

        Ok(Self {
            table: Arc::new(table),
            registry,
            cache: ViewCache::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        })
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    pub fn cache(&self) -> &ViewCache {
        &self.cache
    }

    /// Match `path` against the table without following redirects.
    pub fn match_path(&self, path: &str) -> RouteResult<RouteMatch> {
        let request = NavigationRequest::parse(path)?;
        self.match_normalized(&request.path)
    }

    fn match_normalized(&self, path: &str) -> RouteResult<RouteMatch> {
        let segments =
            split_segments(path).ok_or_else(|| RouteError::InvalidPath(path.to_string()))?;

        self.table
            .routes()
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| RouteMatch {
                    route: Arc::clone(route),
                    params,
                    path: path.to_string(),
                })
            })
            .ok_or_else(|| RouteError::NotFound {
                path: path.to_string(),
            })
    }

    /// Resolve `path` to a view route, following redirects.
    pub fn resolve(&self, path: &str) -> RouteResult<ResolvedRoute> {
        let result = self.resolve_inner(path);
        match &result {
            Ok(resolved) => {
                tracing::debug!(
                    path = %path,
                    route = %resolved.route.label(),
                    redirects = resolved.redirected_from.len(),
                    "Route resolved"
                );
                metrics::record_resolution("resolved");
            }
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Route resolution failed");
                metrics::record_resolution(outcome_label(e));
            }
        }
        result
    }

    fn resolve_inner(&self, path: &str) -> RouteResult<ResolvedRoute> {
        let request = NavigationRequest::parse(path)?;
        let mut current = request.path;
        let mut chain: Vec<String> = Vec::new();

        loop {
            let matched = self.match_normalized(&current)?;
            let route = Arc::clone(&matched.route);

            let target = match &route.target {
                RouteTarget::View(_) => {
                    return Ok(ResolvedRoute {
                        route: matched.route,
                        params: matched.params,
                        path: current,
                        redirected_from: chain,
                        query: request.query,
                        hash: request.hash,
                    });
                }
                RouteTarget::Redirect(target) => target,
            };

            let next = target.substitute(&matched.params)?;
            chain.push(current);

            if chain.contains(&next) || chain.len() > self.max_redirects {
                chain.push(next);
                return Err(RouteError::RedirectLoop { chain });
            }

            tracing::trace!(from = %chain[chain.len() - 1], to = %next, "Following redirect");
            metrics::record_redirect();
            current = next;
        }
    }

    /// Load the view behind `route`, at most once while loads succeed.
    pub async fn load_view(&self, route: &RouteDefinition) -> RouteResult<View> {
        // The cache is keyed by position, so the route must be this table's own
        match self.table.get(route.id) {
            Some(own) if **own == *route => {}
            _ => return Err(ConfigurationError::ForeignRoute(route.label()).into()),
        }
        let view = route
            .view()
            .ok_or_else(|| ConfigurationError::NotAView(route.label()))?;
        let loader = self.registry.loader_for(&view.component).ok_or_else(|| {
            ConfigurationError::UnknownComponent {
                route: route.pattern.to_string(),
                component: view.component.clone(),
            }
        })?;

        self.cache
            .get_or_load(route.id, || loader.load(view))
            .await
            .map_err(|e| {
                ViewLoadError {
                    route: route.pattern.to_string(),
                    component: view.component.clone(),
                    message: e.0,
                }
                .into()
            })
    }

    /// Resolve `path` and load its view.
    pub async fn resolve_and_load(&self, path: &str) -> RouteResult<(ResolvedRoute, View)> {
        let resolved = self.resolve(path)?;
        let view = self.load_view(&resolved.route).await?;
        Ok((resolved, view))
    }
}

impl fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteResolver")
            .field("routes", &self.table.len())
            .field("registry", &self.registry)
            .field("cached_views", &self.cache.len())
            .field("max_redirects", &self.max_redirects)
            .finish()
    }
}

fn outcome_label(e: &RouteError) -> &'static str {
    match e {
        RouteError::InvalidPath(_) => "invalid_path",
        RouteError::NotFound { .. } => "not_found",
        RouteError::Configuration(_) => "configuration_error",
        RouteError::RedirectLoop { .. } => "redirect_loop",
        RouteError::ViewLoad(_) => "view_load_error",
    }
}
