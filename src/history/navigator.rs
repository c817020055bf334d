//! Navigation driver.
//!
//! # Responsibilities
//! - Resolve a path, load its view, and commit it to history
//! - Discard navigations superseded by a newer one
//! - Track the current navigation
//!
//! # Design Decisions
//! - Every navigation takes a ticket from a monotonic counter; only the
//!   newest ticket may commit
//! - Superseded loads are not aborted, their results are dropped
//! - Errors leave history and the current navigation untouched

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::history::History;
use crate::observability::metrics;
use crate::routing::{ResolvedRoute, RouteResolver, RouteResult};
use crate::view::View;

/// A committed navigation.
#[derive(Debug, Clone)]
pub struct Navigation {
    pub route: ResolvedRoute,
    pub view: View,
}

/// Result of a navigation that did not fail.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// Committed and now current.
    Completed(Arc<Navigation>),
    /// A newer navigation started before this one finished loading.
    Superseded,
}

impl NavigationOutcome {
    pub fn navigation(&self) -> Option<&Arc<Navigation>> {
        match self {
            NavigationOutcome::Completed(nav) => Some(nav),
            NavigationOutcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationOutcome::Superseded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Commit {
    Push,
    Replace,
    /// History already moved (back/forward).
    Pop,
}

/// Drives navigation for one resolver and one history.
pub struct Navigator {
    resolver: Arc<RouteResolver>,
    history: Arc<dyn History>,
    generation: AtomicU64,
    current: ArcSwapOption<Navigation>,
}

impl Navigator {
    pub fn new(resolver: Arc<RouteResolver>, history: Arc<dyn History>) -> Self {
        Self {
            resolver,
            history,
            generation: AtomicU64::new(0),
            current: ArcSwapOption::empty(),
        }
    }

    pub fn resolver(&self) -> &Arc<RouteResolver> {
        &self.resolver
    }

    pub fn history(&self) -> &Arc<dyn History> {
        &self.history
    }

    /// The last committed navigation.
    pub fn current(&self) -> Option<Arc<Navigation>> {
        self.current.load_full()
    }

    /// Resolve the history's current location as the initial navigation.
    pub async fn start(&self) -> RouteResult<NavigationOutcome> {
        let location = self.history.location();
        self.run(&location, Commit::Replace).await
    }

    /// Navigate to `path`, adding a history entry.
    pub async fn navigate(&self, path: &str) -> RouteResult<NavigationOutcome> {
        self.run(path, Commit::Push).await
    }

    /// Navigate to `path`, replacing the current history entry.
    pub async fn replace(&self, path: &str) -> RouteResult<NavigationOutcome> {
        self.run(path, Commit::Replace).await
    }

    /// Go back one entry. `Ok(None)` at the start of history.
    pub async fn back(&self) -> RouteResult<Option<NavigationOutcome>> {
        let Some(location) = self.history.back() else {
            return Ok(None);
        };
        match self.run(&location, Commit::Pop).await {
            Ok(outcome) => Ok(Some(outcome)),
            Err(e) => {
                self.history.forward();
                Err(e)
            }
        }
    }

    async fn run(&self, path: &str, commit: Commit) -> RouteResult<NavigationOutcome> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(path = %path, ticket, "Navigation started");

        let route = self.resolver.resolve(path)?;
        let view = self.resolver.load_view(&route.route).await?;

        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(path = %path, ticket, "Navigation superseded, result discarded");
            metrics::record_superseded();
            return Ok(NavigationOutcome::Superseded);
        }

        let full_path = route.full_path();
        match commit {
            Commit::Push if self.history.location() != full_path => self.history.push(&full_path),
            Commit::Push => {}
            Commit::Replace => self.history.replace(&full_path),
            // Popped entries that redirected are rewritten in place
            Commit::Pop if full_path != path => self.history.replace(&full_path),
            Commit::Pop => {}
        }

        let navigation = Arc::new(Navigation { route, view });
        self.current.store(Some(Arc::clone(&navigation)));

        tracing::info!(
            path = %full_path,
            route = %navigation.route.route.label(),
            component = %navigation.view.component(),
            "Navigation completed"
        );

        Ok(NavigationOutcome::Completed(navigation))
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("resolver", &self.resolver)
            .field("location", &self.history.location())
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::routing::{RouteError, RouteTable};
    use crate::view::{StaticLoader, ViewRegistry};

    fn resolver() -> Arc<RouteResolver> {
        let registry = ViewRegistry::with_fallback(StaticLoader);
        Arc::new(RouteResolver::new(RouteTable::builtin(), registry).unwrap())
    }

    fn navigator() -> (Navigator, Arc<MemoryHistory>) {
        let history = Arc::new(MemoryHistory::default());
        (Navigator::new(resolver(), history.clone()), history)
    }

    #[tokio::test]
    async fn test_navigate_pushes_final_path() {
        let (nav, history) = navigator();

        let outcome = nav.navigate("/plan/wechat/acct123").await.unwrap();
        let committed = outcome.navigation().unwrap();
        assert_eq!(committed.view.component(), "PlatformPlanView");
        assert_eq!(history.location(), "/plan/wechat/acct123");

        // Alias resolves to root and records "/" rather than "/dashboard"
        nav.navigate("/dashboard").await.unwrap();
        assert_eq!(history.location(), "/");
        assert_eq!(history.len(), 3);
        assert_eq!(nav.current().unwrap().route.name(), Some("首页"));
    }

    #[tokio::test]
    async fn test_start_replaces_initial_entry() {
        let history = Arc::new(MemoryHistory::with_location("/", "/dashboard"));
        let nav = Navigator::new(resolver(), history.clone());

        nav.start().await.unwrap();
        assert_eq!(history.entries(), vec!["/"]);
    }

    #[tokio::test]
    async fn test_error_leaves_history_untouched() {
        let (nav, history) = navigator();
        nav.navigate("/creation").await.unwrap();

        let err = nav.navigate("/unknown").await.unwrap_err();
        assert!(matches!(err, RouteError::NotFound { .. }));
        assert_eq!(history.entries(), vec!["/", "/creation"]);
        assert_eq!(nav.current().unwrap().route.path, "/creation");
    }

    #[tokio::test]
    async fn test_back() {
        let (nav, history) = navigator();
        nav.navigate("/creation").await.unwrap();

        let outcome = nav.back().await.unwrap().unwrap();
        assert_eq!(outcome.navigation().unwrap().route.path, "/");
        assert_eq!(history.location(), "/");

        assert!(nav.back().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_same_location_not_pushed_twice() {
        let (nav, history) = navigator();
        nav.navigate("/creation").await.unwrap();
        nav.navigate("/creation/").await.unwrap();
        assert_eq!(history.len(), 2);

        assert!(nav.navigate("/creation//").await.is_err());
        assert_eq!(history.entries(), vec!["/", "/creation"]);
    }
}
