//! Shared loaders and fixtures for integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use tokio::sync::Notify;
use view_router::routing::{RouteTable, ViewRef};
use view_router::view::{LoadFailure, StaticLoader, View, ViewLoader, ViewRegistry};
use view_router::RouteResolver;

/// Loader that counts invocations, can fail its first calls, and can wait on a gate.
#[derive(Clone, Default)]
pub struct CountingLoader {
    pub calls: Arc<AtomicU32>,
    fail_first: u32,
    gate: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl CountingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the first `n` loads.
    pub fn failing_first(mut self, n: u32) -> Self {
        self.fail_first = n;
        self
    }

    /// Hold every load until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ViewLoader for CountingLoader {
    fn load(&self, view: &ViewRef) -> BoxFuture<'static, Result<View, LoadFailure>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let fail = call < self.fail_first;
        let gate = self.gate.clone();
        let component = view.component.clone();

        async move {
            match gate {
                Some(gate) => gate.notified().await,
                None => tokio::task::yield_now().await,
            }
            if fail {
                Err(LoadFailure::new("network error"))
            } else {
                Ok(View::new(component, "<template/>"))
            }
        }
        .boxed()
    }
}

/// Built-in table where every view is served by `loader`.
pub fn builtin_resolver(loader: CountingLoader) -> RouteResolver {
    RouteResolver::new(RouteTable::builtin(), ViewRegistry::with_fallback(loader)).unwrap()
}

/// Built-in table with `loader` for one component and static loading for the rest.
#[allow(dead_code)]
pub fn resolver_with(component: &str, loader: CountingLoader) -> RouteResolver {
    let registry = ViewRegistry::with_fallback(StaticLoader).register(component, loader);
    RouteResolver::new(RouteTable::builtin(), registry).unwrap()
}
