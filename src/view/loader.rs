//! View loaders and the component registry.
//!
//! # Responsibilities
//! - Define the external loader capability (`ViewLoader`)
//! - Provide static, file-backed and closure-backed loaders
//! - Map component names to loaders
//!
//! # Design Decisions
//! - Loaders return `'static` boxed futures so results can be shared
//! - Loaders offer no cancellation; callers discard unwanted results
//! - Registry lookups fall back to a default loader when one is set

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::routing::table::ViewRef;
use crate::view::types::{LoadFailure, View};

/// Asynchronously produces the component behind a `ViewRef`.
pub trait ViewLoader: Send + Sync {
    fn load(&self, view: &ViewRef) -> BoxFuture<'static, Result<View, LoadFailure>>;
}

/// Resolves immediately with an empty-source view named after the component.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLoader;

impl ViewLoader for StaticLoader {
    fn load(&self, view: &ViewRef) -> BoxFuture<'static, Result<View, LoadFailure>> {
        let view = View::new(view.component.clone(), String::new());
        futures_util::future::ready(Ok(view)).boxed()
    }
}

/// Reads component modules from a directory.
///
/// The module path is `ViewRef::module`, or the component name when unset.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ViewLoader for FileLoader {
    fn load(&self, view: &ViewRef) -> BoxFuture<'static, Result<View, LoadFailure>> {
        let module = view.module.as_deref().unwrap_or(&view.component);
        let path = self.root.join(module);
        let component = view.component.clone();

        async move {
            tracing::debug!(path = ?path, component = %component, "Reading view module");
            let source = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| LoadFailure::new(format!("{}: {}", path.display(), e)))?;
            Ok(View::new(component, source))
        }
        .boxed()
    }
}

/// Adapts a closure into a loader.
pub struct FnLoader<F>(F);

impl<F, Fut> FnLoader<F>
where
    F: Fn(&ViewRef) -> Fut + Send + Sync,
    Fut: Future<Output = Result<View, LoadFailure>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, Fut> ViewLoader for FnLoader<F>
where
    F: Fn(&ViewRef) -> Fut + Send + Sync,
    Fut: Future<Output = Result<View, LoadFailure>> + Send + 'static,
{
    fn load(&self, view: &ViewRef) -> BoxFuture<'static, Result<View, LoadFailure>> {
        (self.0)(view).boxed()
    }
}

/// Component name to loader mapping.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    loaders: HashMap<String, Arc<dyn ViewLoader>>,
    fallback: Option<Arc<dyn ViewLoader>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry where every component is served by `loader`.
    pub fn with_fallback(loader: impl ViewLoader + 'static) -> Self {
        Self {
            loaders: HashMap::new(),
            fallback: Some(Arc::new(loader)),
        }
    }

    /// Register a loader for one component, replacing any previous one.
    pub fn register(
        mut self,
        component: impl Into<String>,
        loader: impl ViewLoader + 'static,
    ) -> Self {
        self.loaders.insert(component.into(), Arc::new(loader));
        self
    }

    pub fn register_arc(
        mut self,
        component: impl Into<String>,
        loader: Arc<dyn ViewLoader>,
    ) -> Self {
        self.loaders.insert(component.into(), loader);
        self
    }

    pub fn loader_for(&self, component: &str) -> Option<Arc<dyn ViewLoader>> {
        self.loaders
            .get(component)
            .cloned()
            .or_else(|| self.fallback.clone())
    }

    pub fn contains(&self, component: &str) -> bool {
        self.fallback.is_some() || self.loaders.contains_key(component)
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut components: Vec<_> = self.loaders.keys().collect();
        components.sort();
        f.debug_struct("ViewRegistry")
            .field("components", &components)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_loader() {
        let view = StaticLoader.load(&ViewRef::new("CreationView")).await.unwrap();
        assert_eq!(view.component(), "CreationView");
        assert_eq!(view.source(), "");
    }

    #[tokio::test]
    async fn test_file_loader_reads_module() {
        let dir = std::env::temp_dir().join(format!("view_router_loader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("DashboardView.vue"), "<template>home</template>").unwrap();

        let loader = FileLoader::new(&dir);
        let view = loader
            .load(&ViewRef::new("DashboardView").with_module("DashboardView.vue"))
            .await
            .unwrap();
        assert_eq!(view.component(), "DashboardView");
        assert_eq!(view.source(), "<template>home</template>");

        let missing = loader.load(&ViewRef::new("Missing")).await;
        assert!(missing.is_err());

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_registry_lookup() {
        let registry = ViewRegistry::new().register(
            "PlatformPlanView",
            FnLoader::new(|view: &ViewRef| {
                let name = view.component.clone();
                async move { Ok(View::new(name, "plan")) }
            }),
        );

        assert!(registry.contains("PlatformPlanView"));
        assert!(!registry.contains("CreationView"));
        assert!(registry.loader_for("CreationView").is_none());

        let loader = registry.loader_for("PlatformPlanView").unwrap();
        let view = loader.load(&ViewRef::new("PlatformPlanView")).await.unwrap();
        assert_eq!(view.source(), "plan");

        let fallback = ViewRegistry::with_fallback(StaticLoader);
        assert!(fallback.contains("Anything"));
    }
}
