//! Route resolution error definitions.

use thiserror::Error;

/// Errors raised while resolving a navigation request or loading its view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The request is not a usable path (empty, or missing the leading `/`).
    #[error("Invalid navigation path '{0}': must be non-empty and start with '/'")]
    InvalidPath(String),

    /// No route pattern matches the requested path.
    #[error("No route matches path '{path}'")]
    NotFound { path: String },

    /// The route table or a redirect is misconfigured.
    #[error("Route configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A redirect chain revisited a path, or ran past the redirect limit.
    #[error("Redirect loop detected: {}", chain.join(" -> "))]
    RedirectLoop { chain: Vec<String> },

    /// The external view loader rejected.
    #[error(transparent)]
    ViewLoad(#[from] ViewLoadError),
}

/// Errors in the static route table.
///
/// Most of these are detected when the table or resolver is built. The rest
/// surface per request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The table has no routes.
    #[error("Route table is empty")]
    EmptyTable,

    /// A path template failed to parse.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A redirect target references a parameter the source pattern never captures.
    #[error("Redirect target '{redirect}' references unbound parameter ':{param}'")]
    UnboundParameter { param: String, redirect: String },

    /// Two routes share the same name.
    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),

    /// A view route names a component with no registered loader.
    #[error("Route '{route}' references unknown component '{component}'")]
    UnknownComponent { route: String, component: String },

    /// `load_view` was called on a redirect route.
    #[error("Route '{0}' is a redirect and has no view")]
    NotAView(String),

    /// `load_view` was called with a route this resolver's table does not hold.
    #[error("Route '{0}' does not belong to this route table")]
    ForeignRoute(String),

    /// A route declares both a component and a redirect, or neither.
    #[error("Route '{0}' must declare exactly one of component or redirect")]
    AmbiguousTarget(String),
}

/// The external loader failed to produce a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load view '{component}' for route '{route}': {message}")]
pub struct ViewLoadError {
    /// Pattern of the route whose view failed.
    pub route: String,
    /// Component name handed to the loader.
    pub component: String,
    /// Loader-provided reason.
    pub message: String,
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_loop_display() {
        let err = RouteError::RedirectLoop {
            chain: vec!["/a".into(), "/b".into(), "/a".into()],
        };
        assert_eq!(err.to_string(), "Redirect loop detected: /a -> /b -> /a");
    }

    #[test]
    fn test_configuration_error_converts() {
        let err: RouteError = ConfigurationError::EmptyTable.into();
        assert!(matches!(
            err,
            RouteError::Configuration(ConfigurationError::EmptyTable)
        ));
    }
}
