//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route template and redirect target parses
//! - Check redirects only use parameters their source captures
//! - Require the root route and unique names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::routing::{ConfigurationError, PathPattern};

/// A single semantic problem in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_path '{0}' must start with '/'")]
    InvalidBasePath(String),

    #[error("max_redirects must be greater than 0")]
    ZeroRedirectLimit,

    #[error("routes[{index}] ({path}): {error}")]
    Route {
        index: usize,
        path: String,
        error: ConfigurationError,
    },

    #[error("no route for the root path '/'")]
    MissingRoot,

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),
}

/// Validate a parsed config.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.base_path.starts_with('/') {
        errors.push(ValidationError::InvalidBasePath(config.base_path.clone()));
    }
    if config.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirectLimit);
    }

    // Empty route list falls back to the built-in table
    if !config.routes.is_empty() {
        let mut names = HashSet::new();
        let mut has_root = false;

        for (index, route) in config.routes.iter().enumerate() {
            let route_error = |error: ConfigurationError| ValidationError::Route {
                index,
                path: route.path.clone(),
                error,
            };

            if let Some(name) = &route.name {
                if !names.insert(name.as_str()) {
                    errors.push(ValidationError::DuplicateName(name.clone()));
                }
            }

            if route.component.is_some() == route.redirect.is_some() {
                errors.push(route_error(ConfigurationError::AmbiguousTarget(
                    route.path.clone(),
                )));
            }

            let pattern = match PathPattern::parse(&route.path) {
                Ok(pattern) => pattern,
                Err(e) => {
                    errors.push(route_error(e));
                    continue;
                }
            };
            has_root |= pattern.is_root();

            if let Some(redirect) = &route.redirect {
                match PathPattern::parse(redirect) {
                    Ok(target) => {
                        let bound: HashSet<&str> = pattern.param_names().collect();
                        for param in target.param_names().filter(|p| !bound.contains(p)) {
                            errors.push(route_error(ConfigurationError::UnboundParameter {
                                param: param.to_string(),
                                redirect: target.to_string(),
                            }));
                        }
                    }
                    Err(e) => errors.push(route_error(e)),
                }
            }
        }

        if !has_root {
            errors.push(ValidationError::MissingRoot);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
