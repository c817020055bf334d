//! Path templates and segment matching.
//!
//! # Responsibilities
//! - Parse templates like `/plan/:platform/:account` into segments
//! - Match a request path segment-by-segment, capturing parameters
//! - Substitute captured parameters back into redirect templates
//!
//! # Design Decisions
//! - Literal segments are case-sensitive, no normalization
//! - A single trailing slash is tolerated on both templates and paths
//! - Parameter segments match exactly one non-empty segment
//! - No wildcards or regex, segment counts must be equal

use std::fmt;

use serde::{Serialize, Serializer};

use crate::routing::error::ConfigurationError;
use crate::routing::params::RouteParams;

/// One `/`-delimited component of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must match the request segment exactly.
    Literal(String),
    /// Binds any single non-empty request segment under this name.
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a template. Segments prefixed with `:` are parameters.
    pub fn parse(template: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidPattern {
            pattern: template.to_string(),
            reason: reason.to_string(),
        };

        let raw = split_segments(template).ok_or_else(|| invalid("must start with '/'"))?;

        let mut segments = Vec::with_capacity(raw.len());
        for part in raw {
            if part.is_empty() {
                return Err(invalid("empty path segment"));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("parameter segment without a name")),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(invalid(&format!("parameter ':{}' declared twice", name)));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in order of appearance.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Match pre-split request segments, returning captured parameters on success.
    pub fn match_segments(&self, path: &[&str]) -> Option<RouteParams> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, actual) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(expected) if expected == actual => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if actual.is_empty() => return None,
                // Captured raw, without percent decoding
                Segment::Param(name) => params.insert(name.as_str(), *actual),
            }
        }
        Some(params)
    }

    /// Match a raw request path (no query or hash).
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let segments = split_segments(path)?;
        self.match_segments(&segments)
    }

    /// Build a concrete path by filling placeholders from `params`.
    pub fn substitute(&self, params: &RouteParams) -> Result<String, ConfigurationError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| {
                        ConfigurationError::UnboundParameter {
                            param: name.clone(),
                            redirect: self.to_string(),
                        }
                    })?;
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => write!(f, "/{}", text)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        Ok(())
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Split an absolute path into segments.
///
/// Returns `None` when the path does not start with `/`. The root path yields
/// no segments and one trailing slash after a segment is dropped. Empty
/// segments are kept so they fail matching, which makes `//` one empty
/// segment rather than the root.
pub fn split_segments(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    Some(rest.split('/').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_and_literals() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");

        let creation = PathPattern::parse("/creation/").unwrap();
        assert_eq!(creation.segments(), &[Segment::Literal("creation".into())]);
        assert_eq!(creation.to_string(), "/creation");
    }

    #[test]
    fn test_parse_params() {
        let plan = PathPattern::parse("/plan/:platform/:account").unwrap();
        let names: Vec<_> = plan.param_names().collect();
        assert_eq!(names, vec!["platform", "account"]);
        assert_eq!(plan.to_string(), "/plan/:platform/:account");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PathPattern::parse("plan").is_err());
        assert!(PathPattern::parse("").is_err());
        assert!(PathPattern::parse("/a//b").is_err());
        assert!(PathPattern::parse("//").is_err());
        assert!(PathPattern::parse("/a//").is_err());
        assert!(PathPattern::parse("/a/:").is_err());

        let err = PathPattern::parse("/x/:id/:id").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
    }

    #[test]
    fn test_match_literal_is_case_sensitive() {
        let pattern = PathPattern::parse("/creation").unwrap();
        assert!(pattern.matches("/creation").is_some());
        assert!(pattern.matches("/creation/").is_some());
        assert!(pattern.matches("/Creation").is_none());
        assert!(pattern.matches("/creation/extra").is_none());
    }

    #[test]
    fn test_match_captures_params() {
        let pattern = PathPattern::parse("/plan/:platform/:account").unwrap();
        let params = pattern.matches("/plan/wechat/acct123").unwrap();
        assert_eq!(params.get("platform"), Some("wechat"));
        assert_eq!(params.get("account"), Some("acct123"));

        // Empty segments never bind a parameter
        assert!(pattern.matches("/plan//acct123").is_none());
        assert!(pattern.matches("/plan/wechat").is_none());
    }

    #[test]
    fn test_root_matches_only_root() {
        let root = PathPattern::parse("/").unwrap();
        assert!(root.matches("/").is_some());
        assert!(root.matches("/dashboard").is_none());
    }

    #[test]
    fn test_substitute() {
        let target = PathPattern::parse("/plan/:platform/:account").unwrap();
        let params: RouteParams = [("platform", "douyin"), ("account", "a1")]
            .into_iter()
            .collect();
        assert_eq!(target.substitute(&params).unwrap(), "/plan/douyin/a1");

        let missing: RouteParams = [("platform", "douyin")].into_iter().collect();
        let err = target.substitute(&missing).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnboundParameter {
                param: "account".into(),
                redirect: "/plan/:platform/:account".into(),
            }
        );

        let root = PathPattern::parse("/").unwrap();
        assert_eq!(root.substitute(&RouteParams::new()).unwrap(), "/");
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("/"), Some(vec![]));
        assert_eq!(split_segments("/a/b/"), Some(vec!["a", "b"]));
        assert_eq!(split_segments("/a//b"), Some(vec!["a", "", "b"]));
        assert_eq!(split_segments("//"), Some(vec![""]));
        assert_eq!(split_segments("/a//"), Some(vec!["a", ""]));
        assert_eq!(split_segments("a/b"), None);
    }
}
