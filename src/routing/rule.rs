//! Route rule data model.
//!
//! # Responsibilities
//! - Parse configured patterns into exact or prefix-wildcard form
//! - Represent rule actions as a closed set of variants
//!
//! # Design Decisions
//! - Patterns are literal text; no regex, matching stays O(n) in path length
//! - A wildcard is only valid as a trailing `/*` segment
//! - Actions are a tagged enum so dispatch is exhaustive at compile time

use axum::http::StatusCode;
use thiserror::Error;

/// Error produced when compiling rules.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Patterns must be rooted at `/`.
    #[error("pattern `{0}` must start with `/`")]
    NotRooted(String),

    /// `*` appeared somewhere other than a trailing `/*`.
    #[error("pattern `{0}`: wildcard is only valid as a trailing `/*`")]
    WildcardPlacement(String),

    /// A strip-redirect rule needs a wildcard to capture the remainder.
    #[error("rule `{0}`: redirect_strip requires a `/*` wildcard pattern")]
    RedirectNeedsWildcard(String),

    /// Fixed response status outside the valid HTTP range.
    #[error("rule `{0}`: invalid response status {1}")]
    InvalidStatus(String, u16),
}

/// What part of the path space a rule claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one literal path string.
    Exact(String),
    /// Matches a fixed prefix (stored with its trailing slash, e.g. `/dev/`)
    /// followed by an arbitrary remainder. The capture is greedy: it takes
    /// everything after the prefix, slashes included.
    Prefix(String),
}

impl RoutePattern {
    /// Parse a configured pattern string (`/dev`, `/dev/*`, `/health`).
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::NotRooted(pattern.to_string()));
        }
        if let Some(prefix) = pattern.strip_suffix("/*") {
            if prefix.contains('*') {
                return Err(RouteError::WildcardPlacement(pattern.to_string()));
            }
            return Ok(Self::Prefix(format!("{prefix}/")));
        }
        if pattern.contains('*') {
            return Err(RouteError::WildcardPlacement(pattern.to_string()));
        }
        Ok(Self::Exact(pattern.to_string()))
    }
}

/// Action taken when a rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Respond 200 with the named view rendered by the view engine.
    RenderView { view: String },
    /// Respond 302, redirecting to the captured remainder rooted at `/`.
    /// The remainder is opaque pass-through text: no decoding, no
    /// normalization.
    RedirectStrip,
    /// Respond with a canned status and body (e.g. the health probe).
    Fixed { status: StatusCode, body: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_patterns() {
        assert_eq!(
            RoutePattern::parse("/dev/welcome").unwrap(),
            RoutePattern::Exact("/dev/welcome".to_string())
        );
    }

    #[test]
    fn parses_prefix_patterns_with_trailing_slash() {
        assert_eq!(
            RoutePattern::parse("/dev/*").unwrap(),
            RoutePattern::Prefix("/dev/".to_string())
        );
        // Bare `/*` claims the whole path space.
        assert_eq!(
            RoutePattern::parse("/*").unwrap(),
            RoutePattern::Prefix("/".to_string())
        );
    }

    #[test]
    fn rejects_unrooted_patterns() {
        assert!(matches!(
            RoutePattern::parse("dev"),
            Err(RouteError::NotRooted(_))
        ));
    }

    #[test]
    fn rejects_misplaced_wildcards() {
        assert!(matches!(
            RoutePattern::parse("/dev/*/welcome"),
            Err(RouteError::WildcardPlacement(_))
        ));
        assert!(matches!(
            RoutePattern::parse("/dev*"),
            Err(RouteError::WildcardPlacement(_))
        ));
    }
}
