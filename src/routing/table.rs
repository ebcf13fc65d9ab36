//! Compiled route table: lookup and outcome resolution.
//!
//! # Responsibilities
//! - Compile configured rules into an immutable table
//! - Look up the matching rule for a request path
//! - Resolve the rule's action into a concrete outcome
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact lookup via HashMap, checked before prefix rules so a
//!   wildcard like `/dev/*` cannot shadow `/dev/welcome`
//! - O(n) prefix scan in declaration order; first match wins
//! - Explicit `None` on no match rather than a silent default

use std::collections::HashMap;

use axum::http::StatusCode;

use crate::config::{ActionConfig, RuleConfig};
use crate::routing::rule::{RouteAction, RouteError, RoutePattern};

#[derive(Debug)]
struct ExactRule {
    name: String,
    action: RouteAction,
}

#[derive(Debug)]
struct PrefixRule {
    name: String,
    prefix: String,
    action: RouteAction,
}

/// The resolved result of matching a path: everything the handler needs to
/// build a response, with the redirect location already assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Render the named view with status 200.
    Render { view: String },
    /// Redirect (302) to `location`, passed through verbatim.
    Redirect { location: String },
    /// Canned response.
    Fixed { status: StatusCode, body: String },
}

/// A matched rule: its name (for logs and metrics) and its outcome.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub rule: &'a str,
    pub outcome: RouteOutcome,
}

/// Immutable table of compiled route rules.
///
/// Built once per configuration generation and shared across all request
/// handlers without synchronization.
#[derive(Debug, Default)]
pub struct RouteTable {
    exact: HashMap<String, ExactRule>,
    prefix: Vec<PrefixRule>,
}

impl RouteTable {
    /// Compile configured rules into a table.
    ///
    /// Exact rules go into the hash map; prefix rules keep their declaration
    /// order. Later exact duplicates are rejected by config validation, but
    /// programmatically-built rule lists get the same syntax checks here.
    pub fn compile(rules: &[RuleConfig]) -> Result<Self, RouteError> {
        let mut table = Self::default();
        for rule in rules {
            let pattern = RoutePattern::parse(&rule.pattern)?;
            let action = compile_action(rule, &pattern)?;
            match pattern {
                RoutePattern::Exact(path) => {
                    table.exact.insert(
                        path,
                        ExactRule {
                            name: rule.name.clone(),
                            action,
                        },
                    );
                }
                RoutePattern::Prefix(prefix) => {
                    table.prefix.push(PrefixRule {
                        name: rule.name.clone(),
                        prefix,
                        action,
                    });
                }
            }
        }
        Ok(table)
    }

    /// Match a request path against the table. Exact rules first, then
    /// prefix rules in declaration order. `None` means pass-through: the
    /// host framework answers 404.
    pub fn match_path<'a>(&'a self, path: &str) -> Option<RouteMatch<'a>> {
        if let Some(rule) = self.exact.get(path) {
            return Some(RouteMatch {
                rule: &rule.name,
                outcome: resolve(&rule.action, ""),
            });
        }
        for rule in &self.prefix {
            if let Some(remainder) = path.strip_prefix(rule.prefix.as_str()) {
                return Some(RouteMatch {
                    rule: &rule.name,
                    outcome: resolve(&rule.action, remainder),
                });
            }
        }
        None
    }

    /// Total number of compiled rules.
    pub fn len(&self) -> usize {
        self.exact.len() + self.prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn compile_action(rule: &RuleConfig, pattern: &RoutePattern) -> Result<RouteAction, RouteError> {
    match &rule.action {
        ActionConfig::RenderView { view } => Ok(RouteAction::RenderView { view: view.clone() }),
        ActionConfig::RedirectStrip => {
            if matches!(pattern, RoutePattern::Exact(_)) {
                return Err(RouteError::RedirectNeedsWildcard(rule.name.clone()));
            }
            Ok(RouteAction::RedirectStrip)
        }
        ActionConfig::FixedResponse { status, body } => {
            let status = StatusCode::from_u16(*status)
                .map_err(|_| RouteError::InvalidStatus(rule.name.clone(), *status))?;
            Ok(RouteAction::Fixed {
                status,
                body: body.clone(),
            })
        }
    }
}

/// The captured remainder is reinserted verbatim after a leading `/`.
/// An empty remainder (`/dev/`) therefore redirects to `/`, exactly.
fn resolve(action: &RouteAction, remainder: &str) -> RouteOutcome {
    match action {
        RouteAction::RenderView { view } => RouteOutcome::Render { view: view.clone() },
        RouteAction::RedirectStrip => RouteOutcome::Redirect {
            location: format!("/{remainder}"),
        },
        RouteAction::Fixed { status, body } => RouteOutcome::Fixed {
            status: *status,
            body: body.clone(),
        },
    }
}
