//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (render rules reference existing views)
//! - Validate value ranges (statuses, addresses)
//! - Detect duplicate patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted, at startup and on reload

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::{ActionConfig, GatewayConfig};
use crate::routing::rule::{RouteError, RoutePattern};

/// A single semantic problem in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("rule #{0} has an empty name")]
    EmptyRuleName(usize),

    #[error("duplicate pattern `{0}`")]
    DuplicatePattern(String),

    #[error(transparent)]
    Rule(#[from] RouteError),

    #[error("rule `{rule}` references unknown view `{view}`")]
    UnknownView { rule: String, view: String },

    #[error("invalid {field} `{value}`")]
    BadAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::BadAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let mut seen = HashSet::new();
    for (index, rule) in config.routes.iter().enumerate() {
        if rule.name.is_empty() {
            errors.push(ValidationError::EmptyRuleName(index));
        }
        if !seen.insert(rule.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern(rule.pattern.clone()));
        }

        let pattern = match RoutePattern::parse(&rule.pattern) {
            Ok(p) => p,
            Err(e) => {
                errors.push(ValidationError::Rule(e));
                continue;
            }
        };

        match &rule.action {
            ActionConfig::RenderView { view } => {
                // Template directories are read when the view engine loads;
                // only inline references can be checked here.
                if config.views.template_dir.is_none() && !config.views.inline.contains_key(view) {
                    errors.push(ValidationError::UnknownView {
                        rule: rule.name.clone(),
                        view: view.clone(),
                    });
                }
            }
            ActionConfig::RedirectStrip => {
                if matches!(pattern, RoutePattern::Exact(_)) {
                    errors.push(ValidationError::Rule(RouteError::RedirectNeedsWildcard(
                        rule.name.clone(),
                    )));
                }
            }
            ActionConfig::FixedResponse { status, .. } => {
                if StatusCode::from_u16(*status).is_err() {
                    errors.push(ValidationError::Rule(RouteError::InvalidStatus(
                        rule.name.clone(),
                        *status,
                    )));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RuleConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.routes.push(RuleConfig {
            name: String::new(),
            pattern: "/health".to_string(),
            action: ActionConfig::FixedResponse {
                status: 1000,
                body: String::new(),
            },
        });
        let errors = validate_config(&config).unwrap_err();
        // Bad address, empty name, duplicate `/health`, invalid status.
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn rejects_unknown_view_reference() {
        let mut config = GatewayConfig::default();
        config.routes.push(RuleConfig {
            name: "broken".to_string(),
            pattern: "/broken".to_string(),
            action: ActionConfig::RenderView {
                view: "missing".to_string(),
            },
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnknownView { .. })));
    }

    #[test]
    fn rejects_redirect_on_exact_pattern() {
        let mut config = GatewayConfig::default();
        config.routes.push(RuleConfig {
            name: "broken".to_string(),
            pattern: "/broken".to_string(),
            action: ActionConfig::RedirectStrip,
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::Rule(RouteError::RedirectNeedsWildcard(_))
        )));
    }
}
