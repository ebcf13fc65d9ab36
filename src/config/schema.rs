//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has a default so the gateway runs with no config file at
//! all: the built-in defaults are the production route table (the `/dev` and
//! `/stg` namespaces plus the load-balancer health probe).

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Ordered route rules. Exact patterns are checked before wildcard
    /// patterns regardless of position; wildcard patterns keep their
    /// declaration order.
    pub routes: Vec<RuleConfig>,

    /// Named views served by render_view rules.
    pub views: ViewsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(),
            views: ViewsConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One route rule: a pattern and the action taken when it matches.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    /// Rule identifier for logging/metrics.
    pub name: String,

    /// Path pattern: a literal path (`/dev/welcome`) or a prefix wildcard
    /// (`/dev/*`).
    pub pattern: String,

    /// Action to take on match.
    #[serde(flatten)]
    pub action: ActionConfig,
}

/// Rule action, tagged by the `action` field in config files.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Respond 200 with a named view.
    RenderView { view: String },

    /// Strip the matched wildcard prefix and redirect (302) to the captured
    /// remainder rooted at `/`. Only valid on `/*` patterns.
    RedirectStrip,

    /// Respond with a canned status and body.
    FixedResponse { status: u16, body: String },
}

/// View templates: inline bodies and/or a directory of `<name>.html` files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Inline templates, keyed by view name.
    pub inline: HashMap<String, String>,

    /// Optional directory of `<name>.html` templates, loaded once at
    /// startup. Files override inline templates of the same name.
    pub template_dir: Option<PathBuf>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        let mut inline = HashMap::new();
        inline.insert("welcome".to_string(), WELCOME_TEMPLATE.to_string());
        Self {
            inline,
            template_dir: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Built-in welcome page, served when no template file replaces it.
const WELCOME_TEMPLATE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>Welcome</title>\n</head>\n<body>\n  <h1>Welcome</h1>\n</body>\n</html>\n";

/// The default route table: welcome pages for the `/dev` and `/stg`
/// namespaces, prefix-strip redirects for everything else under them, and
/// the health probe. Exact rules shadow the wildcards for the welcome paths.
fn default_routes() -> Vec<RuleConfig> {
    let page = |name: &str, pattern: &str| RuleConfig {
        name: name.to_string(),
        pattern: pattern.to_string(),
        action: ActionConfig::RenderView {
            view: "welcome".to_string(),
        },
    };
    let strip = |name: &str, pattern: &str| RuleConfig {
        name: name.to_string(),
        pattern: pattern.to_string(),
        action: ActionConfig::RedirectStrip,
    };
    vec![
        page("dev-root", "/dev"),
        page("dev-welcome", "/dev/welcome"),
        page("stg-root", "/stg"),
        page("stg-welcome", "/stg/welcome"),
        strip("dev-strip", "/dev/*"),
        strip("stg-strip", "/stg/*"),
        RuleConfig {
            name: "health".to_string(),
            pattern: "/health".to_string(),
            action: ActionConfig::FixedResponse {
                status: 200,
                body: "OK".to_string(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_full_route_table() {
        let config = GatewayConfig::default();
        assert_eq!(config.routes.len(), 7);
        assert!(config.views.inline.contains_key("welcome"));
    }

    #[test]
    fn rules_deserialize_from_toml() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [[routes]]
            name = "dev-root"
            pattern = "/dev"
            action = "render_view"
            view = "welcome"

            [[routes]]
            name = "dev-strip"
            pattern = "/dev/*"
            action = "redirect_strip"

            [[routes]]
            name = "health"
            pattern = "/health"
            action = "fixed_response"
            status = 200
            body = "OK"
        "#;
        let config: GatewayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.routes.len(), 3);
        assert_eq!(
            config.routes[0].action,
            ActionConfig::RenderView {
                view: "welcome".to_string()
            }
        );
        assert_eq!(config.routes[1].action, ActionConfig::RedirectStrip);
        assert_eq!(
            config.routes[2].action,
            ActionConfig::FixedResponse {
                status: 200,
                body: "OK".to_string()
            }
        );
        // Unspecified sections fall back to defaults.
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
