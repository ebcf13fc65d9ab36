//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → compiled into a route table + view engine
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → update channel → atomic swap of the compiled state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes arrive as whole new configs
//! - All fields have defaults; the zero-config default is the production
//!   route table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ActionConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, RuleConfig, TimeoutConfig,
    ViewsConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
