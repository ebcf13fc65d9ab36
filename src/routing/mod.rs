//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (exact lookup, then prefix scan)
//!     → Return: RouteMatch (rule name + resolved outcome) or None
//!
//! Rule Compilation (at startup and on reload):
//!     RuleConfig[]
//!     → rule.rs (parse patterns, check actions)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in the hot path (exact map + prefix scan only)
//! - Deterministic: exact rules before prefix rules, first match wins
//! - No-match is an explicit pass-through, not an error

pub mod rule;
pub mod table;

pub use rule::{RouteAction, RouteError, RoutePattern};
pub use table::{RouteMatch, RouteOutcome, RouteTable};
