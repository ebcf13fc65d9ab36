//! View rendering subsystem.
//!
//! The gateway's pages are pre-rendered: the view engine is a name-to-bytes
//! lookup behind the [`ViewEngine`] trait, loaded once per configuration
//! generation. Swapping in a real template engine means implementing the
//! trait, nothing else changes.

pub mod engine;

pub use engine::{StaticViewEngine, ViewEngine, ViewError};
