//! View engine: named templates rendered to bytes.
//!
//! # Responsibilities
//! - Load named templates once at startup (inline config, template dir)
//! - Render a template by name for render_view rules
//!
//! # Design Decisions
//! - Templates are static bytes; there is no interpolation or templating
//!   language behind this seam
//! - Loaded once, immutable thereafter; a reload builds a new engine
//! - Unknown view at render time is an error (surfaced as a 500), not a 404

use std::collections::HashMap;
use std::fs;

use axum::body::Bytes;
use thiserror::Error;

use crate::config::ViewsConfig;

/// Error type for view loading and rendering.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("unknown view `{0}`")]
    Unknown(String),

    #[error("failed to read template `{path}`: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

/// Rendering seam consumed by the request handler.
pub trait ViewEngine: Send + Sync {
    /// Render the named view to response bytes.
    fn render(&self, name: &str) -> Result<Bytes, ViewError>;
}

/// View engine backed by templates loaded once at startup.
#[derive(Debug, Default)]
pub struct StaticViewEngine {
    templates: HashMap<String, Bytes>,
}

impl StaticViewEngine {
    /// Build an engine from config: inline templates first, then
    /// `<name>.html` files from the template directory, which override
    /// inline templates of the same name.
    pub fn from_config(config: &ViewsConfig) -> Result<Self, ViewError> {
        let mut templates: HashMap<String, Bytes> = config
            .inline
            .iter()
            .map(|(name, body)| (name.clone(), Bytes::from(body.clone().into_bytes())))
            .collect();

        if let Some(dir) = &config.template_dir {
            let entries = fs::read_dir(dir).map_err(|source| ViewError::Read {
                path: dir.display().to_string(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| ViewError::Read {
                    path: dir.display().to_string(),
                    source,
                })?;
                let path = entry.path();
                if path.extension().map_or(false, |ext| ext == "html") {
                    let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let body = fs::read(&path).map_err(|source| ViewError::Read {
                        path: path.display().to_string(),
                        source,
                    })?;
                    templates.insert(name.to_string(), Bytes::from(body));
                }
            }
        }

        Ok(Self { templates })
    }

    /// Number of loaded templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ViewEngine for StaticViewEngine {
    fn render(&self, name: &str) -> Result<Bytes, ViewError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| ViewError::Unknown(name.to_string()))
    }
}
