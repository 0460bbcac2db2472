// ABOUTME: Template loader protocol and implementations
// ABOUTME: Defines the Loader trait, resolved source metadata, and the built-in loaders

pub mod dispatch;
pub mod error;
pub mod file;
pub mod memory;

pub use dispatch::DispatchingLoader;
pub use error::{LoaderError, Result};
pub use file::DirLoader;
pub use memory::MemoryLoader;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A resolved template: its source text plus enough provenance to re-check
/// freshness later.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub source: String,
    pub origin: Option<PathBuf>,
    pub modified: Option<DateTime<Utc>>,
}

impl TemplateSource {
    /// A source with no filesystem backing. Always up to date.
    pub fn from_string(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            origin: None,
            modified: None,
        }
    }

    pub fn from_file(source: String, origin: PathBuf, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            source,
            origin: Some(origin),
            modified,
        }
    }

    /// Re-check the origin file's modification time against the one captured
    /// at load. Sources without an origin never go stale.
    pub fn is_up_to_date(&self) -> bool {
        let Some(origin) = &self.origin else {
            return true;
        };
        let current = std::fs::metadata(origin).and_then(|meta| meta.modified());
        match (current, self.modified) {
            (Ok(mtime), Some(recorded)) => DateTime::<Utc>::from(mtime) <= recorded,
            _ => false,
        }
    }
}

/// Anything that can resolve a template name to source text.
pub trait Loader: Send + Sync {
    /// Resolve a template name, or signal `TemplateNotFound`.
    fn get_source(&self, name: &str) -> Result<TemplateSource>;

    /// Every template name this loader can resolve.
    fn list_templates(&self) -> Vec<String>;

    /// Short human-readable identification, used in load traces.
    fn describe(&self) -> String;
}
