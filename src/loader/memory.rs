// ABOUTME: In-memory template loader backed by a name-to-source map
// ABOUTME: Used for inline template registration and as a test double

use std::collections::HashMap;

use super::error::{LoaderError, Result};
use super::{Loader, TemplateSource};

/// Holds template sources directly in memory. Sources registered here are
/// always up to date.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(name.into(), source.into());
    }

    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(name, source);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

impl Loader for MemoryLoader {
    fn get_source(&self, name: &str) -> Result<TemplateSource> {
        self.templates
            .get(name)
            .map(|source| TemplateSource::from_string(source.as_str()))
            .ok_or_else(|| LoaderError::not_found(name))
    }

    fn list_templates(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    fn describe(&self) -> String {
        format!("memory loader ({} templates)", self.templates.len())
    }
}
