// ABOUTME: Filesystem-backed template loader rooted at a directory
// ABOUTME: Resolves slash-separated template names to UTF-8 files under the root

use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use super::error::{LoaderError, Result};
use super::{Loader, TemplateSource};

/// Loads templates from files under a root directory. Template names use `/`
/// separators regardless of platform and may not escape the root.
#[derive(Debug, Clone)]
pub struct DirLoader {
    root: PathBuf,
}

impl DirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a template name to a path under the root. Absolute names and names
    /// containing `..` or other non-plain segments never resolve.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        if relative.is_absolute() {
            return None;
        }
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_)))
        {
            return None;
        }
        let path = self.root.join(relative);
        path.is_file().then_some(path)
    }
}

impl Loader for DirLoader {
    fn get_source(&self, name: &str) -> Result<TemplateSource> {
        let path = self
            .resolve(name)
            .ok_or_else(|| LoaderError::not_found(name))?;

        // Unreadable or non-UTF-8 content is a hard fault, not a miss.
        let source = fs::read_to_string(&path)?;
        let modified = fs::metadata(&path)?
            .modified()
            .ok()
            .map(DateTime::<Utc>::from);

        Ok(TemplateSource::from_file(source, path, modified))
    }

    fn list_templates(&self) -> Vec<String> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                let name = relative
                    .components()
                    .filter_map(|component| component.as_os_str().to_str())
                    .collect::<Vec<_>>()
                    .join("/");
                if !name.is_empty() {
                    names.push(name);
                }
            }
        }

        names
    }

    fn describe(&self) -> String {
        format!("directory loader ({})", self.root.display())
    }
}
