// ABOUTME: Error types for template loader operations
// ABOUTME: Defines the not-found signal and filesystem fault propagation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoaderError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Whether this is the not-found signal, as opposed to a hard fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
