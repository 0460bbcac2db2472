// ABOUTME: Error types for template rendering operations
// ABOUTME: Carries the not-found signal through and passes engine failures along unchanged

use thiserror::Error;

use crate::loader::LoaderError;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("template engine error: {0}")]
    EngineError(#[from] handlebars::RenderError),

    #[error("template syntax error: {0}")]
    SyntaxError(#[from] handlebars::TemplateError),

    #[error("context serialization error: {0}")]
    ContextError(#[from] serde_json::Error),

    #[error("loader error: {0}")]
    LoaderError(LoaderError),
}

impl RenderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

impl From<LoaderError> for RenderError {
    fn from(err: LoaderError) -> Self {
        match err {
            LoaderError::TemplateNotFound { name } => Self::TemplateNotFound { name },
            other => Self::LoaderError(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
