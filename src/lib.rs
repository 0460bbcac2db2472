// ABOUTME: Main library module for the signpost template dispatch bridge
// ABOUTME: Exports all core modules and provides the public API

pub mod app;
pub mod cli;
pub mod loader;
pub mod render;
pub mod trace;

// Re-export commonly used types
pub use app::{App, AppConfig, Plugin};
pub use cli::{Args, Cli, Config};
pub use loader::{DirLoader, DispatchingLoader, Loader, LoaderError, MemoryLoader, TemplateSource};
pub use render::{
    AppScope, Environment, RenderContext, RenderError, RenderEvent, RequestInfo, RequestScope,
    ResolvedTemplate, TemplateVars,
};
pub use trace::{CollectingSink, LoadAttempt, LogTraceSink, TraceSink};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
