// ABOUTME: Application and plugin composition for template dispatch
// ABOUTME: Owns the primary loader, the ordered plugin registry, and dispatch configuration

use serde::{Deserialize, Serialize};

use crate::loader::Loader;
use crate::trace::{LogTraceSink, TraceSink};

/// Configuration consumed by the dispatching loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// When set, every lookup probes all candidate loaders and hands the full
    /// attempt list to the trace sink instead of stopping at the first match.
    #[serde(default)]
    pub explain_template_loading: bool,
}

/// A modular unit composed into the application, with its own optional
/// template loader. Identified by name in load traces.
pub struct Plugin {
    name: String,
    loader: Option<Box<dyn Loader>>,
}

impl Plugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loader: None,
        }
    }

    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn loader(&self) -> Option<&dyn Loader> {
        self.loader.as_deref()
    }
}

/// The application: an optional primary loader plus plugins in registration
/// order. Registration order is append-only and decides template resolution
/// precedence.
pub struct App {
    name: String,
    loader: Option<Box<dyn Loader>>,
    plugins: Vec<Plugin>,
    config: AppConfig,
    trace_sink: Box<dyn TraceSink>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loader: None,
            plugins: Vec::new(),
            config: AppConfig::default(),
            trace_sink: Box::new(LogTraceSink),
        }
    }

    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.trace_sink = Box::new(sink);
        self
    }

    pub fn register_plugin(mut self, plugin: Plugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn loader(&self) -> Option<&dyn Loader> {
        self.loader.as_deref()
    }

    pub(crate) fn trace_sink(&self) -> &dyn TraceSink {
        self.trace_sink.as_ref()
    }

    /// Candidate loaders in resolution order: the application's own loader
    /// first if present, then each plugin's loader in registration order.
    pub fn iter_loaders(&self) -> impl Iterator<Item = (&str, &dyn Loader)> {
        self.loader
            .as_deref()
            .map(|loader| (self.name.as_str(), loader))
            .into_iter()
            .chain(self.plugins.iter().filter_map(|plugin| {
                plugin
                    .loader
                    .as_deref()
                    .map(|loader| (plugin.name.as_str(), loader))
            }))
    }
}
