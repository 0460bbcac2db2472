// ABOUTME: Diagnostic reporting for template resolution attempts
// ABOUTME: Records per-loader outcomes and delivers them to a pluggable sink

use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::loader::TemplateSource;

/// One resolution attempt against one candidate loader.
#[derive(Debug, Clone)]
pub struct LoadAttempt {
    /// Name of the application or plugin owning the loader.
    pub owner: String,
    /// The loader's self-description.
    pub loader: String,
    /// The resolved source, or `None` when the loader did not know the name.
    pub outcome: Option<TemplateSource>,
}

impl LoadAttempt {
    pub fn matched(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Receives the full attempt list for a single lookup when explain mode is on.
pub trait TraceSink: Send + Sync {
    fn report(&self, template: &str, attempts: &[LoadAttempt]);
}

impl<T: TraceSink + ?Sized> TraceSink for Arc<T> {
    fn report(&self, template: &str, attempts: &[LoadAttempt]) {
        (**self).report(template, attempts);
    }
}

/// Default sink: one log line per attempt, then a summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn report(&self, template: &str, attempts: &[LoadAttempt]) {
        info!(
            "resolving template '{}' across {} candidate loaders",
            template,
            attempts.len()
        );

        for (index, attempt) in attempts.iter().enumerate() {
            match &attempt.outcome {
                Some(found) => match &found.origin {
                    Some(path) => info!(
                        "  {}: '{}' via {} -> {}",
                        index + 1,
                        attempt.owner,
                        attempt.loader,
                        path.display()
                    ),
                    None => info!(
                        "  {}: '{}' via {} -> match",
                        index + 1,
                        attempt.owner,
                        attempt.loader
                    ),
                },
                None => info!(
                    "  {}: '{}' via {} -> no match",
                    index + 1,
                    attempt.owner,
                    attempt.loader
                ),
            }
        }

        let matched = attempts.iter().filter(|attempt| attempt.matched()).count();
        if matched == 0 {
            if attempts.is_empty() {
                warn!(
                    "template '{}' could not be resolved: no loaders are registered",
                    template
                );
            } else {
                warn!("template '{}' was not found by any registered loader", template);
            }
        } else if matched > 1 {
            info!(
                "template '{}' matched {} loaders; the first match wins",
                template, matched
            );
        }
    }
}

/// Records every report it receives. Test support.
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(String, Vec<LoadAttempt>)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, Vec<LoadAttempt>)> {
        self.reports.lock().expect("trace sink lock poisoned").clone()
    }
}

impl TraceSink for CollectingSink {
    fn report(&self, template: &str, attempts: &[LoadAttempt]) {
        self.reports
            .lock()
            .expect("trace sink lock poisoned")
            .push((template.to_string(), attempts.to_vec()));
    }
}
