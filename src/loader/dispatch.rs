// ABOUTME: Composite loader searching the application and its plugins in order
// ABOUTME: Implements the fast first-match path and the explained full-scan path

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::App;
use crate::trace::LoadAttempt;

use super::error::{LoaderError, Result};
use super::{Loader, TemplateSource};

/// Looks for templates in the application and all plugin loaders. Holds no
/// state of its own; the candidate list is recomputed from the application on
/// every lookup, so resolution precedence always matches registration order.
pub struct DispatchingLoader {
    app: Arc<App>,
}

impl DispatchingLoader {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    fn get_source_fast(&self, name: &str) -> Result<TemplateSource> {
        for (_owner, loader) in self.app.iter_loaders() {
            match loader.get_source(name) {
                Ok(found) => return Ok(found),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err),
            }
        }
        Err(LoaderError::not_found(name))
    }

    /// Probe every candidate, report the attempt list to the trace sink, then
    /// return the first match found during the scan. Error semantics are
    /// identical to the fast path: hard loader faults propagate immediately.
    fn get_source_explained(&self, name: &str) -> Result<TemplateSource> {
        let mut attempts = Vec::new();
        let mut first_match: Option<TemplateSource> = None;

        for (owner, loader) in self.app.iter_loaders() {
            let outcome = match loader.get_source(name) {
                Ok(found) => {
                    if first_match.is_none() {
                        first_match = Some(found.clone());
                    }
                    Some(found)
                }
                Err(err) if err.is_not_found() => None,
                Err(err) => return Err(err),
            };
            attempts.push(LoadAttempt {
                owner: owner.to_string(),
                loader: loader.describe(),
                outcome,
            });
        }

        self.app.trace_sink().report(name, &attempts);

        first_match.ok_or_else(|| LoaderError::not_found(name))
    }
}

impl Loader for DispatchingLoader {
    fn get_source(&self, name: &str) -> Result<TemplateSource> {
        if self.app.config().explain_template_loading {
            self.get_source_explained(name)
        } else {
            self.get_source_fast(name)
        }
    }

    /// Union of every name visible across the application and its plugins,
    /// deduplicated. Order is unspecified.
    fn list_templates(&self) -> Vec<String> {
        let mut names = HashSet::new();
        for (_owner, loader) in self.app.iter_loaders() {
            names.extend(loader.list_templates());
        }
        names.into_iter().collect()
    }

    fn describe(&self) -> String {
        format!("dispatching loader ({})", self.app.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppConfig, Plugin};
    use crate::loader::MemoryLoader;
    use crate::trace::CollectingSink;

    fn two_plugin_app() -> App {
        App::new("site")
            .with_loader(MemoryLoader::new().with_template("base.html", "site base"))
            .register_plugin(
                Plugin::new("admin").with_loader(
                    MemoryLoader::new()
                        .with_template("x.html", "admin x")
                        .with_template("base.html", "admin base"),
                ),
            )
            .register_plugin(
                Plugin::new("blog")
                    .with_loader(MemoryLoader::new().with_template("x.html", "blog x")),
            )
    }

    #[test]
    fn test_app_loader_takes_precedence() {
        let loader = DispatchingLoader::new(Arc::new(two_plugin_app()));
        assert_eq!(loader.get_source("base.html").unwrap().source, "site base");
    }

    #[test]
    fn test_earlier_plugin_wins() {
        let loader = DispatchingLoader::new(Arc::new(two_plugin_app()));
        assert_eq!(loader.get_source("x.html").unwrap().source, "admin x");
    }

    #[test]
    fn test_miss_everywhere_is_not_found() {
        let loader = DispatchingLoader::new(Arc::new(two_plugin_app()));
        assert!(loader.get_source("missing.html").unwrap_err().is_not_found());
    }

    #[test]
    fn test_listing_deduplicates_across_owners() {
        let loader = DispatchingLoader::new(Arc::new(two_plugin_app()));

        let names = loader.list_templates();
        assert_eq!(names.len(), 2);
        assert_eq!(
            names.iter().filter(|name| name.as_str() == "base.html").count(),
            1
        );
        assert_eq!(
            names.iter().filter(|name| name.as_str() == "x.html").count(),
            1
        );
    }

    #[test]
    fn test_explained_miss_reports_one_attempt_per_candidate() {
        let sink = Arc::new(CollectingSink::new());
        let app = two_plugin_app()
            .with_config(AppConfig {
                explain_template_loading: true,
            })
            .with_trace_sink(Arc::clone(&sink));
        let loader = DispatchingLoader::new(Arc::new(app));

        let err = loader.get_source("missing.html").unwrap_err();
        assert!(err.is_not_found());

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        let (template, attempts) = &reports[0];
        assert_eq!(template, "missing.html");
        assert_eq!(attempts.len(), 3);
        assert!(attempts.iter().all(|attempt| !attempt.matched()));
    }

    #[test]
    fn test_explained_hit_scans_every_candidate_and_returns_first() {
        let sink = Arc::new(CollectingSink::new());
        let app = two_plugin_app()
            .with_config(AppConfig {
                explain_template_loading: true,
            })
            .with_trace_sink(Arc::clone(&sink));
        let loader = DispatchingLoader::new(Arc::new(app));

        let found = loader.get_source("base.html").unwrap();
        assert_eq!(found.source, "site base");

        let reports = sink.reports();
        let (_, attempts) = &reports[0];
        assert_eq!(attempts.len(), 3);
        assert_eq!(
            attempts.iter().filter(|attempt| attempt.matched()).count(),
            2
        );
        assert_eq!(attempts[0].owner, "site");
        assert_eq!(attempts[1].owner, "admin");
        assert_eq!(attempts[2].owner, "blog");
    }
}
