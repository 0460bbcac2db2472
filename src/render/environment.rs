// ABOUTME: Template environment wrapping the handlebars registry and a loader
// ABOUTME: Provides render-by-name, candidate-list, and literal-source entry points

use handlebars::Handlebars;
use std::sync::Arc;

use crate::app::App;
use crate::loader::{DispatchingLoader, Loader, TemplateSource};

use super::context::{merge_context, RenderContext, TemplateVars};
use super::error::{RenderError, Result};
use super::helpers;
use super::hooks::{RenderEvent, RenderHooks, ResolvedTemplate};

/// A configured template engine bound to a loader and an observer registry.
pub struct Environment {
    registry: Handlebars<'static>,
    loader: Box<dyn Loader>,
    app_name: String,
    hooks: RenderHooks,
}

impl Environment {
    /// Build an environment for an application, installing the dispatching
    /// loader scoped to it.
    pub fn new(app: Arc<App>) -> Self {
        let app_name = app.name().to_string();
        Self::with_named_loader(app_name, DispatchingLoader::new(app))
    }

    /// Build an environment around an explicit loader, bypassing dispatch.
    pub fn with_loader(app_name: impl Into<String>, loader: impl Loader + 'static) -> Self {
        Self::with_named_loader(app_name.into(), loader)
    }

    fn with_named_loader(app_name: String, loader: impl Loader + 'static) -> Self {
        Self {
            registry: Self::configure_registry(),
            loader: Box::new(loader),
            app_name,
            hooks: RenderHooks::new(),
        }
    }

    fn configure_registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();

        // Missing variables render as empty rather than failing; HTML escaping
        // stays on since output is served to browsers.
        registry.set_strict_mode(false);
        helpers::register_helpers(&mut registry);

        registry
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn register_before_render(&mut self, hook: impl Fn(&RenderEvent<'_>) + Send + Sync + 'static) {
        self.hooks.on_before_render(hook);
    }

    pub fn register_after_render(&mut self, hook: impl Fn(&RenderEvent<'_>) + Send + Sync + 'static) {
        self.hooks.on_after_render(hook);
    }

    /// Render a template by name with the given context and caller variables.
    pub fn render(&self, name: &str, ctx: &RenderContext, vars: &TemplateVars) -> Result<String> {
        self.render_first(&[name], ctx, vars)
    }

    /// Render the first resolvable name from an ordered candidate list.
    /// Not-found is raised only when every candidate misses; it names all the
    /// candidates tried.
    pub fn render_first(
        &self,
        names: &[&str],
        ctx: &RenderContext,
        vars: &TemplateVars,
    ) -> Result<String> {
        let (name, found) = self.select_template(names)?;
        let template = ResolvedTemplate {
            name: Some(name),
            source: found.source,
        };
        self.render_resolved(&template, ctx, vars)
    }

    /// Render a literal template source string. No loader is involved.
    pub fn render_str(
        &self,
        source: &str,
        ctx: &RenderContext,
        vars: &TemplateVars,
    ) -> Result<String> {
        let template = ResolvedTemplate {
            name: None,
            source: source.to_string(),
        };
        self.render_resolved(&template, ctx, vars)
    }

    /// Resolve a template and check that it compiles, without rendering.
    pub fn check(&self, name: &str) -> Result<TemplateSource> {
        let found = self.loader.get_source(name)?;
        handlebars::Template::compile(&found.source)?;
        Ok(found)
    }

    /// Every template name visible through the environment's loader,
    /// deduplicated when the loader dispatches across several sources.
    pub fn template_names(&self) -> Vec<String> {
        self.loader.list_templates()
    }

    pub fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }

    fn select_template(&self, names: &[&str]) -> Result<(String, TemplateSource)> {
        for name in names {
            match self.loader.get_source(name) {
                Ok(found) => return Ok((name.to_string(), found)),
                Err(err) if err.is_not_found() => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(RenderError::TemplateNotFound {
            name: if names.is_empty() {
                "(no candidates)".to_string()
            } else {
                names.join(", ")
            },
        })
    }

    fn render_resolved(
        &self,
        template: &ResolvedTemplate,
        ctx: &RenderContext,
        vars: &TemplateVars,
    ) -> Result<String> {
        let context = merge_context(ctx, vars)?;
        let event = RenderEvent {
            app: &self.app_name,
            template,
            context: &context,
        };

        self.hooks.notify_before(&event);
        let output = self.registry.render_template(&template.source, &context)?;
        self.hooks.notify_after(&event);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryLoader;
    use crate::render::context::{RequestInfo, RequestScope};
    use std::sync::{Arc, Mutex};

    fn environment() -> Environment {
        Environment::with_loader(
            "site",
            MemoryLoader::new()
                .with_template("hello.html", "Hello {{name}}!")
                .with_template("who.html", "{{request.method}} {{request.path}}"),
        )
    }

    #[test]
    fn test_render_by_name() {
        let env = environment();
        let output = env
            .render(
                "hello.html",
                &RenderContext::new(),
                &TemplateVars::new().with("name", "World"),
            )
            .unwrap();
        assert_eq!(output, "Hello World!");
    }

    #[test]
    fn test_render_injects_request_defaults() {
        let env = environment();
        let ctx = RenderContext::new()
            .with_request_scope(RequestScope::new(RequestInfo::new("GET", "/index")));

        let output = env.render("who.html", &ctx, &TemplateVars::new()).unwrap();
        assert_eq!(output, "GET /index");
    }

    #[test]
    fn test_render_first_falls_through_missing_candidates() {
        let env = environment();
        let output = env
            .render_first(
                &["missing1.html", "missing2.html", "hello.html"],
                &RenderContext::new(),
                &TemplateVars::new().with("name", "there"),
            )
            .unwrap();
        assert_eq!(output, "Hello there!");
    }

    #[test]
    fn test_render_first_with_all_missing_raises_not_found() {
        let env = environment();
        let err = env
            .render_first(
                &["missing1.html", "missing2.html"],
                &RenderContext::new(),
                &TemplateVars::new(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing1.html"));
        assert!(err.to_string().contains("missing2.html"));
    }

    #[test]
    fn test_render_str_compiles_literal_source() {
        let env = environment();
        let output = env
            .render_str(
                "{{greeting}}, {{name}}",
                &RenderContext::new(),
                &TemplateVars::new().with("greeting", "Hi").with("name", "you"),
            )
            .unwrap();
        assert_eq!(output, "Hi, you");
    }

    #[test]
    fn test_render_escapes_html_by_default() {
        let env = environment();
        let output = env
            .render_str(
                "{{content}}",
                &RenderContext::new(),
                &TemplateVars::new().with("content", "<b>bold</b>"),
            )
            .unwrap();
        assert_eq!(output, "&lt;b&gt;bold&lt;/b&gt;");
    }

    #[test]
    fn test_hooks_bracket_render_with_final_context() {
        let mut env = environment();
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        {
            let seen = Arc::clone(&seen);
            env.register_before_render(move |event| {
                seen.lock().unwrap().push(format!(
                    "before {} {}",
                    event.template.name.as_deref().unwrap_or("<string>"),
                    event.context["name"]
                ));
            });
        }
        {
            let seen = Arc::clone(&seen);
            env.register_after_render(move |event| {
                seen.lock()
                    .unwrap()
                    .push(format!("after {}", event.app));
            });
        }

        env.render(
            "hello.html",
            &RenderContext::new(),
            &TemplateVars::new().with("name", "Ada"),
        )
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["before hello.html \"Ada\"", "after site"]);
    }

    #[test]
    fn test_check_reports_syntax_errors() {
        let env = Environment::with_loader(
            "site",
            MemoryLoader::new().with_template("broken.html", "Hello {{name"),
        );

        let err = env.check("broken.html").unwrap_err();
        assert!(matches!(err, RenderError::SyntaxError(_)));

        assert!(env.check("absent.html").unwrap_err().is_not_found());
    }
}
