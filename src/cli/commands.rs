// ABOUTME: Command implementations for the signpost CLI
// ABOUTME: Builds the application from configuration and executes render, list, and check

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::{App, AppConfig, Plugin};
use crate::loader::DirLoader;
use crate::render::{Environment, RenderContext, TemplateVars};

use super::Config;

/// Assemble the application described by the configuration and wrap it in an
/// environment. The app's own template directory comes first, then each
/// configured plugin in file order.
pub fn build_environment(config: &Config) -> Environment {
    let mut app = App::new("signpost").with_config(AppConfig {
        explain_template_loading: config.explain_template_loading,
    });

    if let Some(dir) = &config.template_dir {
        app = app.with_loader(DirLoader::new(dir));
    }

    for plugin in &config.plugins {
        app = app.register_plugin(
            Plugin::new(&plugin.name).with_loader(DirLoader::new(&plugin.template_dir)),
        );
    }

    Environment::new(Arc::new(app))
}

fn template_vars(config: &Config) -> TemplateVars {
    config
        .template_vars
        .iter()
        .map(|(key, value)| (key.clone(), value.clone().into()))
        .collect()
}

pub fn render(
    template: &str,
    as_string: bool,
    output: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let env = build_environment(config);
    let vars = template_vars(config);
    let ctx = RenderContext::new();

    let rendered = if as_string {
        debug!("rendering literal template source");
        env.render_str(template, &ctx, &vars)?
    } else {
        debug!("rendering template '{}'", template);
        env.render(template, &ctx, &vars)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write output to {}", path.display()))?;
            info!("rendered output written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let env = build_environment(config);

    let mut names = env.template_names();
    names.sort();

    info!("{} templates visible", names.len());
    for name in names {
        println!("{}", name);
    }

    Ok(())
}

pub fn check(template: &str, config: &Config) -> Result<()> {
    let env = build_environment(config);

    let found = env.check(template)?;
    match &found.origin {
        Some(path) => println!("ok: {} ({})", template, path.display()),
        None => println!("ok: {}", template),
    }

    Ok(())
}
