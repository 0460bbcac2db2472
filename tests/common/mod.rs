// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for laying out applications with template directories

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use signpost::{App, AppConfig, DirLoader, Plugin};

/// Builds an on-disk application layout: one template directory for the app
/// itself and one per plugin, in registration order.
pub struct TestSiteBuilder {
    root: TempDir,
    app_templates: Vec<(String, String)>,
    plugins: Vec<(String, Vec<(String, String)>)>,
    explain: bool,
}

impl TestSiteBuilder {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("failed to create temp dir"),
            app_templates: Vec::new(),
            plugins: Vec::new(),
            explain: false,
        }
    }

    pub fn with_app_template(mut self, name: &str, source: &str) -> Self {
        self.app_templates
            .push((name.to_string(), source.to_string()));
        self
    }

    pub fn with_plugin(mut self, plugin: &str, templates: &[(&str, &str)]) -> Self {
        self.plugins.push((
            plugin.to_string(),
            templates
                .iter()
                .map(|(name, source)| (name.to_string(), source.to_string()))
                .collect(),
        ));
        self
    }

    pub fn with_explain(mut self) -> Self {
        self.explain = true;
        self
    }

    /// Write the layout to disk and assemble the App over it. The TempDir is
    /// returned so it stays alive for the test's duration.
    pub fn build(self) -> (TempDir, Arc<App>) {
        let app_dir = self.root.path().join("templates");
        write_templates(&app_dir, &self.app_templates);

        let mut app = App::new("testsite")
            .with_loader(DirLoader::new(&app_dir))
            .with_config(AppConfig {
                explain_template_loading: self.explain,
            });

        for (plugin_name, templates) in &self.plugins {
            let plugin_dir = self.root.path().join("plugins").join(plugin_name);
            write_templates(&plugin_dir, templates);
            app = app.register_plugin(
                Plugin::new(plugin_name).with_loader(DirLoader::new(&plugin_dir)),
            );
        }

        (self.root, Arc::new(app))
    }
}

fn write_templates(dir: &PathBuf, templates: &[(String, String)]) {
    fs::create_dir_all(dir).expect("failed to create template dir");
    for (name, source) in templates {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create nested template dir");
        }
        fs::write(path, source).expect("failed to write template");
    }
}
