// ABOUTME: Render lifecycle notifications delivered to registered observers
// ABOUTME: Two ordered callback lists, invoked synchronously before and after each render

use serde_json::Value as JsonValue;

/// A template that made it to the render step. `name` is absent for renders
/// of literal source strings.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    pub name: Option<String>,
    pub source: String,
}

/// Payload delivered on both notification channels.
#[derive(Debug)]
pub struct RenderEvent<'a> {
    /// Name of the owning application.
    pub app: &'a str,
    pub template: &'a ResolvedTemplate,
    /// The final merged context the template is rendered against.
    pub context: &'a JsonValue,
}

type Hook = Box<dyn Fn(&RenderEvent<'_>) + Send + Sync>;

/// Observer registrations for the before-render and after-render channels.
/// Delivery is synchronous and in registration order; a panicking observer
/// unwinds to the render caller.
#[derive(Default)]
pub struct RenderHooks {
    before: Vec<Hook>,
    after: Vec<Hook>,
}

impl RenderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_render(&mut self, hook: impl Fn(&RenderEvent<'_>) + Send + Sync + 'static) {
        self.before.push(Box::new(hook));
    }

    pub fn on_after_render(&mut self, hook: impl Fn(&RenderEvent<'_>) + Send + Sync + 'static) {
        self.after.push(Box::new(hook));
    }

    pub(crate) fn notify_before(&self, event: &RenderEvent<'_>) {
        for hook in &self.before {
            hook(event);
        }
    }

    pub(crate) fn notify_after(&self, event: &RenderEvent<'_>) {
        for hook in &self.after {
            hook(event);
        }
    }
}
