// ABOUTME: Render context assembly and injected default variables
// ABOUTME: Merges request-scoped layers with caller variables, caller winning on collision

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

use super::error::Result;

/// Request metadata injected as the `request` template variable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub remote_addr: Option<String>,
}

impl RequestInfo {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: HashMap::new(),
            remote_addr: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }
}

/// Request-scoped layer: the active request and its session values.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    pub request: RequestInfo,
    pub session: HashMap<String, JsonValue>,
}

impl RequestScope {
    pub fn new(request: RequestInfo) -> Self {
        Self {
            request,
            session: HashMap::new(),
        }
    }

    pub fn with_session_value(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.session.insert(key.into(), value.into());
        self
    }
}

/// Application-scoped layer: shared per-request state, injected as `state`.
#[derive(Debug, Clone, Default)]
pub struct AppScope {
    pub state: HashMap<String, JsonValue>,
}

impl AppScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.state.insert(key.into(), value.into());
        self
    }
}

/// The context handed into render calls by reference. Layers that are absent
/// contribute no injected variables.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    request_scope: Option<RequestScope>,
    app_scope: Option<AppScope>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_scope(mut self, scope: RequestScope) -> Self {
        self.request_scope = Some(scope);
        self
    }

    pub fn with_app_scope(mut self, scope: AppScope) -> Self {
        self.app_scope = Some(scope);
        self
    }

    pub fn request_scope(&self) -> Option<&RequestScope> {
        self.request_scope.as_ref()
    }

    pub fn app_scope(&self) -> Option<&AppScope> {
        self.app_scope.as_ref()
    }

    /// Injected defaults for whichever layers are active: `state` from the
    /// application scope, `request` and `session` from the request scope.
    fn default_vars(&self) -> Result<Map<String, JsonValue>> {
        let mut vars = Map::new();

        if let Some(scope) = &self.app_scope {
            vars.insert("state".to_string(), serde_json::to_value(&scope.state)?);
        }
        if let Some(scope) = &self.request_scope {
            vars.insert("request".to_string(), serde_json::to_value(&scope.request)?);
            vars.insert("session".to_string(), serde_json::to_value(&scope.session)?);
        }

        Ok(vars)
    }
}

/// Caller-supplied template variables, applied on top of the injected
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars(Map<String, JsonValue>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, JsonValue)> for TemplateVars {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build the final context object. Injected defaults go in first, caller
/// variables second, so a caller key always overwrites an injected one.
pub(crate) fn merge_context(ctx: &RenderContext, vars: &TemplateVars) -> Result<JsonValue> {
    let mut merged = ctx.default_vars()?;
    for (key, value) in vars.iter() {
        merged.insert(key.clone(), value.clone());
    }
    Ok(JsonValue::Object(merged))
}
