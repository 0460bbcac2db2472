// ABOUTME: Handlebars helper functions registered on every environment
// ABOUTME: Implements the timestamp, env, uuid, and hostname template helpers

use chrono::Utc;
use handlebars::{Context, Handlebars, Helper, Output, RenderContext, RenderError};
use std::env;
use uuid::Uuid;

/// Formats the current UTC time. Takes an optional strftime format string.
pub fn timestamp_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let format = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .unwrap_or("%Y-%m-%dT%H:%M:%SZ");

    out.write(&Utc::now().format(format).to_string())?;
    Ok(())
}

/// Reads an environment variable, falling back to an optional default.
pub fn env_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let var_name = h
        .param(0)
        .and_then(|v| v.value().as_str())
        .ok_or_else(|| RenderError::new("env helper requires a variable name parameter"))?;

    let default_value = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    out.write(&env::var(var_name).unwrap_or_else(|_| default_value.to_string()))?;
    Ok(())
}

/// Generates a fresh UUID v4.
pub fn uuid_helper(
    _h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    out.write(&Uuid::new_v4().to_string())?;
    Ok(())
}

/// Writes the server's hostname.
pub fn hostname_helper(
    _h: &Helper,
    _: &Handlebars,
    _: &Context,
    _rc: &mut RenderContext,
    out: &mut dyn Output,
) -> std::result::Result<(), RenderError> {
    let name = hostname::get().map_err(|_| RenderError::new("failed to get hostname"))?;
    out.write(&name.to_string_lossy())?;
    Ok(())
}

pub fn register_helpers(registry: &mut Handlebars) {
    registry.register_helper("timestamp", Box::new(timestamp_helper));
    registry.register_helper("env", Box::new(env_helper));
    registry.register_helper("uuid", Box::new(uuid_helper));
    registry.register_helper("hostname", Box::new(hostname_helper));
}
