//! Source Template Environment
//!
//! Output templates are embedded into the binary with `rust-embed` and
//! rendered through one shared minijinja [`Environment`].

use std::sync::OnceLock;

use minijinja::{Environment, Error, UndefinedBehavior};
use rust_embed::RustEmbed;
use serde::Serialize;

use crate::errors::Result;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateAssets;

pub fn get_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();

        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        env.set_loader(template_loader);

        env.add_filter("hex", hex);

        env
    })
}

fn template_loader(name: &str) -> std::result::Result<Option<String>, Error> {
    let Some(file) = TemplateAssets::get(name) else {
        return Ok(None);
    };
    Ok(std::str::from_utf8(file.data.as_ref())
        .ok()
        .map(str::to_string))
}

/// `{{ value | hex(width) }}`: zero-padded lowercase hex, without prefix.
fn hex(value: u64, width: Option<usize>) -> String {
    let width = width.unwrap_or(2);
    format!("{value:0width$x}")
}

/// Renders the embedded template `name` with `ctx`.
pub fn render<S: Serialize>(name: &str, ctx: &S) -> Result<String> {
    let template = get_env().get_template(name)?;
    let source = template.render(ctx)?;
    log::debug!("Rendered {name}: {} bytes", source.len());
    Ok(source)
}
