//! Command line front-ends.
//!
//! Each tool is a typed [`clap`] argument struct plus a `run` function; the
//! binaries under `src/bin` only parse arguments, set up logging and call
//! `run`.

pub mod library_builder;
pub mod library_merger;
pub mod spv_to_cpp;
pub mod spv_to_hpp;

use std::io::Write;
use std::path::Path;

/// Initializes `env_logger` at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Writes generated text to `output`, or to stdout when no path is given.
///
/// Both destinations get the same bytes: `text` followed by one newline.
pub fn write_output(output: Option<&Path>, text: &str) -> std::io::Result<()> {
    match output {
        Some(path) => write_text(&mut std::fs::File::create(path)?, text),
        None => write_text(&mut std::io::stdout().lock(), text),
    }
}

fn write_text(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}
