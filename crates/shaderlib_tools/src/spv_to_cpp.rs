//! `spv2cpp`: embeds stage binaries into a C++ source file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shaderlib_codegen::{BuiltinSourceOptions, convert_builtin_source};

#[derive(Debug, Parser)]
#[command(name = "spv2cpp")]
#[command(version)]
#[command(about = "Builds a C++ source file from SPIR-V binaries.", long_about = None)]
pub struct SpvToCppArgs {
    /// SPIR-V files to build C++ source from
    #[arg(value_name = "SOURCES", required = true)]
    pub sources: Vec<PathBuf>,

    /// The desired name of the resulting shader. If no name is provided it will be inferred
    #[arg(long)]
    pub shader_name: Option<String>,

    /// A path to write output to (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Header declaring the built-in shader registry
    #[arg(long, default_value = "builtin_shaders.hpp")]
    pub include: String,

    /// Namespace the registrations are emitted into
    #[arg(long, default_value = "detail")]
    pub namespace: String,
}

impl SpvToCppArgs {
    #[must_use]
    pub fn options(&self) -> BuiltinSourceOptions {
        BuiltinSourceOptions {
            include: self.include.clone(),
            cpp_namespace: self.namespace.clone(),
        }
    }
}

pub fn run(args: &SpvToCppArgs) -> anyhow::Result<()> {
    let source = convert_builtin_source(&args.sources, args.shader_name.as_deref(), &args.options())
        .context("converting SPIR-V binaries")?;
    crate::write_output(args.output.as_deref(), &source).context("writing C++ source")?;
    Ok(())
}
