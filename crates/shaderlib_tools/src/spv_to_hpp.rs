//! `spv2hpp`: embeds one binary into a header as 32-bit words.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shaderlib_codegen::convert_word_header;
use shaderlib_codegen::word_header::DEFAULT_NAMESPACE;

#[derive(Debug, Parser)]
#[command(name = "spv2hpp")]
#[command(version)]
#[command(about = "Writes a SPIR-V binary as a C++ header of 32-bit words.", long_about = None)]
pub struct SpvToHppArgs {
    /// Header to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// SPIR-V binary to embed
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Namespace the array is declared in; also prefixes the include guard
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

pub fn run(args: &SpvToHppArgs) -> anyhow::Result<()> {
    let header = convert_word_header(&args.input, &args.namespace)
        .with_context(|| format!("converting {}", args.input.display()))?;
    crate::write_output(Some(&args.output), &header)
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(())
}
