//! `shaderlib-build`: compiles shader sources into a shader library.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shaderlib_core::builder::{BuildMode, BuildOptions, DEFAULT_OUTPUT, build_library};
use shaderlib_core::compiler::{DEFAULT_COMPILER, DEFAULT_COMPILER_OPTIONS, ExternalCompiler};
use shaderlib_core::{RandomModuleIds, ShaderMetadata};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Recreate the library schema before inserting
    Init,
    /// Append to an existing library
    Update,
}

impl From<Mode> for BuildMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Init => BuildMode::Init,
            Mode::Update => BuildMode::Update,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shaderlib-build")]
#[command(version)]
#[command(about = "Builds shader libraries.", long_about = None)]
pub struct BuildArgs {
    /// The path to a JSON metadata file describing a shader
    #[arg(value_name = "METAFILE")]
    pub metafile: PathBuf,

    /// Shader sources to compile, one per stage listed in the metadata
    #[arg(value_name = "SOURCES", required = true)]
    pub sources: Vec<PathBuf>,

    /// Whether to recreate the library or append to it
    #[arg(short, long, value_enum, default_value = "update")]
    pub mode: Mode,

    /// Shader compiler executable
    #[arg(long, default_value = DEFAULT_COMPILER)]
    pub compiler: PathBuf,

    /// Comma-separated arguments passed to the compiler
    #[arg(long, default_value = DEFAULT_COMPILER_OPTIONS, allow_hyphen_values = true)]
    pub compiler_opts: String,

    /// Library file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Directory compiled modules are written to
    #[arg(short = 'M', long, default_value = ".")]
    pub module_dir: PathBuf,
}

impl BuildArgs {
    #[must_use]
    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            mode: self.mode.into(),
            output: self.output.clone(),
            module_dir: self.module_dir.clone(),
        }
    }

    #[must_use]
    pub fn compiler(&self) -> ExternalCompiler {
        ExternalCompiler::with_options(&self.compiler, &self.compiler_opts)
    }
}

pub fn run(args: &BuildArgs) -> anyhow::Result<()> {
    let metadata = ShaderMetadata::from_path(&args.metafile)
        .with_context(|| format!("reading metadata {}", args.metafile.display()))?;

    let report = build_library(
        &metadata,
        &args.sources,
        &args.compiler(),
        &mut RandomModuleIds,
        &args.options(),
    )
    .with_context(|| format!("building shader {} into {}", metadata.name, args.output.display()))?;

    log::info!(
        "Built {} {} ({} module(s)) into {}",
        report.shader,
        report.version,
        report.modules.len(),
        args.output.display()
    );
    Ok(())
}
