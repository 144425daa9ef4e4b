//! `shaderlib-merge`: merges shader libraries into one.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shaderlib_core::builder::DEFAULT_OUTPUT;
use shaderlib_core::merge_libraries;

#[derive(Debug, Parser)]
#[command(name = "shaderlib-merge")]
#[command(version)]
#[command(about = "Merges shader libraries.", long_about = None)]
pub struct MergeArgs {
    /// Libraries to merge; paths that do not exist are skipped
    #[arg(value_name = "DBS", required = true)]
    pub dbs: Vec<PathBuf>,

    /// Library file to (re)create
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

pub fn run(args: &MergeArgs) -> anyhow::Result<()> {
    let report = merge_libraries(&args.output, &args.dbs)
        .with_context(|| format!("merging into {}", args.output.display()))?;
    log::info!(
        "Merged {} of {} libraries into {}",
        report.merged.len(),
        args.dbs.len(),
        args.output.display()
    );
    Ok(())
}
