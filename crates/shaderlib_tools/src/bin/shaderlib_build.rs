use clap::Parser;
use shaderlib_tools::library_builder::{BuildArgs, run};

fn main() -> anyhow::Result<()> {
    shaderlib_tools::init_logging();
    let args = BuildArgs::parse();
    run(&args)
}
