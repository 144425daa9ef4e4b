use clap::Parser;
use shaderlib_tools::library_merger::{MergeArgs, run};

fn main() -> anyhow::Result<()> {
    shaderlib_tools::init_logging();
    let args = MergeArgs::parse();
    run(&args)
}
