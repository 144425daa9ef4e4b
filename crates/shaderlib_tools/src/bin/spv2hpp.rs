use clap::Parser;
use shaderlib_tools::spv_to_hpp::{SpvToHppArgs, run};

fn main() -> anyhow::Result<()> {
    shaderlib_tools::init_logging();
    let args = SpvToHppArgs::parse();
    run(&args)
}
