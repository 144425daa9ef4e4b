use clap::Parser;
use shaderlib_tools::spv_to_cpp::{SpvToCppArgs, run};

fn main() -> anyhow::Result<()> {
    shaderlib_tools::init_logging();
    let args = SpvToCppArgs::parse();
    run(&args)
}
