//! CLI entry point for the pipe-rotation puzzle solver

use clap::Parser;
use pipefit::io::cli::{Cli, SolveRunner};

fn main() -> pipefit::Result<()> {
    let cli = Cli::parse();
    let runner = SolveRunner::new(cli);
    runner.run()
}
