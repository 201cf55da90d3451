//! CLI entry point for headless cellular automaton runs

use clap::Parser;
use lifegrid::io::cli::{Cli, Runner};

fn main() -> lifegrid::Result<()> {
    let cli = Cli::parse();
    let runner = Runner::new(cli);
    runner.run()?;
    Ok(())
}
