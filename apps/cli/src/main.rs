//! docweld CLI — documentation aggregation for Markdown doc trees.
//!
//! Expands a seed index of links into one flattened reference document and
//! composes per-language one-page manuals in curated navigation order.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
