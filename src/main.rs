use anyhow::Result;
use clap::Parser;
use vadscribe::app;
use vadscribe::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(cli)?;
    Ok(())
}
