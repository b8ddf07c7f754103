use anyhow::Result;
use backtranslate::{cli, cli::Cli, infra::logging::init_logging};
use clap::Parser;

fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_file)?;
    cli::run(config)
}
