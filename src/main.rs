use anyhow::Result;
use brixdev::cli::{Cli, Runtime};
use brixdev::logging::init_logger;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    // .env may carry the database password
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logger(&cli.log_options())?;
    debug!("command line arguments: {:?}", cli.command);

    let runtime = Runtime::from_cli(&cli)?;
    runtime.run(&cli.command)
}
