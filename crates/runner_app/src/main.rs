mod cli;
mod platform;

use clap::Parser;
use runner_logging::{runner_info, runner_warn};

fn main() -> anyhow::Result<()> {
    // Before parsing so env-backed flags see values from `.env`.
    let env_file = dotenvy::dotenv();
    let cli = cli::Cli::parse();
    platform::logging::initialize(cli.log, cli.verbose);

    match env_file {
        Ok(path) => runner_info!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => runner_warn!("Ignoring unreadable .env file: {}", err),
    }

    platform::run_app(cli)
}
