mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);
    debug!("Parsed arguments: {:?}", cli);

    let result = match &cli.command {
        Some(Commands::Generate(args)) => commands::generate::run(&cli, args.clone()),
        Some(Commands::Init(args)) => commands::init::run(&cli, args.clone()),
        Some(Commands::Validate(args)) => commands::validate::run(&cli, args.clone()),
        Some(Commands::Info(args)) => commands::info::run(&cli, args.clone()),
        None => commands::generate::run_default(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over `-v`/`-q`. Logs go to stderr so reports on stdout stay parseable.
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
