mod cli;
mod error;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wattly_api::{OutletSelector, PduClient, TransportConfig};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Run the pipeline and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = wattly_config::load(&cli.config_dir)?;

    // CLI flag override takes priority over the config file.
    if let Some(ref url) = cli.url {
        config.url = url.parse().map_err(|_| CliError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {url}"),
        })?;
    }

    let transport = TransportConfig {
        timeout: Duration::from_secs(cli.timeout),
        insecure: cli.insecure,
    };
    let client = PduClient::new(config.url, &transport)?;

    let outlet = OutletSelector::from(cli.outlet);

    tracing::debug!(%outlet, action = %cli.action, "logging in at {}", client.base_url());
    let session = client.login(&config.username, &config.password).await?;

    if !cli.quiet {
        eprintln!("{}", cli.action.describe(outlet));
    }
    client.toggle(outlet, cli.action, &session).await?;

    if !cli.quiet {
        println!("OK");
    }
    Ok(())
}
