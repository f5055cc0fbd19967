//! Clap derive structure for the `wattly` CLI.
//!
//! One operation, so a flat flag set rather than a command tree.

use std::path::PathBuf;

use clap::Parser;

use wattly_api::Action;

/// wattly -- control outlets on a DLI web power switch
#[derive(Debug, Parser)]
#[command(
    name = "wattly",
    version,
    about = "Toggle power outlets on a networked power switch",
    long_about = "Authenticates against the web interface of a DLI-style power \
        switch and turns a single outlet (or all outlets) on or off, or \
        power-cycles it.\n\n\
        Device URL and credentials come from a config.yaml with URL, USER, \
        and PASS keys; environment variables of the same names override the \
        file."
)]
pub struct Cli {
    /// Outlet number to control (0 = all outlets)
    #[arg(long, short = 'n')]
    pub outlet: u32,

    /// Action to perform (on, off, cycle)
    #[arg(long, short = 'a', default_value = "on")]
    pub action: Action,

    /// Directory searched for config.yaml
    #[arg(long, env = "WATTLY_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Device base URL (overrides the config file)
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "WATTLY_TIMEOUT", default_value = "30")]
    pub timeout: u64,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "WATTLY_INSECURE")]
    pub insecure: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
