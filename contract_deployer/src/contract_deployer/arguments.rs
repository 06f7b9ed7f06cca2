//!
//! The contract deployer arguments.
//!

use std::path::PathBuf;

use clap::Parser;

///
/// The contract deployer arguments.
///
#[derive(Debug, Parser)]
#[command(about, long_about = None)]
pub struct Arguments {
    /// Prints the deployment progress details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppresses the output completely.
    #[arg(short, long)]
    pub quiet: bool,

    /// The network profile name, e.g. `development` or `goerli`.
    #[arg(short, long, default_value_t = contract_deployer::NetworkProfile::DEFAULT_NAME.to_owned())]
    pub network: String,

    /// The compiled contract artifact path.
    /// Is set to `./build/contracts/Agrop.json` by default.
    #[arg(short, long)]
    pub artifact: Option<PathBuf>,

    /// Submits the source code to the network block explorer after the deployment.
    /// Requires the `ETHERSCAN_API_KEY` environment variable.
    #[arg(long)]
    pub verify: bool,

    /// The delay between two confirmation polls, in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// The wall-clock limit of the confirmation wait, in seconds.
    /// Is derived from the network profile block window by default.
    #[arg(long)]
    pub confirmation_timeout_secs: Option<u64>,
}

impl Arguments {
    ///
    /// Validates the arguments.
    ///
    pub fn validate(arguments: Self) -> anyhow::Result<Self> {
        if arguments.verbose && arguments.quiet {
            anyhow::bail!("The `verbose` and `quiet` options are mutually exclusive");
        }
        if arguments.poll_interval_ms == Some(0) {
            anyhow::bail!("The poll interval must be positive");
        }
        if arguments.confirmation_timeout_secs == Some(0) {
            anyhow::bail!("The confirmation timeout must be positive");
        }

        Ok(arguments)
    }
}
