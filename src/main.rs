use anyhow::Result;
use clap::Parser;
use tracing::debug;

use user_create::logging::init_logging;
use user_create::{Cli, RequestRunner, RunnerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();

    let config = RunnerConfig::from(Cli::parse());
    debug!(endpoint = %config.endpoint, "posting user");

    // Transport faults are returned as-is: the process exits non-zero and
    // nothing is printed on stdout.
    let outcome = RequestRunner::from_config(config).run().await?;
    println!("{}", outcome.message());
    Ok(())
}
