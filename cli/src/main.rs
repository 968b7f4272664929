mod commands;
mod terminal;

use std::time::Duration;

use commands::CommandLine;
use sweepr_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    let cfg = Config {
        probe_timeout: Duration::from_millis(commands.timeout_ms),
        concurrency: commands.concurrency,
    };

    print::header("subnet liveness sweep");
    commands::sweep::sweep(commands.network, &cfg).await
}
