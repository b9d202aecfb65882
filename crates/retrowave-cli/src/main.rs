use clap::Parser;
use retrowave_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible.
    if cli.verbose {
        logging::init_logging_stderr();
    } else if let Err(err) = logging::init_logging() {
        eprintln!("retrowave-dl: file logging unavailable ({:#}), using stderr", err);
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run().await {
        eprintln!("retrowave-dl error: {:#}", err);
        std::process::exit(1);
    }
}
