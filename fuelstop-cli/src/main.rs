//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "fuelstop_core=info,fuelstop_data=info,fuelstop_cli=info";

fn main() {
    init_logging();
    if let Err(err) = fuelstop_cli::run() {
        eprintln!("fuelstop: {err}");
        std::process::exit(1);
    }
}

/// Route `log` records from the library crates to stderr, keeping stdout for
/// the JSON plan.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
