use clap::Parser;
use toolsense::cli::{self, Cli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let default_level = if cfg!(debug_assertions) {
        "toolsense=trace,warn"
    } else {
        "toolsense=info,warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
