use clap::Parser;
use venvman::cli::Cli;
use venvman::{commands, ui};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "venvman=debug"
    } else {
        "venvman=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    if let Err(err) = commands::execute(cli) {
        ui::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
