//! Prism CLI - command-line front end for the evidence-structuring pipeline.

use clap::Parser;
use prism_cli::{commands, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> prism_cli::Result<()> {
    let cli = Cli::parse();
    let format = cli.format.map(Into::into).unwrap_or_default();
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, &formatter).await,
        Command::Config => commands::execute_config(),
    }
}
