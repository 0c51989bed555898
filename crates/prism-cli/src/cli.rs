//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Prism CLI - Structure free-text model answers into an evidence landscape.
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable summary (default)
    Summary,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pipeline over a file of model responses
    Run(RunArgs),

    /// Print the default configuration as TOML
    Config,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file of model responses: [{"model": 0, "text": "..."}]
    #[arg(short, long)]
    pub input: String,

    /// Optional JSON file with a claim graph; enables gate, conflict, and
    /// traversal-question derivation
    #[arg(long)]
    pub claims: Option<String>,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the full evidence graph as JSON to this path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Embedding dimension for the built-in deterministic provider
    #[arg(long, default_value = "256")]
    pub dimension: usize,
}

impl From<CliFormat> for crate::output::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Summary => crate::output::OutputFormat::Summary,
            CliFormat::Json => crate::output::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_parsing() {
        let cli = Cli::parse_from(["prism", "run", "--input", "responses.json"]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input, "responses.json");
                assert!(args.claims.is_none());
                assert_eq!(args.dimension, 256);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["prism", "--format", "json", "config"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn test_run_with_claims_and_config() {
        let cli = Cli::parse_from([
            "prism",
            "run",
            "--input",
            "responses.json",
            "--claims",
            "claims.json",
            "--config",
            "prism.toml",
        ]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.claims.as_deref(), Some("claims.json"));
                assert_eq!(args.config.as_deref(), Some("prism.toml"));
            }
            _ => panic!("Expected Run command"),
        }
    }
}
