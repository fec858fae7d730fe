//! # tdv CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tdv_cli::diagram::{run_diagram, DiagramArgs};
use tdv_cli::params::{run_params, ParamsArgs};

/// tdv: validation for topological data analysis pipelines.
///
/// Checks hyperparameter documents against declarative schemas and
/// persistence diagram batches against their structural invariants.
#[derive(Parser, Debug)]
#[command(name = "tdv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a configuration document against a schema document.
    Params(ParamsArgs),

    /// Check persistence diagram batches stored as .npy or JSON.
    Diagram(DiagramArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("tdv CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Params(args) => run_params(&args),
        Commands::Diagram(args) => run_diagram(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_params() {
        let cli = Cli::try_parse_from([
            "tdv",
            "params",
            "--schema",
            "schema.yaml",
            "--config",
            "config.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Params(args) => {
                assert_eq!(args.schema, PathBuf::from("schema.yaml"));
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(args.exclude.is_empty());
            }
            other => panic!("expected Params, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_params_repeated_exclude() {
        let cli = Cli::try_parse_from([
            "tdv",
            "params",
            "--schema",
            "s.yaml",
            "--config",
            "c.yaml",
            "--exclude",
            "n_jobs",
            "--exclude",
            "random_state",
        ])
        .unwrap();
        if let Commands::Params(args) = cli.command {
            assert_eq!(args.exclude, vec!["n_jobs", "random_state"]);
        }
    }

    #[test]
    fn cli_parse_params_requires_schema() {
        assert!(Cli::try_parse_from(["tdv", "params", "--config", "c.yaml"]).is_err());
    }

    #[test]
    fn cli_parse_diagram_multiple_paths() {
        let cli = Cli::try_parse_from(["tdv", "diagram", "a.npy", "b.json"]).unwrap();
        match cli.command {
            Commands::Diagram(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.npy"), PathBuf::from("b.json")]);
            }
            other => panic!("expected Diagram, got {other:?}"),
        }
    }

    #[test]
    fn cli_parse_diagram_requires_path() {
        assert!(Cli::try_parse_from(["tdv", "diagram"]).is_err());
    }

    #[test]
    fn cli_parse_verbosity() {
        let cli = Cli::try_parse_from(["tdv", "-vv", "diagram", "a.npy"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
