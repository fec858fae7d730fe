//! # Params Subcommand
//!
//! Validates a configuration document against a schema document.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use tdv_params::{load_config, load_schema, validate_params};

/// Arguments for the `tdv params` subcommand.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Schema document (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Configuration document to validate (YAML or JSON).
    #[arg(long)]
    pub config: PathBuf,

    /// Parameter names to skip. Repeatable.
    #[arg(long)]
    pub exclude: Vec<String>,
}

/// Execute the params subcommand.
pub fn run_params(args: &ParamsArgs) -> Result<u8> {
    let schema = load_schema(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;
    let config = load_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;

    let exclude: Vec<&str> = args.exclude.iter().map(String::as_str).collect();

    match validate_params(&config, &schema, &exclude) {
        Ok(()) => {
            println!("OK: {}", describe(&args.config, config.len()));
            Ok(0)
        }
        Err(e) => {
            tracing::info!(parameter = e.name(), "config rejected");
            eprintln!("FAIL: {}: {e}", args.config.display());
            Ok(1)
        }
    }
}

fn describe(path: &Path, count: usize) -> String {
    let noun = if count == 1 { "parameter" } else { "parameters" };
    format!("{} ({count} {noun})", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    const SCHEMA: &str = r#"
metric: { type: string, in: [bottleneck, wasserstein] }
random_state: { type: [integer, "null"] }
"#;

    #[test]
    fn test_valid_config_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParamsArgs {
            schema: write(&dir, "schema.yaml", SCHEMA),
            config: write(&dir, "config.yaml", "metric: bottleneck\n"),
            exclude: vec![],
        };
        assert_eq!(run_params(&args).unwrap(), 0);
    }

    #[test]
    fn test_invalid_config_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParamsArgs {
            schema: write(&dir, "schema.yaml", SCHEMA),
            config: write(&dir, "config.json", r#"{"metric": "heat"}"#),
            exclude: vec![],
        };
        assert_eq!(run_params(&args).unwrap(), 1);
    }

    #[test]
    fn test_excluded_unknown_parameter_passes() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParamsArgs {
            schema: write(&dir, "schema.yaml", SCHEMA),
            config: write(&dir, "config.yaml", "metric: bottleneck\nverbose: true\n"),
            exclude: vec!["verbose".to_string()],
        };
        assert_eq!(run_params(&args).unwrap(), 0);
    }

    #[test]
    fn test_missing_schema_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParamsArgs {
            schema: dir.path().join("missing.yaml"),
            config: write(&dir, "config.yaml", "metric: bottleneck\n"),
            exclude: vec![],
        };
        let err = run_params(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load schema"));
    }

    #[test]
    fn test_describe_pluralizes() {
        assert_eq!(describe(Path::new("c.yaml"), 1), "c.yaml (1 parameter)");
        assert_eq!(describe(Path::new("c.yaml"), 3), "c.yaml (3 parameters)");
    }
}
