//! # Diagram Subcommand
//!
//! Loads persistence diagram batches from disk and checks them.
//!
//! ## Formats
//!
//! - `.npy`: a NumPy array of `float64`, any number of axes.
//! - `.json`: nested arrays of numbers. JSON has no non-finite numbers, so
//!   the strings `"inf"`, `"-inf"` and `"nan"` stand in for them (stacked
//!   diagrams label every point with `inf`).
//!
//! Arrays of any rank load successfully; the rank is checked by
//! `check_diagram` like every other invariant.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use ndarray::{ArrayD, IxDyn};
use serde_json::Value;

use tdv_diagram::{check_diagram, homology_dimensions};

/// Arguments for the `tdv diagram` subcommand.
#[derive(Args, Debug)]
pub struct DiagramArgs {
    /// Diagram batch files (.npy or .json).
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the diagram subcommand. Every file is checked, including those
/// after an unreadable one; the exit code is 1 if any of them fails.
pub fn run_diagram(args: &DiagramArgs) -> Result<u8> {
    let mut failures = 0usize;

    for path in &args.paths {
        let diagram = match load_diagram(path) {
            Ok(diagram) => diagram,
            Err(e) => {
                failures += 1;
                eprintln!("FAIL: {}: {e:#}", path.display());
                continue;
            }
        };
        match check_diagram(&diagram, false) {
            Ok(checked) => {
                let dims = homology_dimensions(&checked.view());
                println!(
                    "OK: {}: shape {:?}, homology dimensions {:?}",
                    path.display(),
                    checked.shape(),
                    dims
                );
            }
            Err(e) => {
                failures += 1;
                eprintln!("FAIL: {}: {e}", path.display());
            }
        }
    }

    tracing::info!(checked = args.paths.len(), failures, "diagram check complete");
    Ok(if failures == 0 { 0 } else { 1 })
}

/// Load a diagram batch from a `.npy` or `.json` file.
pub fn load_diagram(path: &Path) -> Result<ArrayD<f64>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let diagram = match ext {
        "npy" => ndarray_npy::read_npy::<_, ArrayD<f64>>(path)
            .with_context(|| format!("failed to read NumPy array {}", path.display()))?,
        "json" => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", path.display()))?;
            json_to_array(&value).with_context(|| format!("invalid array in {}", path.display()))?
        }
        other => bail!(
            "unsupported diagram format {other:?} for {}; expected .npy or .json",
            path.display()
        ),
    };
    tracing::debug!(path = %path.display(), shape = ?diagram.shape(), "loaded diagram");
    Ok(diagram)
}

/// Convert nested JSON arrays into an n-dimensional array.
///
/// The shape is read from the first element at each depth; every other
/// element must agree with it. Nothing is allocated from the shape until
/// the whole document has been walked.
pub fn json_to_array(value: &Value) -> Result<ArrayD<f64>> {
    let mut shape = Vec::new();
    let mut cursor = value;
    while let Value::Array(items) = cursor {
        shape.push(items.len());
        match items.first() {
            Some(first) => cursor = first,
            None => break,
        }
    }

    let mut data = Vec::new();
    flatten(value, &shape, 0, &mut data)?;

    ArrayD::from_shape_vec(IxDyn(&shape), data).context("element count does not match shape")
}

fn flatten(value: &Value, shape: &[usize], depth: usize, out: &mut Vec<f64>) -> Result<()> {
    match (value, shape.get(depth)) {
        (Value::Array(items), Some(&len)) => {
            if items.len() != len {
                bail!(
                    "ragged array: expected {len} elements at depth {depth}, found {}",
                    items.len()
                );
            }
            for item in items {
                flatten(item, shape, depth + 1, out)?;
            }
            Ok(())
        }
        (Value::Array(_), None) => bail!("ragged array: unexpected nesting at depth {depth}"),
        (_, Some(_)) => bail!("ragged array: expected an array at depth {depth}, found {value}"),
        (scalar, None) => {
            out.push(scalar_to_f64(scalar)?);
            Ok(())
        }
    }
}

fn scalar_to_f64(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .with_context(|| format!("number {n} is not representable as f64")),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "inf" | "+inf" | "infinity" => Ok(f64::INFINITY),
            "-inf" | "-infinity" => Ok(f64::NEG_INFINITY),
            "nan" => Ok(f64::NAN),
            _ => bail!("expected a number, found string {s:?}"),
        },
        other => bail!("expected a number, found {other}"),
    }
}
