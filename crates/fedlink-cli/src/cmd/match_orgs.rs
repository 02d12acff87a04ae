//! Implementation of `fedlink match`.
//!
//! Reads the three input datasets, runs all strategies over the full
//! IdP × organization cross product, and persists the results to the output
//! directory:
//!
//! - `results-name.json` — name-strategy weights
//! - `results-hostname.json` — hostname-strategy weights
//! - `results-crosswalk.json` — crosswalk-strategy weights
//! - `results-combined.json` — summed weights across all strategies
//! - `report.json` — the full report including classification tallies
//!
//! The five-row classification summary goes to stderr (or NDJSON in
//! `--format json` mode).
//!
//! Exit codes: 0 = success, 1 = results could not be written, 2 = an input
//! could not be read or parsed.
use std::path::Path;
use std::time::Instant;

use fedlink_core::{MatchReport, MatrixKind, run_match};

use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_note, write_tally_table, write_timing};
use crate::io::{ensure_dir, write_file};

/// Runs the `match` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 when an input dataset cannot be
/// read or parsed, and exit code 1 when results cannot be written to `out`.
pub fn run(
    federation: &Path,
    registry: &Path,
    crosswalk: &Path,
    out: &Path,
    max_file_size: u64,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    let start = Instant::now();
    let datasets = super::Datasets::load(federation, registry, crosswalk, max_file_size)?;
    note(
        &mut err_out,
        &format!(
            "parsed {} IdPs, {} organizations, {} crosswalk pairs",
            datasets.idps.len(),
            datasets.orgs.len(),
            datasets.pairs.len()
        ),
        mode,
        config,
    )?;
    timing(&mut err_out, "inputs parsed", start, mode, config)?;

    let start = Instant::now();
    let output = run_match(&datasets.idps, &datasets.orgs, &datasets.pairs);
    let report = MatchReport::new(&output);
    note(
        &mut err_out,
        &format!("{} scored pairs in the combined matrix", output.combined.edge_count()),
        mode,
        config,
    )?;
    timing(&mut err_out, "matching complete", start, mode, config)?;

    ensure_dir(out)?;
    for (file_name, kind) in [
        ("results-name.json", MatrixKind::Name),
        ("results-hostname.json", MatrixKind::Hostname),
        ("results-crosswalk.json", MatrixKind::Crosswalk),
        ("results-combined.json", MatrixKind::CombinedSum),
    ] {
        let path = out.join(file_name);
        let payload = to_pretty_json(report.matrix(kind), &path)?;
        write_file(&path, &payload)?;
    }
    let report_path = out.join("report.json");
    let payload = to_pretty_json(&report, &report_path)?;
    write_file(&report_path, &payload)?;

    let tallies: Vec<_> = MatrixKind::ALL
        .iter()
        .filter_map(|kind| report.tallies.get(kind).map(|t| (*kind, *t)))
        .collect();
    write_tally_table(&mut err_out, &tallies, mode, config).map_err(stderr_error)?;

    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<Vec<u8>, CliError> {
    serde_json::to_vec_pretty(value).map_err(|e| CliError::WriteFailed {
        path: path.to_path_buf(),
        detail: format!("JSON serialization failed: {e}"),
    })
}

fn note(
    writer: &mut impl std::io::Write,
    text: &str,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    write_note(writer, text, mode, config).map_err(stderr_error)
}

fn timing(
    writer: &mut impl std::io::Write,
    label: &str,
    start: Instant,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    write_timing(writer, label, start.elapsed(), mode, config).map_err(stderr_error)
}

fn stderr_error(e: std::io::Error) -> CliError {
    CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    }
}
