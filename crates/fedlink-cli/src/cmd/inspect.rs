//! Implementation of `fedlink inspect`.
//!
//! Parses the three input datasets and prints summary statistics to stdout:
//! IdP counts (total, lacking a display name, lacking a usable URL host),
//! organization counts (total, aliases, parsed links, dropped links), and
//! crosswalk counts (pairs, distinct organizations, skipped bindings).
//!
//! In `--format json` mode a single JSON object is emitted to stdout.
//! In human mode, aligned key/value lines are printed.
//!
//! Exit codes: 0 = success, 2 = read or parse failure.
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

use super::Datasets;

/// Statistics gathered from the parsed datasets.
#[derive(Serialize)]
pub struct InspectStats {
    /// Total IdP entities in the federation metadata.
    pub idp_count: usize,
    /// IdPs with no organization display name in any language.
    pub idps_without_name: usize,
    /// IdPs whose best organization URL has no usable host.
    pub idps_without_host: usize,
    /// Total organizations in the registry dump.
    pub org_count: usize,
    /// Aliases across all organizations (labels folded in).
    pub alias_count: usize,
    /// Parsed links across all organizations.
    pub link_count: usize,
    /// Registry links dropped because they were not absolute URLs.
    pub skipped_links: usize,
    /// Complete crosswalk pairs.
    pub pair_count: usize,
    /// Distinct organizations named by at least one crosswalk pair.
    pub crosswalk_org_count: usize,
    /// Crosswalk bindings dropped as incomplete.
    pub skipped_bindings: usize,
}

impl InspectStats {
    /// Computes statistics from the parsed datasets.
    pub fn from_datasets(datasets: &Datasets) -> Self {
        let idps_without_name = datasets
            .idps
            .iter()
            .filter(|i| i.organization_name().is_none())
            .count();
        let idps_without_host = datasets
            .idps
            .iter()
            .filter(|i| i.organization_host().is_none())
            .count();

        let alias_count = datasets.orgs.iter().map(|o| o.aliases.len()).sum();
        let link_count = datasets.orgs.iter().map(|o| o.links.len()).sum();

        let crosswalk_orgs: BTreeSet<&str> = datasets
            .pairs
            .iter()
            .map(|p| p.org_id.as_str())
            .collect();

        Self {
            idp_count: datasets.idps.len(),
            idps_without_name,
            idps_without_host,
            org_count: datasets.orgs.len(),
            alias_count,
            link_count,
            skipped_links: datasets.skipped_links,
            pair_count: datasets.pairs.len(),
            crosswalk_org_count: crosswalk_orgs.len(),
            skipped_bindings: datasets.skipped_bindings,
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 when a dataset cannot be read or
/// parsed.
pub fn run(
    federation: &Path,
    registry: &Path,
    crosswalk: &Path,
    max_file_size: u64,
    format: &OutputFormat,
) -> Result<(), CliError> {
    let datasets = Datasets::load(federation, registry, crosswalk, max_file_size)?;
    let stats = InspectStats::from_datasets(&datasets);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats).map_err(|e| CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        }),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &stats).map_err(|e| CliError::IoError {
                source: "stdout".to_owned(),
                detail: e.to_string(),
            })?;
            writeln!(&mut out).map_err(|e| CliError::IoError {
                source: "stdout".to_owned(),
                detail: e.to_string(),
            })
        }
    }
}

/// Writes inspect statistics in human-readable aligned format.
fn print_human<W: Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "idps:               {}", stats.idp_count)?;
    writeln!(w, "  without name:     {}", stats.idps_without_name)?;
    writeln!(w, "  without host:     {}", stats.idps_without_host)?;
    writeln!(w, "organizations:      {}", stats.org_count)?;
    writeln!(w, "  aliases:          {}", stats.alias_count)?;
    writeln!(w, "  links:            {}", stats.link_count)?;
    writeln!(w, "  dropped links:    {}", stats.skipped_links)?;
    writeln!(w, "crosswalk pairs:    {}", stats.pair_count)?;
    writeln!(w, "  organizations:    {}", stats.crosswalk_org_count)?;
    writeln!(w, "  skipped bindings: {}", stats.skipped_bindings)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
