/// Command module for the `fedlink` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
use std::path::Path;

use fedlink_core::records::{CrosswalkPair, IdpRecord, OrgRecord};

use crate::error::CliError;
use crate::io::read_file;
use crate::parse::{crosswalk, federation, registry};

pub mod convert;
pub mod fetch;
pub mod inspect;
pub mod match_orgs;

/// The three parsed input datasets, plus per-record skip counts surfaced
/// by the parsers.
pub struct Datasets {
    pub idps: Vec<IdpRecord>,
    pub orgs: Vec<OrgRecord>,
    pub pairs: Vec<CrosswalkPair>,
    /// Registry links that were not absolute URLs.
    pub skipped_links: usize,
    /// Crosswalk bindings missing one of the two projected variables.
    pub skipped_bindings: usize,
}

impl Datasets {
    /// Reads and parses all three datasets from disk.
    ///
    /// # Errors
    ///
    /// - [`CliError::FileNotFound`] / [`CliError::FileTooLarge`] and friends
    ///   when a file cannot be read.
    /// - [`CliError::ParseFailed`] when a dataset is structurally broken,
    ///   naming the dataset that failed.
    pub fn load(
        federation_path: &Path,
        registry_path: &Path,
        crosswalk_path: &Path,
        max_file_size: u64,
    ) -> Result<Self, CliError> {
        let federation_xml = read_file(federation_path, max_file_size)?;
        let idps =
            federation::parse_federation(&federation_xml).map_err(|e| CliError::ParseFailed {
                dataset: "federation".to_owned(),
                detail: e.to_string(),
            })?;

        let registry_json = read_file(registry_path, max_file_size)?;
        let registry_parse =
            registry::parse_registry(&registry_json).map_err(|e| CliError::ParseFailed {
                dataset: "registry".to_owned(),
                detail: e.to_string(),
            })?;

        let crosswalk_json = read_file(crosswalk_path, max_file_size)?;
        let crosswalk_parse =
            crosswalk::parse_crosswalk(&crosswalk_json).map_err(|e| CliError::ParseFailed {
                dataset: "crosswalk".to_owned(),
                detail: e.to_string(),
            })?;

        Ok(Self {
            idps,
            orgs: registry_parse.orgs,
            pairs: crosswalk_parse.pairs,
            skipped_links: registry_parse.skipped_links,
            skipped_bindings: crosswalk_parse.skipped_bindings,
        })
    }
}
