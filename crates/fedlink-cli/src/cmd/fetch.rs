//! Implementation of `fedlink fetch`.
//!
//! Downloads the input datasets into a data directory, under the same file
//! names the `match` and `inspect` defaults expect:
//!
//! - federation metadata XML → `edugain-v1.xml`
//! - crosswalk SPARQL results → `wikidata-ror-api.json`
//! - registry dump (optional, `--registry-url`) → `ror.json`, extracted
//!   from the first `.json` entry of the downloaded zip archive
//!
//! Exit codes: 0 = success, 1 = a download could not be persisted, 2 = a
//! download or archive extraction failed.
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_note};
use crate::io::{ensure_dir, write_file};

/// Whole-request timeout. Registry dumps run to hundreds of megabytes.
const DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Runs the `fetch` command.
///
/// # Errors
///
/// - [`CliError::FetchFailed`] — a download failed or the registry archive
///   held no `.json` entry (exit code 2).
/// - [`CliError::WriteFailed`] — a downloaded file could not be written
///   (exit code 1).
pub fn run(
    out: &Path,
    federation_url: &str,
    crosswalk_url: &str,
    registry_url: Option<&str>,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .user_agent(concat!("fedlink/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| CliError::FetchFailed {
            url: federation_url.to_owned(),
            detail: format!("HTTP client construction failed: {e}"),
        })?;

    ensure_dir(out)?;

    let federation = download(&client, federation_url)?;
    write_file(&out.join("edugain-v1.xml"), &federation)?;
    note(&mut err_out, federation_url, federation.len(), mode, config)?;

    let crosswalk = download(&client, crosswalk_url)?;
    write_file(&out.join("wikidata-ror-api.json"), &crosswalk)?;
    note(&mut err_out, crosswalk_url, crosswalk.len(), mode, config)?;

    if let Some(url) = registry_url {
        let archive = download(&client, url)?;
        let dump = extract_first_json(&archive, url)?;
        write_file(&out.join("ror.json"), &dump)?;
        note(&mut err_out, url, dump.len(), mode, config)?;
    }

    Ok(())
}

/// Performs one GET request and returns the response body.
fn download(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, CliError> {
    let response = client.get(url).send().map_err(|e| CliError::FetchFailed {
        url: url.to_owned(),
        detail: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::FetchFailed {
            url: url.to_owned(),
            detail: format!("HTTP status {status}"),
        });
    }

    let bytes = response.bytes().map_err(|e| CliError::FetchFailed {
        url: url.to_owned(),
        detail: e.to_string(),
    })?;
    Ok(bytes.to_vec())
}

/// Extracts the first `.json` entry from a zip archive.
///
/// Registry dumps ship as a zip holding one large JSON file next to
/// CSV exports; only the JSON is wanted.
fn extract_first_json(archive: &[u8], url: &str) -> Result<Vec<u8>, CliError> {
    let cursor = std::io::Cursor::new(archive);
    let mut zip = zip::ZipArchive::new(cursor).map_err(|e| CliError::FetchFailed {
        url: url.to_owned(),
        detail: format!("not a readable zip archive: {e}"),
    })?;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|e| CliError::FetchFailed {
            url: url.to_owned(),
            detail: format!("zip entry {index} unreadable: {e}"),
        })?;
        if !entry.name().ends_with(".json") {
            continue;
        }
        let mut content = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut content)
            .map_err(|e| CliError::FetchFailed {
                url: url.to_owned(),
                detail: format!("zip entry {:?} unreadable: {e}", entry.name()),
            })?;
        return Ok(content);
    }

    Err(CliError::FetchFailed {
        url: url.to_owned(),
        detail: "archive holds no .json entry".to_owned(),
    })
}

fn note(
    writer: &mut impl std::io::Write,
    url: &str,
    len: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    write_note(
        writer,
        &format!("fetched {url} ({len} bytes)"),
        mode,
        config,
    )
    .map_err(|e| CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
