//! Implementation of `fedlink convert <file>`.
//!
//! Parses federation metadata XML into the normalized IdP record model and
//! writes the records as a JSON array to stdout. Only entities with an IdP
//! role survive the conversion; localized names and URLs keep their
//! language tags.
//!
//! Flags:
//! - `--compact`: emit minified JSON instead of pretty-printed.
//!
//! Exit codes: 0 = success, 2 = read or parse failure.
use crate::cli::PathOrStdin;
use crate::error::CliError;
use crate::io::read_input;
use crate::parse::federation::parse_federation;

/// Runs the `convert` command.
///
/// Reads federation metadata from `file` (or stdin), parses it, and writes
/// the IdP records to stdout.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the input cannot be read or
/// parsed.
pub fn run(file: &PathOrStdin, compact: bool, max_file_size: u64) -> Result<(), CliError> {
    let xml = read_input(file, max_file_size)?;
    let idps = parse_federation(&xml).map_err(|e| CliError::ParseFailed {
        dataset: "federation".to_owned(),
        detail: e.to_string(),
    })?;

    let output = if compact {
        serde_json::to_string(&idps)
    } else {
        serde_json::to_string_pretty(&idps)
    }
    .map_err(|e| CliError::IoError {
        source: "serializer".to_owned(),
        detail: e.to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    std::io::Write::write_fmt(&mut out, format_args!("{output}\n")).map_err(|e| {
        CliError::IoError {
            source: "stdout".to_owned(),
            detail: e.to_string(),
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]

    use std::io::Write;

    use super::*;

    const MINIMAL: &str = r#"<EntitiesDescriptor>
  <EntityDescriptor entityID="https://idp.example/sso">
    <IDPSSODescriptor/>
    <Organization>
      <OrganizationDisplayName xml:lang="en">Example University</OrganizationDisplayName>
      <OrganizationURL xml:lang="en">https://www.example.edu/</OrganizationURL>
    </Organization>
  </EntityDescriptor>
</EntitiesDescriptor>"#;

    fn temp_input(content: &str) -> (tempfile::TempDir, PathOrStdin) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("federation.xml");
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(content.as_bytes()).expect("write");
        (dir, PathOrStdin::Path(path))
    }

    #[test]
    fn run_valid_pretty_returns_ok() {
        let (_dir, input) = temp_input(MINIMAL);
        let result = run(&input, false, 1024 * 1024);
        assert!(result.is_ok(), "expected Ok: {result:?}");
    }

    #[test]
    fn run_valid_compact_returns_ok() {
        let (_dir, input) = temp_input(MINIMAL);
        let result = run(&input, true, 1024 * 1024);
        assert!(result.is_ok(), "expected Ok: {result:?}");
    }

    #[test]
    fn run_malformed_xml_is_parse_failed() {
        let (_dir, input) = temp_input("<EntitiesDescriptor><broken");
        let err = run(&input, false, 1024 * 1024).expect_err("must fail");
        assert_eq!(err.exit_code(), 2);
        match err {
            CliError::ParseFailed { dataset, .. } => assert_eq!(dataset, "federation"),
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn run_missing_file_is_file_not_found() {
        let input = PathOrStdin::Path("/does/not/exist.xml".into());
        let err = run(&input, false, 1024 * 1024).expect_err("must fail");
        match err {
            CliError::FileNotFound { .. } => {}
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }
}
