/// Crosswalk parser for SPARQL-results JSON.
///
/// The query projects two variables per binding: `rorid` (a registry
/// identifier, sometimes bare, sometimes a full URL) and `api` (an IdP
/// entity ID). Bindings missing either variable are skipped, not errors.
use fedlink_core::records::CrosswalkPair;
use serde::Deserialize;

use super::ParseError;

/// Result of parsing a crosswalk export.
#[derive(Debug)]
pub struct CrosswalkParse {
    /// One pair per complete binding, in result order.
    pub pairs: Vec<CrosswalkPair>,
    /// Bindings missing `rorid` or `api`.
    pub skipped_bindings: usize,
}

#[derive(Deserialize)]
struct SparqlResults {
    results: Bindings,
}

#[derive(Deserialize)]
struct Bindings {
    bindings: Vec<Binding>,
}

#[derive(Deserialize)]
struct Binding {
    #[serde(default)]
    rorid: Option<BoundValue>,
    #[serde(default)]
    api: Option<BoundValue>,
}

#[derive(Deserialize)]
struct BoundValue {
    value: String,
}

/// Parses a SPARQL-results document into crosswalk pairs.
///
/// Bare registry identifiers are normalized to the full
/// `https://ror.org/<id>` form so they compare equal to dump IDs.
///
/// # Errors
///
/// Returns [`ParseError::Json`] when the document is malformed or lacks the
/// `results.bindings` structure.
pub fn parse_crosswalk(json: &str) -> Result<CrosswalkParse, ParseError> {
    let raw: SparqlResults = serde_json::from_str(json)?;

    let mut pairs = Vec::with_capacity(raw.results.bindings.len());
    let mut skipped_bindings = 0;

    for binding in raw.results.bindings {
        match (binding.rorid, binding.api) {
            (Some(rorid), Some(api)) => pairs.push(CrosswalkPair {
                org_id: normalize_org_id(rorid.value),
                idp_entity_id: api.value,
            }),
            _ => skipped_bindings += 1,
        }
    }

    Ok(CrosswalkParse {
        pairs,
        skipped_bindings,
    })
}

fn normalize_org_id(raw: String) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw
    } else {
        format!("https://ror.org/{raw}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
