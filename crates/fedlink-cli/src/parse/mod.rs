/// Dataset parsers: the boundary layer between raw downloads and the core
/// record model.
///
/// Each submodule parses one dataset:
/// - [`federation`] — SAML federation metadata XML → `IdpRecord`s.
/// - [`registry`] — registry data-dump JSON → `OrgRecord`s.
/// - [`crosswalk`] — SPARQL-results JSON → `CrosswalkPair`s.
///
/// Parsers fail only on structurally broken input (invalid XML/JSON, wrong
/// top-level shape). Per-record defects — a missing name, an unparseable
/// link, an incomplete binding — degrade locally and are surfaced as skip
/// counts, never as errors.
pub mod crosswalk;
pub mod federation;
pub mod registry;

use thiserror::Error;

/// All error conditions the dataset parsers can produce.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML stream is malformed.
    #[error("XML error at byte {position}: {detail}")]
    Xml {
        /// Byte offset where the reader failed.
        position: u64,
        /// Underlying quick-xml error message.
        detail: String,
    },

    /// The JSON document is malformed or has the wrong shape.
    #[error("JSON error at line {line}, column {column}: {detail}")]
    Json {
        /// 1-based line of the failure.
        line: usize,
        /// 1-based column of the failure.
        column: usize,
        /// Underlying serde_json error message.
        detail: String,
    },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json {
            line: e.line(),
            column: e.column(),
            detail: e.to_string(),
        }
    }
}
