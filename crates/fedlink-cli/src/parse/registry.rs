/// Registry data-dump parser.
///
/// The dump is a single JSON array of organization objects. Only four
/// fields matter here: `id`, `name`, `aliases` and `labels` (folded into
/// the alias set), and `links`. Everything else in the dump is ignored.
use std::collections::BTreeSet;

use fedlink_core::records::OrgRecord;
use serde::Deserialize;

use super::ParseError;

/// Result of parsing a registry dump.
#[derive(Debug)]
pub struct RegistryParse {
    /// One record per organization, in dump order.
    pub orgs: Vec<OrgRecord>,
    /// Links that were not absolute URLs and were dropped.
    pub skipped_links: usize,
}

/// A label entry. Older dumps carry plain strings, newer ones objects
/// with a `label` field and an ISO 639 tag.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Plain(String),
    Tagged {
        label: String,
        #[serde(default)]
        #[allow(dead_code)]
        iso639: Option<String>,
    },
}

impl RawLabel {
    fn into_text(self) -> String {
        match self {
            RawLabel::Plain(s) => s,
            RawLabel::Tagged { label, .. } => label,
        }
    }
}

#[derive(Deserialize)]
struct RawOrg {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    #[serde(default)]
    labels: Vec<RawLabel>,
    #[serde(default)]
    links: Vec<String>,
}

/// Parses a registry data dump into organization records.
///
/// Labels are folded into the alias set so the name strategy treats a
/// label hit and an alias hit identically. Links that do not parse as
/// absolute URLs are counted and dropped.
///
/// # Errors
///
/// Returns [`ParseError::Json`] when the document is malformed or not an
/// array of objects.
pub fn parse_registry(json: &str) -> Result<RegistryParse, ParseError> {
    let raw: Vec<RawOrg> = serde_json::from_str(json)?;

    let mut orgs = Vec::with_capacity(raw.len());
    let mut skipped_links = 0;

    for entry in raw {
        let mut aliases: BTreeSet<String> = entry.aliases.into_iter().collect();
        aliases.extend(entry.labels.into_iter().map(RawLabel::into_text));

        let raw_link_count = entry.links.len();
        let org = OrgRecord::new(entry.id, entry.name, aliases, entry.links);
        skipped_links += raw_link_count - org.links.len();
        orgs.push(org);
    }

    Ok(RegistryParse {
        orgs,
        skipped_links,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
