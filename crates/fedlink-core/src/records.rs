/// Normalized record model for the matching engine.
///
/// All inputs arrive here already parsed by the boundary layer (federation
/// XML, registry JSON, crosswalk JSON); the engine never performs I/O. Every
/// record is immutable once constructed.
///
/// Localized strings are always carried as an ordered `Vec<LocalizedText>`,
/// never as a scalar-or-list. Upstream metadata sometimes flattens a
/// single-element list into a bare object; the parsers normalize that shape
/// before records reach this module.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::Url;

// ---------------------------------------------------------------------------
// LocalizedText
// ---------------------------------------------------------------------------

/// A language-tagged string, e.g. an `OrganizationDisplayName` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// The text content.
    pub value: String,
    /// BCP-47 language tag from the `xml:lang` attribute, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl LocalizedText {
    /// Convenience constructor.
    pub fn new(value: impl Into<String>, lang: Option<&str>) -> Self {
        Self {
            value: value.into(),
            lang: lang.map(str::to_owned),
        }
    }
}

/// Selects the best entry from a sequence of localized strings.
///
/// Prefers the first entry tagged `en`; otherwise falls back to the first
/// entry in source order. Returns `None` for an empty sequence.
///
/// The tie-break is load-bearing: when an IdP publishes names in several
/// languages, which one is selected determines the name-match outcome.
pub fn best_text(texts: &[LocalizedText]) -> Option<&LocalizedText> {
    texts
        .iter()
        .find(|t| t.lang.as_deref() == Some("en"))
        .or_else(|| texts.first())
}

// ---------------------------------------------------------------------------
// IdpRecord
// ---------------------------------------------------------------------------

/// An identity provider drawn from federation metadata.
///
/// `entity_id` is the stable unique key. Display names and organization URLs
/// are zero-or-more localized entries; both may be empty for sparsely
/// published IdPs, which simply never match on the affected strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdpRecord {
    /// SAML entityID, unique within a federation.
    pub entity_id: String,
    /// Localized organization display names, in source order.
    #[serde(default)]
    pub display_names: Vec<LocalizedText>,
    /// Localized organization URLs, in source order. Values may be malformed;
    /// parsing is deferred to the point of comparison.
    #[serde(default)]
    pub organization_urls: Vec<LocalizedText>,
}

impl IdpRecord {
    /// Best-effort organization name: the `en` display name if present,
    /// otherwise the first one published.
    pub fn organization_name(&self) -> Option<&str> {
        best_text(&self.display_names).map(|t| t.value.as_str())
    }

    /// Host component of the best-effort organization URL.
    ///
    /// Returns `None` when no URL is published, when the best-effort URL does
    /// not parse, or when it has no host (e.g. a `mailto:` value). A
    /// malformed URL is a per-record degradation, never an error.
    pub fn organization_host(&self) -> Option<String> {
        let raw = best_text(&self.organization_urls)?;
        let url = Url::parse(&raw.value).ok()?;
        url.host_str().map(str::to_owned)
    }
}

// ---------------------------------------------------------------------------
// OrgRecord
// ---------------------------------------------------------------------------

/// An organization entry from the registry dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgRecord {
    /// Registry identifier, unique within the registry
    /// (e.g. `https://ror.org/02mhbdp94`).
    pub id: String,
    /// Primary name.
    pub name: String,
    /// Alternative names. A set: duplicates in the source collapse.
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    /// Parsed web links, in source order. Only links that parsed as URLs are
    /// retained; see [`OrgRecord::new`].
    #[serde(default)]
    pub links: Vec<Url>,
}

impl OrgRecord {
    /// Builds a record, parsing `raw_links` into URLs.
    ///
    /// Links that fail to parse are skipped, not propagated: one bad link
    /// string must never discard the rest of the record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        aliases: BTreeSet<String>,
        raw_links: impl IntoIterator<Item = String>,
    ) -> Self {
        let links = raw_links
            .into_iter()
            .filter_map(|raw| Url::parse(&raw).ok())
            .collect();
        Self {
            id: id.into(),
            name: name.into(),
            aliases,
            links,
        }
    }

    /// Returns `true` when any parsed link has exactly this host component.
    pub fn has_link_host(&self, host: &str) -> bool {
        self.links.iter().any(|l| l.host_str() == Some(host))
    }
}

// ---------------------------------------------------------------------------
// CrosswalkPair
// ---------------------------------------------------------------------------

/// One exact-identity assertion from the crosswalk dataset, linking a
/// registry organization to an IdP endpoint.
///
/// Duplicate assertions for the same pair are idempotent; the crosswalk
/// strategy deduplicates them at index construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrosswalkPair {
    /// Registry identifier, in the same form as [`OrgRecord::id`].
    pub org_id: String,
    /// SAML entityID, in the same form as [`IdpRecord::entity_id`].
    pub idp_entity_id: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
