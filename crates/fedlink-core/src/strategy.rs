/// Evidence strategies: independent pairwise matchers over IdP × org.
///
/// Each strategy is a pure predicate on a single `(IdpRecord, OrgRecord)`
/// pair with a fixed weight. Strategies run over the full cross product of
/// the two record sets — O(|IdP| × |Org|) per strategy, a deliberate
/// simplicity trade-off — and emit at most one [`MatchEdge`] per pair.
///
/// All functions in this module are pure (no side-effects, no I/O).
use std::collections::{HashMap, HashSet};

use crate::records::{CrosswalkPair, IdpRecord, OrgRecord};

/// Weight of a name/alias match. Exact string evidence, moderately strong.
pub const NAME_WEIGHT: u32 = 2;

/// Weight of a hostname match. URL hosts are shared across institutions
/// often enough that this is the weakest signal.
pub const HOSTNAME_WEIGHT: u32 = 1;

/// Weight of a crosswalk match. A curated exact-identity assertion,
/// deliberately heavier than name and hostname evidence combined.
pub const CROSSWALK_WEIGHT: u32 = 10;

// ---------------------------------------------------------------------------
// MatchEdge
// ---------------------------------------------------------------------------

/// A weighted edge between one IdP and one organization, attributed to the
/// strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEdge {
    /// The IdP side of the edge.
    pub idp_entity_id: String,
    /// The organization side of the edge.
    pub org_id: String,
    /// Stable name of the producing strategy.
    pub strategy: &'static str,
    /// The strategy's weight constant. Always positive.
    pub weight: u32,
}

// ---------------------------------------------------------------------------
// MatchStrategy
// ---------------------------------------------------------------------------

/// A single evidence source producing weighted edges between IdPs and
/// organizations.
///
/// Implementations must be pure: `is_match` may not depend on anything but
/// the two records (and immutable state captured at construction, as the
/// crosswalk index is). The provided [`MatchStrategy::edges`] runner walks
/// the full cross product; implementations may override it to hoist
/// per-record work out of the inner loop as long as the edge set is
/// identical.
pub trait MatchStrategy {
    /// Stable strategy name used in edge attribution and reporting.
    fn name(&self) -> &'static str;

    /// The weight applied uniformly to every edge this strategy emits.
    fn weight(&self) -> u32;

    /// Pure pairwise verdict.
    fn is_match(&self, idp: &IdpRecord, org: &OrgRecord) -> bool;

    /// Runs the strategy over the full cross product, emitting one edge per
    /// positive verdict.
    fn edges(&self, idps: &[IdpRecord], orgs: &[OrgRecord]) -> Vec<MatchEdge> {
        let mut out = Vec::new();
        for idp in idps {
            for org in orgs {
                if self.is_match(idp, org) {
                    out.push(MatchEdge {
                        idp_entity_id: idp.entity_id.clone(),
                        org_id: org.id.clone(),
                        strategy: self.name(),
                        weight: self.weight(),
                    });
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// NameStrategy
// ---------------------------------------------------------------------------

/// Matches the IdP's best-effort organization display name against the
/// organization's primary name and aliases.
///
/// Comparison is case-sensitive exact equality, no trimming, no
/// normalization, no fuzzy matching. An IdP without any display name, or
/// with an empty one, never matches: registry records may lack a primary
/// name, and an empty-vs-empty "match" would edge the IdP to every such
/// organization.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameStrategy;

impl MatchStrategy for NameStrategy {
    fn name(&self) -> &'static str {
        "name"
    }

    fn weight(&self) -> u32 {
        NAME_WEIGHT
    }

    fn is_match(&self, idp: &IdpRecord, org: &OrgRecord) -> bool {
        match idp.organization_name() {
            Some("") | None => false,
            Some(name) => name == org.name || org.aliases.contains(name),
        }
    }
}

// ---------------------------------------------------------------------------
// HostnameStrategy
// ---------------------------------------------------------------------------

/// Matches the host component of the IdP's best-effort organization URL
/// against the hosts of the organization's links.
///
/// Scheme and path are ignored; only the host is compared. A malformed URL
/// on either side is a no-match for that single comparison (org links are
/// already filtered at [`OrgRecord`] construction; the IdP URL is checked
/// here), never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostnameStrategy;

impl MatchStrategy for HostnameStrategy {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn weight(&self) -> u32 {
        HOSTNAME_WEIGHT
    }

    fn is_match(&self, idp: &IdpRecord, org: &OrgRecord) -> bool {
        match idp.organization_host() {
            Some(host) => org.has_link_host(&host),
            None => false,
        }
    }

    /// Cross-product runner with the IdP host hoisted out of the inner loop.
    ///
    /// `organization_host` re-parses the best-effort URL on every call;
    /// computing it once per IdP produces the identical edge set at a
    /// fraction of the cost.
    fn edges(&self, idps: &[IdpRecord], orgs: &[OrgRecord]) -> Vec<MatchEdge> {
        let mut out = Vec::new();
        for idp in idps {
            let Some(host) = idp.organization_host() else {
                continue;
            };
            for org in orgs {
                if org.has_link_host(&host) {
                    out.push(MatchEdge {
                        idp_entity_id: idp.entity_id.clone(),
                        org_id: org.id.clone(),
                        strategy: self.name(),
                        weight: self.weight(),
                    });
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// CrosswalkStrategy
// ---------------------------------------------------------------------------

/// Matches via curated crosswalk assertions.
///
/// Assertions are indexed by entityID at construction; identical duplicate
/// assertions collapse in the index, so a pair asserted twice still yields
/// one edge. Conflicting assertions (same entityID, different organization)
/// each yield their own edge and surface as ambiguity downstream.
#[derive(Debug, Clone, Default)]
pub struct CrosswalkStrategy {
    /// entityID → set of asserted organization ids.
    by_entity: HashMap<String, HashSet<String>>,
}

impl CrosswalkStrategy {
    /// Builds the assertion index from the raw crosswalk pairs.
    pub fn new(pairs: &[CrosswalkPair]) -> Self {
        let mut by_entity: HashMap<String, HashSet<String>> = HashMap::new();
        for pair in pairs {
            by_entity
                .entry(pair.idp_entity_id.clone())
                .or_default()
                .insert(pair.org_id.clone());
        }
        Self { by_entity }
    }

    /// Number of distinct assertions in the index.
    pub fn assertion_count(&self) -> usize {
        self.by_entity.values().map(HashSet::len).sum()
    }
}

impl MatchStrategy for CrosswalkStrategy {
    fn name(&self) -> &'static str {
        "crosswalk"
    }

    fn weight(&self) -> u32 {
        CROSSWALK_WEIGHT
    }

    fn is_match(&self, idp: &IdpRecord, org: &OrgRecord) -> bool {
        self.by_entity
            .get(idp.entity_id.as_str())
            .is_some_and(|orgs| orgs.contains(org.id.as_str()))
    }
}
