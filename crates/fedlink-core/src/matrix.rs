//! Dual-indexed bipartite score matrix.
//!
//! [`ScoreMatrix`] replaces ad-hoc read-then-write accumulation into shared
//! maps with a single atomic [`ScoreMatrix::add_edge`] operation that keeps
//! the two indexes (by IdP, by organization) in lock-step.
//!
//! # Determinism
//!
//! Both indexes are `BTreeMap`s, so iteration and serialization order depend
//! only on the key set, never on insertion order. Weight accumulation is
//! commutative addition; a matrix built from any permutation of the same
//! edge multiset is identical.

use std::collections::BTreeMap;

use serde::Serialize;

/// A weighted bipartite graph between IdPs and organizations, indexed from
/// both sides.
///
/// # Invariant
///
/// Every edge appears in both indexes with the same cumulative weight, and
/// no stored weight is zero. Maintained internally: the only mutating
/// operation is [`ScoreMatrix::add_edge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreMatrix {
    by_idp: BTreeMap<String, BTreeMap<String, u32>>,
    by_org: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ScoreMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the edge `(idp, org)`, creating it if absent.
    ///
    /// Both indexes are updated together. A zero weight is ignored: the
    /// matrix never stores an edge of weight zero (strategies only carry
    /// positive constants, so this arises only from a caller bug).
    pub fn add_edge(&mut self, idp: &str, org: &str, weight: u32) {
        if weight == 0 {
            return;
        }
        *self
            .by_idp
            .entry(idp.to_owned())
            .or_default()
            .entry(org.to_owned())
            .or_insert(0) += weight;
        *self
            .by_org
            .entry(org.to_owned())
            .or_default()
            .entry(idp.to_owned())
            .or_insert(0) += weight;
    }

    /// The organizations matched to `idp`, with cumulative weights.
    ///
    /// `None` when the IdP has no edges; a returned map is never empty.
    pub fn organizations_for(&self, idp: &str) -> Option<&BTreeMap<String, u32>> {
        self.by_idp.get(idp)
    }

    /// The IdPs matched to `org`, with cumulative weights.
    pub fn idps_for(&self, org: &str) -> Option<&BTreeMap<String, u32>> {
        self.by_org.get(org)
    }

    /// Cumulative weight of the edge `(idp, org)`, if present.
    pub fn weight(&self, idp: &str, org: &str) -> Option<u32> {
        self.by_idp.get(idp).and_then(|orgs| orgs.get(org)).copied()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.by_idp.values().map(BTreeMap::len).sum()
    }

    /// `true` when the matrix has no edges.
    pub fn is_empty(&self) -> bool {
        self.by_idp.is_empty()
    }

    /// The full IdP-side index, for serialization by the reporting layer.
    pub fn by_idp(&self) -> &BTreeMap<String, BTreeMap<String, u32>> {
        &self.by_idp
    }

    /// The full organization-side index.
    pub fn by_org(&self) -> &BTreeMap<String, BTreeMap<String, u32>> {
        &self.by_org
    }
}
