/// Classification of IdP records against a finished score matrix.
///
/// Two deliberately distinct policies exist side by side:
///
/// - [`classify_by_degree`] — unweighted mutual uniqueness, used for the
///   per-strategy matrices and the combined-by-sum view. Only the *shape*
///   of the adjacency matters.
/// - [`classify_by_score`] — max-weight uniqueness, used for the
///   combined-by-score view. Weights decide which candidates count.
///
/// Both are total (every entity id yields exactly one outcome) and are pure
/// reads: a matrix is never mutated by classification.
use std::collections::BTreeSet;

use serde::Serialize;

use crate::matrix::ScoreMatrix;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// The outcome of classifying one IdP against one matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The IdP pairs with exactly this organization, and the pairing is
    /// exclusive from the organization's side as well.
    Unique(String),
    /// More than one candidate survives, or a candidate organization has an
    /// equally strong suitor elsewhere. Carries the candidate set.
    Ambiguous(BTreeSet<String>),
    /// No strategy produced any edge for this IdP.
    NoMatch,
}

// ---------------------------------------------------------------------------
// classify_by_degree
// ---------------------------------------------------------------------------

/// Unweighted mutual-uniqueness classification.
///
/// `Unique(o)` iff the IdP's adjacency holds exactly one organization `o`
/// *and* `o`'s reverse adjacency holds exactly one IdP — which is then
/// necessarily `entity_id`, since the forward edge guarantees membership.
/// A single edge from the IdP's side alone is not enough: uniqueness is a
/// one-to-one pairing in both directions.
pub fn classify_by_degree(matrix: &ScoreMatrix, entity_id: &str) -> Classification {
    let Some(orgs) = matrix.organizations_for(entity_id) else {
        return Classification::NoMatch;
    };

    if orgs.len() == 1 {
        if let Some((org, _)) = orgs.iter().next() {
            let exclusive = matrix
                .idps_for(org)
                .is_some_and(|idps| idps.len() == 1 && idps.contains_key(entity_id));
            if exclusive {
                return Classification::Unique(org.clone());
            }
        }
    }

    Classification::Ambiguous(orgs.keys().cloned().collect())
}

// ---------------------------------------------------------------------------
// classify_by_score
// ---------------------------------------------------------------------------

/// Max-weight classification for the combined matrix.
///
/// Let `max` be the highest weight in the IdP's adjacency and `top` the
/// organizations holding it. `Unique(o)` iff `top` is the singleton `{o}`
/// and, on the reverse side, exactly one IdP in `o`'s adjacency scores
/// `>= max` — and it is `entity_id`. A tie at the maximum, or any competing
/// IdP scoring at or above it on the organization's side, forces
/// `Ambiguous(top)`: a high score does not guarantee exclusivity when the
/// counterpart has an equally strong suitor.
pub fn classify_by_score(matrix: &ScoreMatrix, entity_id: &str) -> Classification {
    let Some(orgs) = matrix.organizations_for(entity_id) else {
        return Classification::NoMatch;
    };
    let Some(max) = orgs.values().copied().max() else {
        // Unreachable: the matrix never yields an empty adjacency.
        return Classification::NoMatch;
    };

    let top: BTreeSet<String> = orgs
        .iter()
        .filter(|(_, w)| **w == max)
        .map(|(org, _)| org.clone())
        .collect();

    if top.len() == 1 {
        if let Some(org) = top.iter().next() {
            let qualified: Vec<&String> = matrix
                .idps_for(org)
                .map(|idps| {
                    idps.iter()
                        .filter(|(_, w)| **w >= max)
                        .map(|(idp, _)| idp)
                        .collect()
                })
                .unwrap_or_default();
            if let [sole] = qualified[..] {
                if sole == entity_id {
                    return Classification::Unique(org.clone());
                }
            }
        }
    }

    Classification::Ambiguous(top)
}

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// Outcome counts over a set of IdP records for one classification view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Mutually unique pairings.
    pub unique: usize,
    /// Ambiguous match groups.
    pub ambiguous: usize,
    /// IdPs with no evidence at all.
    pub no_match: usize,
}

impl Tally {
    /// Records one classification outcome.
    pub fn record(&mut self, classification: &Classification) {
        match classification {
            Classification::Unique(_) => self.unique += 1,
            Classification::Ambiguous(_) => self.ambiguous += 1,
            Classification::NoMatch => self.no_match += 1,
        }
    }

    /// Total number of recorded outcomes.
    pub fn total(&self) -> usize {
        self.unique + self.ambiguous + self.no_match
    }
}

/// Tallies degree-mode classification over a full entity-id slice.
pub fn tally_by_degree<S: AsRef<str>>(matrix: &ScoreMatrix, entity_ids: &[S]) -> Tally {
    let mut tally = Tally::default();
    for id in entity_ids {
        tally.record(&classify_by_degree(matrix, id.as_ref()));
    }
    tally
}

/// Tallies score-mode classification over a full entity-id slice.
pub fn tally_by_score<S: AsRef<str>>(matrix: &ScoreMatrix, entity_ids: &[S]) -> Tally {
    let mut tally = Tally::default();
    for id in entity_ids {
        tally.record(&classify_by_score(matrix, id.as_ref()));
    }
    tally
}
