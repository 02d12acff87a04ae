/// Serializable output contract for a matching run.
///
/// [`MatchReport`] is pure data: idp → org → weight maps plus the five
/// per-view tallies. Serialization format and destination are the caller's
/// concern; this module only guarantees deterministic content (all maps are
/// `BTreeMap`s, so identical inputs serialize byte-identically).
use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{Tally, tally_by_degree, tally_by_score};
use crate::pipeline::MatchOutput;

// ---------------------------------------------------------------------------
// MatrixKind
// ---------------------------------------------------------------------------

/// The five classification views of a run.
///
/// Three per-strategy views plus two views of the combined matrix: one
/// classified by adjacency degree (like the per-strategy views), one by
/// maximum score. The two combined views share a single underlying matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixKind {
    /// Name-strategy matrix, degree-classified.
    Name,
    /// Hostname-strategy matrix, degree-classified.
    Hostname,
    /// Crosswalk-strategy matrix, degree-classified.
    Crosswalk,
    /// Combined matrix, degree-classified.
    CombinedSum,
    /// Combined matrix, score-classified.
    CombinedScore,
}

impl MatrixKind {
    /// All five views, in reporting order.
    pub const ALL: [MatrixKind; 5] = [
        MatrixKind::Name,
        MatrixKind::Hostname,
        MatrixKind::Crosswalk,
        MatrixKind::CombinedSum,
        MatrixKind::CombinedScore,
    ];

    /// Stable label used in file names and report keys.
    pub fn label(self) -> &'static str {
        match self {
            MatrixKind::Name => "name",
            MatrixKind::Hostname => "hostname",
            MatrixKind::Crosswalk => "crosswalk",
            MatrixKind::CombinedSum => "combined_sum",
            MatrixKind::CombinedScore => "combined_score",
        }
    }
}

impl std::fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MatchReport
// ---------------------------------------------------------------------------

/// idp-entity-id → org-id → cumulative weight.
pub type WeightMap = BTreeMap<String, BTreeMap<String, u32>>;

/// The complete serializable result of one matching run.
///
/// Carries five tallies but only four matrix payloads: the combined-by-sum
/// and combined-by-score views classify the same combined matrix.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// Outcome counts per classification view.
    pub tallies: BTreeMap<MatrixKind, Tally>,
    /// Name-strategy weights.
    pub name: WeightMap,
    /// Hostname-strategy weights.
    pub hostname: WeightMap,
    /// Crosswalk-strategy weights.
    pub crosswalk: WeightMap,
    /// Combined weights (sum over strategies).
    pub combined: WeightMap,
}

impl MatchReport {
    /// Builds the report from a finished run: classifies every input IdP
    /// under all five views and copies out the weight maps.
    pub fn new(output: &MatchOutput) -> Self {
        let ids = &output.entity_ids;
        let mut tallies = BTreeMap::new();
        tallies.insert(MatrixKind::Name, tally_by_degree(&output.name, ids));
        tallies.insert(MatrixKind::Hostname, tally_by_degree(&output.hostname, ids));
        tallies.insert(
            MatrixKind::Crosswalk,
            tally_by_degree(&output.crosswalk, ids),
        );
        tallies.insert(
            MatrixKind::CombinedSum,
            tally_by_degree(&output.combined, ids),
        );
        tallies.insert(
            MatrixKind::CombinedScore,
            tally_by_score(&output.combined, ids),
        );

        Self {
            tallies,
            name: output.name.by_idp().clone(),
            hostname: output.hostname.by_idp().clone(),
            crosswalk: output.crosswalk.by_idp().clone(),
            combined: output.combined.by_idp().clone(),
        }
    }

    /// The weight map backing a view. Both combined views resolve to the
    /// same map.
    pub fn matrix(&self, kind: MatrixKind) -> &WeightMap {
        match kind {
            MatrixKind::Name => &self.name,
            MatrixKind::Hostname => &self.hostname,
            MatrixKind::Crosswalk => &self.crosswalk,
            MatrixKind::CombinedSum | MatrixKind::CombinedScore => &self.combined,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::collections::BTreeSet;

    use super::*;
    use crate::pipeline::run_match;
    use crate::records::{CrosswalkPair, IdpRecord, LocalizedText, OrgRecord};

    fn sample_output() -> MatchOutput {
        let idps = vec![
            IdpRecord {
                entity_id: "A".to_owned(),
                display_names: vec![LocalizedText::new("Example University", Some("en"))],
                organization_urls: vec![LocalizedText::new("https://www.example.org/", Some("en"))],
            },
            IdpRecord {
                entity_id: "B".to_owned(),
                display_names: vec![],
                organization_urls: vec![],
            },
        ];
        let orgs = vec![OrgRecord::new(
            "X",
            "Example University",
            BTreeSet::new(),
            vec!["https://www.example.org/".to_owned()],
        )];
        let pairs = vec![CrosswalkPair {
            org_id: "X".to_owned(),
            idp_entity_id: "A".to_owned(),
        }];
        run_match(&idps, &orgs, &pairs)
    }

    #[test]
    fn report_has_all_five_tallies() {
        let report = MatchReport::new(&sample_output());
        assert_eq!(report.tallies.len(), MatrixKind::ALL.len());
        for kind in MatrixKind::ALL {
            let tally = report.tallies.get(&kind).expect("tally present");
            assert_eq!(tally.total(), 2, "view {kind} must be total");
        }
    }

    #[test]
    fn combined_views_share_one_matrix() {
        let report = MatchReport::new(&sample_output());
        assert_eq!(
            report.matrix(MatrixKind::CombinedSum),
            report.matrix(MatrixKind::CombinedScore)
        );
        // A matched by name (2) + hostname (1) + crosswalk (10).
        assert_eq!(report.combined["A"]["X"], 13);
    }

    #[test]
    fn report_serializes_with_stable_keys() {
        let report = MatchReport::new(&sample_output());
        let json = serde_json::to_value(&report).expect("serialize");
        let tallies = json.get("tallies").expect("tallies key");
        for kind in MatrixKind::ALL {
            assert!(
                tallies.get(kind.label()).is_some(),
                "missing tally key {kind}"
            );
        }
        assert_eq!(json["name"]["A"]["X"], 2);
        assert_eq!(json["combined"]["A"]["X"], 13);
    }

    #[test]
    fn unmatched_idp_counts_as_no_match_everywhere() {
        let report = MatchReport::new(&sample_output());
        for kind in MatrixKind::ALL {
            let tally = report.tallies[&kind];
            assert_eq!(tally.no_match, 1, "B has no evidence in view {kind}");
        }
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(MatrixKind::Name.label(), "name");
        assert_eq!(MatrixKind::CombinedScore.label(), "combined_score");
        assert_eq!(MatrixKind::CombinedScore.to_string(), "combined_score");
    }
}
