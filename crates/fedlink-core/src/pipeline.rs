/// Full matching pipeline over the three record streams.
///
/// Orchestrates, in order:
///
/// 1. Crosswalk index construction.
/// 2. One cross-product pass per strategy (name, hostname, crosswalk).
/// 3. Aggregation of each strategy's edges into its own matrix and into the
///    combined matrix (weights sum where strategies agree on a pair).
///
/// The primary entry point is [`run_match`]. The run is single-threaded,
/// deterministic for a given input regardless of record order, and
/// infallible: malformed URLs and absent fields degrade to per-pair
/// no-matches inside the strategies, never to errors.
use crate::matrix::ScoreMatrix;
use crate::records::{CrosswalkPair, IdpRecord, OrgRecord};
use crate::strategy::{
    CrosswalkStrategy, HostnameStrategy, MatchEdge, MatchStrategy, NameStrategy,
};

// ---------------------------------------------------------------------------
// MatchOutput
// ---------------------------------------------------------------------------

/// The finished matrices of one matching run.
///
/// Matrices are read-only once the run completes; classification and
/// reporting are pure reads over them. `entity_ids` preserves the full IdP
/// population (in input order) so that IdPs without any edge still count as
/// no-matches downstream.
#[derive(Debug, Clone)]
pub struct MatchOutput {
    /// entityIDs of every input IdP, in input order.
    pub entity_ids: Vec<String>,
    /// Edges from the name strategy only.
    pub name: ScoreMatrix,
    /// Edges from the hostname strategy only.
    pub hostname: ScoreMatrix,
    /// Edges from the crosswalk strategy only.
    pub crosswalk: ScoreMatrix,
    /// All strategies summed: a pair matched by name and hostname carries
    /// weight 3, by crosswalk alone weight 10, and so on.
    pub combined: ScoreMatrix,
}

// ---------------------------------------------------------------------------
// run_match
// ---------------------------------------------------------------------------

/// Runs all three strategies over the full IdP × org cross product and
/// aggregates their edges.
///
/// Each strategy contributes its full weight exactly once per matched pair;
/// duplicate crosswalk assertions are already collapsed by the
/// [`CrosswalkStrategy`] index.
pub fn run_match(
    idps: &[IdpRecord],
    orgs: &[OrgRecord],
    crosswalk_pairs: &[CrosswalkPair],
) -> MatchOutput {
    let crosswalk_strategy = CrosswalkStrategy::new(crosswalk_pairs);

    let mut combined = ScoreMatrix::new();
    let name = accumulate(&NameStrategy.edges(idps, orgs), &mut combined);
    let hostname = accumulate(&HostnameStrategy.edges(idps, orgs), &mut combined);
    let crosswalk = accumulate(&crosswalk_strategy.edges(idps, orgs), &mut combined);

    MatchOutput {
        entity_ids: idps.iter().map(|i| i.entity_id.clone()).collect(),
        name,
        hostname,
        crosswalk,
        combined,
    }
}

/// Builds one per-strategy matrix from an edge list, mirroring every edge
/// into the combined matrix.
fn accumulate(edges: &[MatchEdge], combined: &mut ScoreMatrix) -> ScoreMatrix {
    let mut matrix = ScoreMatrix::new();
    for edge in edges {
        matrix.add_edge(&edge.idp_entity_id, &edge.org_id, edge.weight);
        combined.add_edge(&edge.idp_entity_id, &edge.org_id, edge.weight);
    }
    matrix
}

#[cfg(test)]
mod tests;
