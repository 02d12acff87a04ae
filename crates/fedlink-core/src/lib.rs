#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classify;
pub mod matrix;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod strategy;

pub use classify::{
    Classification, Tally, classify_by_degree, classify_by_score, tally_by_degree, tally_by_score,
};
pub use matrix::ScoreMatrix;
pub use pipeline::{MatchOutput, run_match};
pub use records::{CrosswalkPair, IdpRecord, LocalizedText, OrgRecord, best_text};
pub use report::{MatchReport, MatrixKind, WeightMap};
pub use strategy::{
    CROSSWALK_WEIGHT, CrosswalkStrategy, HOSTNAME_WEIGHT, HostnameStrategy, MatchEdge,
    MatchStrategy, NAME_WEIGHT, NameStrategy,
};

/// Returns the current version of the fedlink-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
