#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;

use super::*;
use crate::classify::{Classification, classify_by_degree, classify_by_score};
use crate::records::LocalizedText;
use crate::strategy::{CROSSWALK_WEIGHT, HOSTNAME_WEIGHT, NAME_WEIGHT};

fn idp(entity_id: &str, name: Option<&str>, url: Option<&str>) -> IdpRecord {
    IdpRecord {
        entity_id: entity_id.to_owned(),
        display_names: name
            .map(|n| vec![LocalizedText::new(n, Some("en"))])
            .unwrap_or_default(),
        organization_urls: url
            .map(|u| vec![LocalizedText::new(u, Some("en"))])
            .unwrap_or_default(),
    }
}

fn org(id: &str, name: &str, aliases: &[&str], links: &[&str]) -> OrgRecord {
    OrgRecord::new(
        id,
        name,
        aliases.iter().map(|a| (*a).to_owned()).collect::<BTreeSet<_>>(),
        links.iter().map(|l| (*l).to_owned()).collect::<Vec<_>>(),
    )
}

fn pair(org_id: &str, entity_id: &str) -> CrosswalkPair {
    CrosswalkPair {
        org_id: org_id.to_owned(),
        idp_entity_id: entity_id.to_owned(),
    }
}

#[test]
fn name_match_alone_scores_two() {
    let out = run_match(
        &[idp("A", Some("Example University"), None)],
        &[org("X", "Example University", &[], &[])],
        &[],
    );
    assert_eq!(out.name.weight("A", "X"), Some(NAME_WEIGHT));
    assert_eq!(out.combined.weight("A", "X"), Some(2));
    assert!(out.hostname.is_empty());
    assert!(out.crosswalk.is_empty());
}

#[test]
fn name_and_hostname_sum_to_three() {
    let out = run_match(
        &[idp(
            "A",
            Some("Example University"),
            Some("https://www.example.org/"),
        )],
        &[org(
            "X",
            "Example University",
            &[],
            &["https://www.example.org/home"],
        )],
        &[],
    );
    assert_eq!(out.name.weight("A", "X"), Some(NAME_WEIGHT));
    assert_eq!(out.hostname.weight("A", "X"), Some(HOSTNAME_WEIGHT));
    assert_eq!(out.combined.weight("A", "X"), Some(3));
}

#[test]
fn crosswalk_alone_scores_ten() {
    let out = run_match(
        &[idp("B", None, None)],
        &[org("r1", "Whatever", &[], &[])],
        &[pair("r1", "B")],
    );
    assert_eq!(out.crosswalk.weight("B", "r1"), Some(CROSSWALK_WEIGHT));
    assert_eq!(out.combined.weight("B", "r1"), Some(10));
}

#[test]
fn unique_name_scenario() {
    // One org carries the name and no other shares it.
    let out = run_match(
        &[idp("A", Some("Example University"), None)],
        &[
            org("X", "Example University", &[], &[]),
            org("Y", "Other Institute", &[], &[]),
        ],
        &[],
    );
    assert_eq!(
        classify_by_degree(&out.name, "A"),
        Classification::Unique("X".to_owned())
    );
}

#[test]
fn empty_display_name_produces_no_name_edges() {
    // Nameless registry records parse to "". An IdP publishing an empty
    // display name must stay crosswalk-unique instead of picking up a
    // weight-2 edge to every nameless org.
    let out = run_match(
        &[idp("E", Some(""), None)],
        &[org("r1", "", &[], &[]), org("r2", "", &[], &[])],
        &[pair("r1", "E")],
    );
    assert!(out.name.is_empty());
    assert_eq!(out.combined.weight("E", "r1"), Some(CROSSWALK_WEIGHT));
    assert_eq!(
        classify_by_score(&out.combined, "E"),
        Classification::Unique("r1".to_owned())
    );
}

#[test]
fn alias_collision_makes_name_ambiguous() {
    // A second org lists the same string as an alias.
    let out = run_match(
        &[idp("A", Some("Example University"), None)],
        &[
            org("X", "Example University", &[], &[]),
            org("Y", "Other Institute", &["Example University"], &[]),
        ],
        &[],
    );
    let expected: BTreeSet<String> = ["X", "Y"].iter().map(|s| (*s).to_owned()).collect();
    assert_eq!(
        classify_by_degree(&out.name, "A"),
        Classification::Ambiguous(expected)
    );
}

#[test]
fn hostname_mismatch_is_no_match() {
    // id.example.org != www.example.org, names absent on both sides.
    let out = run_match(
        &[idp("B", None, Some("https://id.example.org/idp"))],
        &[org("Z", "Z Org", &[], &["https://www.example.org/home"])],
        &[],
    );
    assert_eq!(classify_by_degree(&out.hostname, "B"), Classification::NoMatch);
    assert!(out.combined.is_empty());
}

#[test]
fn crosswalk_dominates_without_other_evidence() {
    // Crosswalk assertion only; name and hostname evidence silent.
    let out = run_match(
        &[idp("B", None, None)],
        &[org("r1", "Some Org", &[], &[])],
        &[pair("r1", "B")],
    );
    assert_eq!(classify_by_degree(&out.name, "B"), Classification::NoMatch);
    assert_eq!(classify_by_degree(&out.hostname, "B"), Classification::NoMatch);
    assert_eq!(
        classify_by_score(&out.combined, "B"),
        Classification::Unique("r1".to_owned())
    );
}

#[test]
fn duplicate_crosswalk_assertions_do_not_double_count() {
    let out = run_match(
        &[idp("B", None, None)],
        &[org("r1", "Some Org", &[], &[])],
        &[pair("r1", "B"), pair("r1", "B")],
    );
    assert_eq!(out.combined.weight("B", "r1"), Some(CROSSWALK_WEIGHT));
}

#[test]
fn entity_ids_preserve_unmatched_idps() {
    let out = run_match(
        &[idp("A", Some("Example University"), None), idp("B", None, None)],
        &[org("X", "Example University", &[], &[])],
        &[],
    );
    assert_eq!(out.entity_ids, vec!["A".to_owned(), "B".to_owned()]);
    assert!(out.combined.organizations_for("B").is_none());
}

#[test]
fn record_order_does_not_change_matrices() {
    let idps = vec![
        idp("A", Some("Example University"), Some("https://www.example.org/")),
        idp("B", None, Some("https://id.example.org/idp")),
    ];
    let orgs = vec![
        org("X", "Example University", &[], &["https://www.example.org/"]),
        org("Y", "Other", &[], &["https://id.example.org/"]),
    ];
    let pairs = vec![pair("X", "A"), pair("Y", "B")];

    let forward = run_match(&idps, &orgs, &pairs);

    let idps_rev: Vec<_> = idps.iter().rev().cloned().collect();
    let orgs_rev: Vec<_> = orgs.iter().rev().cloned().collect();
    let pairs_rev: Vec<_> = pairs.iter().rev().cloned().collect();
    let backward = run_match(&idps_rev, &orgs_rev, &pairs_rev);

    assert_eq!(forward.name, backward.name);
    assert_eq!(forward.hostname, backward.hostname);
    assert_eq!(forward.crosswalk, backward.crosswalk);
    assert_eq!(forward.combined, backward.combined);
}
