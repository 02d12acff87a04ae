#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(clippy::wildcard_enum_match_arm)]

use clap::CommandFactory;

use super::*;

/// The root help output must contain all top-level subcommand names.
#[test]
fn test_root_help_lists_all_subcommands() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    let expected_subcommands = ["match", "inspect", "convert", "fetch", "version"];
    for name in &expected_subcommands {
        assert!(
            help.contains(name),
            "root help should mention subcommand '{name}'"
        );
    }
}

/// The root help output must describe every global flag.
#[test]
fn test_root_help_lists_global_flags() {
    let mut cmd = Cli::command();
    let help = format!("{}", cmd.render_help());

    let expected_flags = [
        "--format",
        "--quiet",
        "--verbose",
        "--max-file-size",
        "--no-color",
        "--help",
        "--version",
    ];
    for flag in &expected_flags {
        assert!(help.contains(flag), "root help should mention flag '{flag}'");
    }
}

/// `fedlink match --help` must mention the three dataset flags and `--out`.
#[test]
fn test_match_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("match")
        .expect("match subcommand should exist");
    let help = format!("{}", sub.render_help());
    for flag in ["--federation", "--registry", "--crosswalk", "--out"] {
        assert!(help.contains(flag), "match help should mention '{flag}'");
    }
}

/// `fedlink convert --help` must mention `FILE` and `--compact`.
#[test]
fn test_convert_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("convert")
        .expect("convert subcommand should exist");
    let help = format!("{}", sub.render_help());
    assert!(help.contains("FILE"), "convert help should mention FILE");
    assert!(
        help.contains("--compact"),
        "convert help should mention --compact"
    );
}

/// `fedlink fetch --help` must mention the URL overrides.
#[test]
fn test_fetch_help() {
    let mut cmd = Cli::command();
    let sub = cmd
        .find_subcommand_mut("fetch")
        .expect("fetch subcommand should exist");
    let help = format!("{}", sub.render_help());
    for flag in ["--federation-url", "--crosswalk-url", "--registry-url"] {
        assert!(help.contains(flag), "fetch help should mention '{flag}'");
    }
}

/// Clap's own debug assertions: argument conflicts, duplicate names.
#[test]
fn test_cli_debug_assert() {
    Cli::command().debug_assert();
}

/// `"-"` parses to the stdin variant, anything else to a path.
#[test]
fn test_path_or_stdin_parsing() {
    let stdin: PathOrStdin = "-".parse().expect("infallible");
    assert!(matches!(stdin, PathOrStdin::Stdin));

    let path: PathOrStdin = "data/edugain-v1.xml".parse().expect("infallible");
    match path {
        PathOrStdin::Path(p) => assert_eq!(p, std::path::PathBuf::from("data/edugain-v1.xml")),
        PathOrStdin::Stdin => panic!("expected a path"),
    }
}

/// `--quiet` and `--verbose` are mutually exclusive.
#[test]
fn test_quiet_conflicts_with_verbose() {
    let result = Cli::try_parse_from(["fedlink", "version", "--quiet", "--verbose"]);
    assert!(result.is_err(), "quiet+verbose should be rejected");
}

/// The default data paths point into `./data` and `./out`.
#[test]
fn test_match_defaults() {
    let cli = Cli::try_parse_from(["fedlink", "match"]).expect("parse");
    match cli.command {
        Command::Match {
            federation,
            registry,
            crosswalk,
            out,
        } => {
            assert_eq!(federation, std::path::PathBuf::from("./data/edugain-v1.xml"));
            assert_eq!(registry, std::path::PathBuf::from("./data/ror.json"));
            assert_eq!(
                crosswalk,
                std::path::PathBuf::from("./data/wikidata-ror-api.json")
            );
            assert_eq!(out, std::path::PathBuf::from("./out"));
        }
        _ => panic!("expected the match command"),
    }
}
