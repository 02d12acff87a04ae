/// Progress and summary formatting: human-readable and JSON (NDJSON) modes.
///
/// Two output strategies for the matcher's stderr channel:
///
/// - **Human mode** (default): verbose progress notes as plain lines, the
///   final five-row tally table aligned in columns, with the header dimmed
///   when colors are enabled. Colors are disabled when `--no-color` is set,
///   the `NO_COLOR` environment variable is present (per
///   <https://no-color.org>), or stderr is not a TTY.
/// - **JSON mode**: progress notes and tally rows as single-line JSON
///   objects (NDJSON).
///
/// Both modes support a **quiet** flag (suppress everything but errors) and
/// a **verbose** flag (progress notes, timing).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use fedlink_core::{MatrixKind, Tally};

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
///
/// Colors are disabled when any of the following conditions hold:
/// - `no_color_flag` is `true` (the `--no-color` CLI flag was passed).
/// - The `NO_COLOR` environment variable is present (any non-empty value).
/// - stderr is not a TTY (e.g. the output is piped to a file).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_DIM: &str = "\x1b[2m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Output mode selector derived from `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Plain text for people.
    Human,
    /// NDJSON for machines.
    Json,
}

/// Configuration for the stderr formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit progress notes and timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    ///
    /// `no_color_flag` is the `--no-color` boolean. Color detection also
    /// checks the `NO_COLOR` env var and the stderr TTY state.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Progress notes
// ---------------------------------------------------------------------------

/// Writes a verbose progress note (e.g. record counts after parsing).
///
/// A no-op unless `config.verbose` is set. In JSON mode the note becomes
/// `{"note":"..."}`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_note<W: Write>(
    writer: &mut W,
    note: &str,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    match mode {
        FormatMode::Human => writeln!(writer, "{note}"),
        FormatMode::Json => writeln!(writer, r#"{{"note":{}}}"#, json_string(note)),
    }
}

/// Writes timing information in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    match mode {
        FormatMode::Human => writeln!(writer, "{label} in {}ms", duration.as_millis()),
        FormatMode::Json => writeln!(
            writer,
            r#"{{"timing":{{"label":{},"ms":{}}}}}"#,
            json_string(label),
            duration.as_millis()
        ),
    }
}

// ---------------------------------------------------------------------------
// Tally table
// ---------------------------------------------------------------------------

/// Writes the five-row classification summary.
///
/// Human mode produces an aligned table:
///
/// ```text
/// view            unique  ambiguous  no_match
/// name               712     108         3021
/// ...
/// ```
///
/// JSON mode emits one NDJSON object per view:
/// `{"view":"name","unique":712,"ambiguous":108,"no_match":3021}`.
///
/// Suppressed entirely in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_tally_table<W: Write>(
    writer: &mut W,
    tallies: &[(MatrixKind, Tally)],
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match mode {
        FormatMode::Human => {
            let header = format!(
                "{:<16}{:>8}{:>11}{:>10}",
                "view", "unique", "ambiguous", "no_match"
            );
            if config.colors {
                writeln!(writer, "{ANSI_DIM}{header}{ANSI_RESET}")?;
            } else {
                writeln!(writer, "{header}")?;
            }
            for (kind, tally) in tallies {
                writeln!(
                    writer,
                    "{:<16}{:>8}{:>11}{:>10}",
                    kind.label(),
                    tally.unique,
                    tally.ambiguous,
                    tally.no_match
                )?;
            }
            Ok(())
        }
        FormatMode::Json => {
            for (kind, tally) in tallies {
                writeln!(
                    writer,
                    r#"{{"view":{},"unique":{},"ambiguous":{},"no_match":{}}}"#,
                    json_string(kind.label()),
                    tally.unique,
                    tally.ambiguous,
                    tally.no_match
                )?;
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// JSON string escaping
// ---------------------------------------------------------------------------

/// Minimal JSON string encoder for the NDJSON lines above, avoiding a
/// serde_json round trip per line.
fn json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn config(quiet: bool, verbose: bool) -> FormatterConfig {
        FormatterConfig {
            colors: false,
            quiet,
            verbose,
        }
    }

    fn sample_tallies() -> Vec<(MatrixKind, Tally)> {
        vec![(
            MatrixKind::Name,
            Tally {
                unique: 7,
                ambiguous: 2,
                no_match: 1,
            },
        )]
    }

    #[test]
    fn note_only_in_verbose_mode() {
        let mut buf = Vec::new();
        write_note(&mut buf, "parsed 10 IdPs", FormatMode::Human, &config(false, false))
            .expect("write");
        assert!(buf.is_empty());

        write_note(&mut buf, "parsed 10 IdPs", FormatMode::Human, &config(false, true))
            .expect("write");
        assert_eq!(String::from_utf8_lossy(&buf), "parsed 10 IdPs\n");
    }

    #[test]
    fn note_json_is_single_object_line() {
        let mut buf = Vec::new();
        write_note(&mut buf, "x \"y\"", FormatMode::Json, &config(false, true)).expect("write");
        assert_eq!(String::from_utf8_lossy(&buf), "{\"note\":\"x \\\"y\\\"\"}\n");
    }

    #[test]
    fn tally_table_suppressed_in_quiet_mode() {
        let mut buf = Vec::new();
        write_tally_table(&mut buf, &sample_tallies(), FormatMode::Human, &config(true, false))
            .expect("write");
        assert!(buf.is_empty());
    }

    #[test]
    fn tally_table_human_has_header_and_rows() {
        let mut buf = Vec::new();
        write_tally_table(&mut buf, &sample_tallies(), FormatMode::Human, &config(false, false))
            .expect("write");
        let text = String::from_utf8_lossy(&buf);
        let mut lines = text.lines();
        let header = lines.next().expect("header");
        assert!(header.contains("unique"));
        assert!(header.contains("ambiguous"));
        let row = lines.next().expect("row");
        assert!(row.starts_with("name"));
        assert!(row.contains('7'));
    }

    #[test]
    fn tally_table_json_rows_parse() {
        let mut buf = Vec::new();
        write_tally_table(&mut buf, &sample_tallies(), FormatMode::Json, &config(false, false))
            .expect("write");
        let text = String::from_utf8_lossy(&buf);
        let value: serde_json::Value =
            serde_json::from_str(text.trim()).expect("valid NDJSON line");
        assert_eq!(value["view"], "name");
        assert_eq!(value["unique"], 7);
        assert_eq!(value["no_match"], 1);
    }

    #[test]
    fn json_string_escapes_control_characters() {
        assert_eq!(json_string("a\u{1}b"), "\"a\\u0001b\"");
    }
}
