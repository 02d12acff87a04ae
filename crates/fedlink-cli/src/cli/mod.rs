//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`]. This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits a plain-text summary table to stderr and plain text to
/// stdout. `Json` emits structured JSON (NDJSON for progress notes and the
/// summary, single objects for data).
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured JSON / NDJSON output.
    Json,
}

/// All top-level subcommands exposed by the `fedlink` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Match federation IdPs against registry organizations.
    Match {
        /// Path to federation metadata XML.
        #[arg(long, value_name = "FILE", default_value = "./data/edugain-v1.xml")]
        federation: PathBuf,
        /// Path to the registry data dump (JSON array of organizations).
        #[arg(long, value_name = "FILE", default_value = "./data/ror.json")]
        registry: PathBuf,
        /// Path to the crosswalk SPARQL-results JSON.
        #[arg(long, value_name = "FILE", default_value = "./data/wikidata-ror-api.json")]
        crosswalk: PathBuf,
        /// Directory to write result matrices and the full report into.
        #[arg(long, short = 'o', value_name = "DIR", default_value = "./out")]
        out: PathBuf,
    },

    /// Print summary statistics for the three input datasets.
    Inspect {
        /// Path to federation metadata XML.
        #[arg(long, value_name = "FILE", default_value = "./data/edugain-v1.xml")]
        federation: PathBuf,
        /// Path to the registry data dump (JSON array of organizations).
        #[arg(long, value_name = "FILE", default_value = "./data/ror.json")]
        registry: PathBuf,
        /// Path to the crosswalk SPARQL-results JSON.
        #[arg(long, value_name = "FILE", default_value = "./data/wikidata-ror-api.json")]
        crosswalk: PathBuf,
    },

    /// Convert federation metadata XML to normalized IdP records (JSON).
    Convert {
        /// Path to federation metadata XML, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Emit minified JSON with no extraneous whitespace.
        #[arg(long)]
        compact: bool,
    },

    /// Download the input datasets into a data directory.
    Fetch {
        /// Directory to store downloaded data.
        #[arg(long, short = 'o', value_name = "DIR", default_value = "./data")]
        out: PathBuf,
        /// Federation metadata URL.
        #[arg(long, value_name = "URL", default_value = federation_url())]
        federation_url: String,
        /// Crosswalk SPARQL query URL.
        #[arg(long, value_name = "URL", default_value = crosswalk_url())]
        crosswalk_url: String,
        /// Registry data-dump URL (a zip whose first `.json` entry is
        /// extracted). Skipped when not given; dumps are versioned and have
        /// no stable latest-release URL.
        #[arg(long, value_name = "URL")]
        registry_url: Option<String>,
    },

    /// Print the fedlink-core library version.
    Version,
}

/// Default federation metadata download URL.
fn federation_url() -> &'static str {
    "https://mds.edugain.org/edugain-v1.xml"
}

/// Default crosswalk SPARQL query: all registry-id / IdP-endpoint pairs.
fn crosswalk_url() -> &'static str {
    "https://query.wikidata.org/sparql?query=SELECT+DISTINCT+?rorid+?api+WHERE{?i+wdt:P6782+?rorid.?i+wdt:P6269+?api}&format=json"
}

/// Root CLI struct for the `fedlink` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "fedlink",
    version,
    about = "Link federation IdPs to registry organizations",
    long_about = "Links identity-provider records from federation metadata to\n\
                  organization records from an open registry, scored by name,\n\
                  hostname, and crosswalk evidence."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase stderr verbosity: record counts, timing, skipped-link counts
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input file size in bytes.
    ///
    /// Can also be set via the `FEDLINK_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 1073741824 (1 GB; registry dumps are large).
    #[arg(
        long,
        global = true,
        env = "FEDLINK_MAX_FILE_SIZE",
        default_value = "1073741824"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[cfg(test)]
mod tests;
