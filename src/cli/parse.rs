//! CLI parse: clap types for chownscan and the `--x`/`--no-x` flag pairs.

use crate::report::OutputFormat;
use crate::scan::ErrorPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// chownscan - find files still owned by a migrated account
#[derive(Parser)]
#[command(name = "chownscan")]
#[command(about = "Report files owned by an account and print the chown that fixes them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides global and local config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a tree and report entries owned by the source account
    Scan(ScanArgs),
    /// Resolve an account name to its uid
    Lookup {
        /// Account name (or numeric uid)
        account: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Flags for `scan`; each one overrides the matching `[scan]` config key
#[derive(Args, Debug, Default, Clone)]
pub struct ScanArgs {
    /// Root of the walk (default: "/")
    pub root: Option<PathBuf>,

    /// Account whose files are flagged
    #[arg(long, visible_alias = "from")]
    pub source: Option<String>,

    /// Account named in the chown hint (defaults to --source)
    #[arg(long, visible_alias = "to")]
    pub target: Option<String>,

    /// What to do with unreadable entries
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Follow symbolic links
    #[arg(long, overrides_with = "no_follow_symlinks")]
    pub follow_symlinks: bool,

    /// Report symbolic links themselves, even if the config follows them
    #[arg(long, overrides_with = "follow_symlinks")]
    pub no_follow_symlinks: bool,

    /// Skip dot-files and dot-directories
    #[arg(long, overrides_with = "no_skip_hidden")]
    pub skip_hidden: bool,

    /// Include dot-files and dot-directories, even if the config skips them
    #[arg(long, overrides_with = "skip_hidden")]
    pub no_skip_hidden: bool,

    /// Maximum depth below the root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Absolute path prefix to skip (repeatable)
    #[arg(long)]
    pub exclude: Vec<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only print entries that need a chown
    #[arg(long, overrides_with = "no_matches_only")]
    pub matches_only: bool,

    /// Print every visited entry, even if the config asks for matches only
    #[arg(long, overrides_with = "matches_only")]
    pub no_matches_only: bool,
}

impl ScanArgs {
    pub fn follow_symlinks(&self) -> Option<bool> {
        flag_pair(self.follow_symlinks, self.no_follow_symlinks)
    }

    pub fn skip_hidden(&self) -> Option<bool> {
        flag_pair(self.skip_hidden, self.no_skip_hidden)
    }

    pub fn matches_only(&self) -> Option<bool> {
        flag_pair(self.matches_only, self.no_matches_only)
    }
}

/// `--x` / `--no-x`: the last one given wins, neither leaves the config value.
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
