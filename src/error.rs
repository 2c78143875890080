//! Error types for chownscan.

use std::path::PathBuf;
use thiserror::Error;

/// Account resolution errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Account name is empty")]
    EmptyName,

    #[error("Account name '{0}' has leading or trailing whitespace")]
    PaddedName(String),

    #[error("Unknown account '{0}'")]
    UnknownAccount(String),

    #[error("Account database unavailable while resolving '{account}': {source}")]
    Unavailable {
        account: String,
        #[source]
        source: nix::errno::Errno,
    },
}

/// Per-entry filesystem errors raised during traversal
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem loop at {} (ancestor {})", .path.display(), .ancestor.display())]
    Loop { path: PathBuf, ancestor: PathBuf },
}

impl AccessError {
    /// Path of the entry that could not be read
    pub fn path(&self) -> &std::path::Path {
        match self {
            AccessError::Unreadable { path, .. } | AccessError::Loop { path, .. } => path,
        }
    }

    /// Convert a walkdir error, falling back to `fallback` when the error carries no path.
    pub(crate) fn from_walkdir(err: walkdir::Error, fallback: &std::path::Path) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| fallback.to_path_buf());

        if let Some(ancestor) = err.loop_ancestor() {
            return AccessError::Loop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        let message = err.to_string();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, message));
        AccessError::Unreadable { path, source }
    }
}

/// Top-level errors for a chownscan run
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error(
        "Scan aborted after {visited} entries: {source} (last path processed: {})",
        display_last(.last_path)
    )]
    Aborted {
        #[source]
        source: AccessError,
        last_path: Option<PathBuf>,
        visited: usize,
    },

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn display_last(last_path: &Option<PathBuf>) -> String {
    match last_path {
        Some(path) => path.display().to_string(),
        None => "<none>".to_string(),
    }
}

impl From<config::ConfigError> for ScanError {
    fn from(err: config::ConfigError) -> Self {
        ScanError::Config(err.to_string())
    }
}
