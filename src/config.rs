//! Configuration System
//!
//! Layered configuration (defaults, global file, local file, environment) for
//! the scan, pinned accounts and logging. CLI flags are applied on top by the
//! CLI layer.

use crate::logging::LoggingConfig;
use crate::report::OutputFormat;
use crate::scan::ErrorPolicy;
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChownscanConfig {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Pinned accounts, consulted before the system account database.
    ///
    /// Written as `[[accounts]]` tables so names keep their case: keys of a
    /// plain table are lowercased by the config loader.
    #[serde(default)]
    pub accounts: Vec<PinnedAccount>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// An account name fixed to a uid, e.g. an account already deleted from the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedAccount {
    pub name: String,
    pub uid: u32,
}

impl PinnedAccount {
    pub fn new(name: impl Into<String>, uid: u32) -> Self {
        Self {
            name: name.into(),
            uid,
        }
    }
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Account whose files are flagged
    #[serde(default)]
    pub source_account: Option<String>,

    /// Account named in the remediation hint (defaults to source_account)
    #[serde(default)]
    pub target_account: Option<String>,

    /// Root of the walk
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub on_error: ErrorPolicy,

    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub skip_hidden: bool,

    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Absolute path prefixes to prune
    #[serde(default)]
    pub exclude: Vec<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Only print entries that need a chown
    #[serde(default)]
    pub matches_only: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from("/")
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_account: None,
            target_account: None,
            root: default_root(),
            on_error: ErrorPolicy::default(),
            follow_symlinks: false,
            skip_hidden: false,
            max_depth: None,
            exclude: Vec::new(),
            format: OutputFormat::default(),
            matches_only: false,
        }
    }
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            max_depth: self.max_depth,
            skip_hidden: self.skip_hidden,
            exclude: self.exclude.clone(),
        }
    }

    /// Validate scan settings
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("Root path cannot be empty".to_string());
        }
        if self.max_depth == Some(0) {
            return Err("max_depth must be at least 1".to_string());
        }
        if let Some(path) = self.exclude.iter().find(|p| !p.is_absolute()) {
            return Err(format!("Exclude path must be absolute: {}", path.display()));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Scan(String),
    Account(String, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Account(name, msg) => write!(f, "Account '{}': {}", name, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ChownscanConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }

        let mut seen: HashMap<&str, u32> = HashMap::new();
        for account in &self.accounts {
            let name = account.name.as_str();
            if name.trim().is_empty() {
                errors.push(ValidationError::Account(
                    name.to_string(),
                    "Pinned account name cannot be empty".to_string(),
                ));
            } else if name.trim() != name {
                errors.push(ValidationError::Account(
                    name.to_string(),
                    "Pinned account name has leading or trailing whitespace".to_string(),
                ));
            }
            match seen.insert(name, account.uid) {
                Some(uid) if uid != account.uid => errors.push(ValidationError::Account(
                    name.to_string(),
                    format!("Pinned twice with different uids ({} and {})", uid, account.uid),
                )),
                _ => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Pinned accounts keyed by exact name
    pub fn pinned_accounts(&self) -> HashMap<String, u32> {
        self.accounts
            .iter()
            .map(|account| (account.name.clone(), account.uid))
            .collect()
    }
}
