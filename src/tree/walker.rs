//! Filesystem walker for enumerating entries and their owners

use crate::error::AccessError;
use crate::tree::entry::FilesystemEntry;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Filesystem walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false, links report their own owner)
    pub follow_symlinks: bool,
    /// Maximum depth below the root (None = unlimited)
    pub max_depth: Option<usize>,
    /// Skip dot-files and do not descend into dot-directories
    pub skip_hidden: bool,
    /// Absolute path prefixes pruned from traversal (e.g. "/proc")
    pub exclude: Vec<PathBuf>,
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Root as it will appear in reported paths.
    ///
    /// Relative roots are made absolute; a root that cannot be canonicalized is
    /// kept as given and its error surfaces as the first item of the walk.
    pub fn root(&self) -> PathBuf {
        dunce::canonicalize(&self.root).unwrap_or_else(|_| self.root.clone())
    }

    /// Lazily walk the tree below the root.
    ///
    /// The root itself is not yielded. Siblings are visited in file-name order,
    /// depth first, so an unchanged tree always produces the same sequence.
    pub fn entries(&self) -> impl Iterator<Item = Result<FilesystemEntry, AccessError>> {
        let root = self.root();
        debug!(root = %root.display(), config = ?self.config, "Starting walk");

        let prune = self.config.clone();
        WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .min_depth(1)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| !should_prune(&prune, entry))
            .map(move |result| -> Result<FilesystemEntry, AccessError> {
                let entry = result.map_err(|e| AccessError::from_walkdir(e, &root))?;
                let metadata = entry
                    .metadata()
                    .map_err(|e| AccessError::from_walkdir(e, entry.path()))?;
                Ok(FilesystemEntry::from_metadata(entry.into_path(), &metadata))
            })
    }
}

/// Check if an entry (and, for directories, its subtree) should be skipped
fn should_prune(config: &WalkerConfig, entry: &DirEntry) -> bool {
    if config.skip_hidden && is_hidden(entry) {
        return true;
    }
    let path = entry.path();
    config.exclude.iter().any(|prefix| path.starts_with(prefix))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_bytes().starts_with(b".")
}
