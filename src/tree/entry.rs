//! Filesystem entries as seen by the walker

use serde::Serialize;
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
    Other,
}

impl From<&Metadata> for EntryKind {
    fn from(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// A path and the uid that owns it. Read once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilesystemEntry {
    pub path: PathBuf,
    pub uid: u32,
    pub kind: EntryKind,
}

impl FilesystemEntry {
    pub fn new(path: impl Into<PathBuf>, uid: u32, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            uid,
            kind,
        }
    }

    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        Self {
            path,
            uid: metadata.uid(),
            kind: EntryKind::from(metadata),
        }
    }
}
