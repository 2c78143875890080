//! Filesystem traversal
//!
//! Lazily enumerates the entries under a root together with the uid that
//! owns each of them.

pub mod entry;
pub mod walker;

pub use entry::{EntryKind, FilesystemEntry};
pub use walker::{Walker, WalkerConfig};
