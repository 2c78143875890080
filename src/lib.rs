//! chownscan: find files still owned by a migrated account
//!
//! Walks a filesystem tree, compares each entry's owner uid with a source
//! account, and prints a `Resolve chown <account> <path>` hint for every match.
//! Ownership is never changed. Unix only.

pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod report;
pub mod scan;
pub mod tree;
