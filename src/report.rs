//! Report rendering
//!
//! Text output is one line per visited path plus one
//! `Resolve chown <account> <path>` line per match, with paths written as the
//! raw bytes the filesystem returned. JSON output is one object per visited
//! entry; paths that are not valid UTF-8 are rendered lossily there, flagged
//! with `path_lossy` and carried verbatim in `path_bytes`.

use crate::identity::Identity;
use crate::tree::entry::{EntryKind, FilesystemEntry};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One JSON report line
#[derive(Debug, Serialize)]
struct JsonLine {
    path: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    path_lossy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_bytes: Option<Vec<u8>>,
    uid: u32,
    kind: EntryKind,
    resolve: bool,
    command: Option<String>,
}

/// Writes report lines for visited entries
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    matches_only: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            matches_only: false,
        }
    }

    /// Only report entries that need an ownership change
    pub fn matches_only(mut self, matches_only: bool) -> Self {
        self.matches_only = matches_only;
        self
    }

    /// Report a visited entry; `target` is set when the entry needs a chown to that account.
    pub fn entry(&mut self, entry: &FilesystemEntry, target: Option<&Identity>) -> io::Result<()> {
        if self.matches_only && target.is_none() {
            return Ok(());
        }
        match self.format {
            OutputFormat::Text => {
                if !self.matches_only {
                    write_path_line(&mut self.out, &entry.path)?;
                }
                if let Some(target) = target {
                    write!(self.out, "Resolve chown {} ", target.name)?;
                    write_path_line(&mut self.out, &entry.path)?;
                }
            }
            OutputFormat::Json => {
                let lossy = entry.path.to_str().is_none();
                let line = JsonLine {
                    path: entry.path.to_string_lossy().into_owned(),
                    path_lossy: lossy,
                    path_bytes: lossy.then(|| entry.path.as_os_str().as_bytes().to_vec()),
                    uid: entry.uid,
                    kind: entry.kind,
                    resolve: target.is_some(),
                    command: target.map(|t| chown_command(&t.name, entry)),
                };
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_path_line<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    out.write_all(path.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

fn chown_command(account: &str, entry: &FilesystemEntry) -> String {
    format!("chown {} {}", account, entry.path.to_string_lossy())
}
