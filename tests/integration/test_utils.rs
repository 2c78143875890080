//! Shared test utilities for integration tests
//!
//! The binary runs with a cleared environment so that the user's own
//! configuration and CHOWNSCAN_* variables never leak into a test.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A temporary tree plus an isolated HOME / XDG_CONFIG_HOME for the binary
pub struct Fixture {
    pub dir: TempDir,
    pub root: PathBuf,
    pub home: PathBuf,
}

impl Fixture {
    /// Creates `root/` with `a.txt`, `sub/` and `sub/b.txt`.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let root = dir.path().join("root");
        fs::create_dir_all(home.join(".config")).unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("sub").join("b.txt"), "b").unwrap();
        let root = fs::canonicalize(root).unwrap();
        Self { dir, root, home }
    }

    /// uid owning the fixture files
    pub fn owner_uid(&self) -> u32 {
        fs::metadata(self.root.join("a.txt")).unwrap().uid()
    }

    /// Expected walk order of the default fixture tree
    pub fn paths(&self) -> Vec<String> {
        ["a.txt", "sub", "sub/b.txt"]
            .iter()
            .map(|p| self.root.join(p).display().to_string())
            .collect()
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_chownscan"));
        cmd.env_clear()
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", self.home.join(".config"))
            .current_dir(self.dir.path());
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

pub fn running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}
