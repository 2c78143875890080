//! CLI route: single route table and run context. Dispatches to the scan,
//! the resolver and the config printer.

use crate::cli::parse::{Commands, ScanArgs};
use crate::config::{ChownscanConfig, ConfigLoader, ScanConfig};
use crate::error::ScanError;
use crate::identity::{IdentityResolver, SystemResolver};
use crate::report::Reporter;
use crate::scan::{Migration, ScanSummary, Scanner};
use crate::tree::Walker;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Runtime context for CLI execution: the effective configuration.
pub struct RunContext {
    config: ChownscanConfig,
    config_path: Option<PathBuf>,
}

impl RunContext {
    /// Load configuration from `config_path`, or from the layered sources with
    /// `dir` as the directory searched for `chownscan.toml`.
    pub fn new(config_path: Option<PathBuf>, dir: &Path) -> Result<Self, ScanError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(dir)?,
        };
        Self::from_config(config, config_path)
    }

    pub fn from_config(
        config: ChownscanConfig,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ScanError> {
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ScanError::Config(format!(
                "Configuration validation failed: {}",
                msgs.join("; ")
            ))
        })?;
        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn config(&self) -> &ChownscanConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table, writing to `out`.
    pub fn execute<W: Write>(&self, command: &Commands, out: W) -> Result<(), ScanError> {
        match command {
            Commands::Scan(args) => self.scan(args, out).map(|_| ()),
            Commands::Lookup { account } => self.lookup(account, out),
            Commands::Config => self.show_config(out),
        }
    }

    /// Resolve both accounts, then walk and report.
    pub fn scan<W: Write>(&self, args: &ScanArgs, out: W) -> Result<ScanSummary, ScanError> {
        let mut settings = self.config.scan.clone();
        apply_scan_args(&mut settings, args);
        settings.validate().map_err(ScanError::Config)?;

        let source = settings.source_account.as_deref().ok_or_else(|| {
            ScanError::Config(
                "No source account: pass --source or set scan.source_account".to_string(),
            )
        })?;
        let migration =
            Migration::resolve(&self.resolver(), source, settings.target_account.as_deref())?;
        info!(
            source = %migration.source,
            target = %migration.target,
            root = %settings.root.display(),
            policy = ?settings.on_error,
            "Starting scan"
        );

        let walker = Walker::with_config(settings.root.clone(), settings.walker_config());
        let mut reporter =
            Reporter::new(BufWriter::new(out), settings.format).matches_only(settings.matches_only);
        let summary = Scanner::new(migration, settings.on_error).run(walker.entries(), &mut reporter)?;

        if !summary.skipped.is_empty() {
            warn!(
                skipped = summary.skipped.len(),
                "Some entries could not be read; the report is incomplete"
            );
        }
        Ok(summary)
    }

    fn lookup<W: Write>(&self, account: &str, mut out: W) -> Result<(), ScanError> {
        let identity = self.resolver().resolve(account)?;
        writeln!(out, "{} {}", identity.name, identity.uid)?;
        Ok(())
    }

    fn show_config<W: Write>(&self, mut out: W) -> Result<(), ScanError> {
        if let Some(ref path) = self.config_path {
            writeln!(out, "# loaded from {}", path.display())?;
        }
        let text = toml::to_string_pretty(&self.config)
            .map_err(|e| ScanError::Config(format!("Failed to render configuration: {}", e)))?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    fn resolver(&self) -> SystemResolver {
        SystemResolver::with_pinned(self.config.pinned_accounts())
    }
}

/// Fold CLI flags over the `[scan]` config section. Flags win.
pub fn apply_scan_args(scan: &mut ScanConfig, args: &ScanArgs) {
    if let Some(ref root) = args.root {
        scan.root = root.clone();
    }
    if let Some(ref source) = args.source {
        scan.source_account = Some(source.clone());
    }
    if let Some(ref target) = args.target {
        scan.target_account = Some(target.clone());
    }
    if let Some(policy) = args.on_error {
        scan.on_error = policy;
    }
    if let Some(depth) = args.max_depth {
        scan.max_depth = Some(depth);
    }
    if let Some(format) = args.format {
        scan.format = format;
    }
    if let Some(follow) = args.follow_symlinks() {
        scan.follow_symlinks = follow;
    }
    if let Some(skip) = args.skip_hidden() {
        scan.skip_hidden = skip;
    }
    if let Some(matches_only) = args.matches_only() {
        scan.matches_only = matches_only;
    }
    scan.exclude.extend(args.exclude.iter().cloned());
}
