//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults < global file < local file < environment.
//! An explicit `--config` file takes the place of both file layers.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("scan.root", "/")?
        .set_default("scan.on_error", "abort")?
        .set_default("scan.format", "text")
}
