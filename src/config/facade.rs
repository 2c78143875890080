//! Config loading entry points.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, local_file};
use super::ChownscanConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`ChownscanConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, `<dir>/chownscan.toml`, then environment.
    pub fn load(dir: &Path) -> Result<ChownscanConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = local_file::add_to_builder(builder, dir)?;
        let builder = environment::add_to_builder(builder);
        let config: ChownscanConfig = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Defaults, the given file (must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<ChownscanConfig, ConfigError> {
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder);
        let config: ChownscanConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), ?config, "Configuration loaded from file");
        Ok(config)
    }
}
