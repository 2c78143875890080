//! Local config file source: ./chownscan.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "chownscan.toml";

/// Add `<dir>/chownscan.toml` to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = dir.join(LOCAL_CONFIG_FILE);
    if !path.is_file() {
        return Ok(builder);
    }
    debug!(config_path = %path.display(), "Loading local configuration");
    Ok(builder.add_source(File::from(path).required(false)))
}
