//! Configuration management.

mod settings;
mod validate;

pub use settings::{
    AppConfig, AppSettings, BinanceSettings, LoggingConfig, ScannerSettings, UniverseSettings,
};
pub use validate::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables prefixed `SCANNER__` override file values, with
/// `__` separating nested keys (`SCANNER__SCANNER__BATCH_SIZE=5`).
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("SCANNER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Load configuration and reject invalid settings.
pub fn load_validated(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = load_config(path)?;
    config.validate()?;
    Ok(config)
}
