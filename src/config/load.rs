use crate::config::error::ConfigError;
use crate::config::settings::EngineSettings;
use crate::config::validate::validate_engine_settings;
use std::path::Path;

pub fn load_engine_settings(path: &Path) -> Result<EngineSettings, ConfigError> {
    let settings = EngineSettings::from_path(path)?;
    validate_engine_settings(&settings)?;
    Ok(settings)
}
