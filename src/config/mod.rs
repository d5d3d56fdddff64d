pub mod error;
pub mod load;
pub mod settings;
pub mod validate;

pub use error::ConfigError;
pub use load::load_engine_settings;
pub use settings::{ConsequenceRule, EngineSettings};
pub use validate::validate_engine_settings;
