//! Application configuration, loaded from the environment.
//!
//! Variables are read with the `FLUENTPATH_` prefix and `__` as the
//! nesting separator, e.g. `FLUENTPATH_AI__EVALUATION_TIMEOUT_MS=60000`.
//! A `.env` file is honored in development.

mod ai;
mod error;

pub use ai::AiConfig;
pub use error::ConfigError;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Loads configuration from the environment, validating it.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FLUENTPATH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ai.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
