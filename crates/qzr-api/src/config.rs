use serde::Deserialize;
use thiserror::Error;

/// Deployment environment, selects the logging format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Process configuration, read from environment variables
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub app_env: Environment,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,
    pub gemini_api_key: String,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Local hour of the daily quiz reminder
    #[serde(default = "default_reminder_hour")]
    pub reminder_hour: u32,
}

fn default_database_url() -> String {
    "sqlite://quizzer.db".to_string()
}

const fn default_database_max_connections() -> u32 {
    5
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

const fn default_reminder_hour() -> u32 {
    19
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Build from explicit key/value pairs, using the same names as the environment
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::from_iter(pairs)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "GEMINI_API_KEY cannot be empty".to_string(),
            ));
        }
        if self.reminder_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "REMINDER_HOUR must be between 0 and 23, got {}",
                self.reminder_hour
            )));
        }
        if self.database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
