use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("API key must be provided via --api-key, {0}_API_KEY or API_KEY")]
    MissingApiKey(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub temperature: Option<f32>,
    pub request_timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn from_env(provider: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(provider, |key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(provider: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = provider.to_uppercase();

        let api_key = lookup(&format!("{}_API_KEY", prefix))
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(prefix.clone()))?;

        let model = lookup(&format!("{}_MODEL", prefix))
            .unwrap_or_else(|| match provider {
                "gemini" => DEFAULT_GEMINI_MODEL.to_string(),
                _ => String::new(),
            });

        let api_url = lookup(&format!("{}_API_URL", prefix))
            .unwrap_or_else(|| match provider {
                "gemini" => DEFAULT_GEMINI_API_URL.to_string(),
                _ => String::new(),
            });

        let temperature = parse_optional::<f32, _>(&lookup, &format!("{}_TEMPERATURE", prefix))?;

        let request_timeout = parse_optional::<u64, _>(&lookup, &format!("{}_TIMEOUT_SECS", prefix))?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            api_key,
            model,
            api_url,
            temperature,
            request_timeout,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

pub(crate) fn parse_optional<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value: raw,
            }),
    }
}
