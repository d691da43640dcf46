use crate::config::{parse_optional, ConfigError};

pub const DEFAULT_LANGUAGE: &str = "Russian";
pub const DEFAULT_PORTION_GRAMS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodConfig {
    /// Language the model writes `name` and `description` in.
    pub target_language: String,
    /// Reference portion used when the query names no quantity.
    pub default_portion_grams: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            target_language: DEFAULT_LANGUAGE.to_string(),
            default_portion_grams: DEFAULT_PORTION_GRAMS,
        }
    }
}

impl FoodConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let target_language = lookup("NUTRI_LANGUAGE")
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let default_portion_grams = match parse_optional::<f64, _>(&lookup, "NUTRI_DEFAULT_PORTION_G")? {
            Some(grams) if grams.is_finite() && grams > 0.0 => grams,
            Some(grams) => {
                return Err(ConfigError::InvalidValue {
                    name: "NUTRI_DEFAULT_PORTION_G".to_string(),
                    value: grams.to_string(),
                })
            }
            None => DEFAULT_PORTION_GRAMS,
        };

        Ok(Self {
            target_language,
            default_portion_grams,
        })
    }
}
