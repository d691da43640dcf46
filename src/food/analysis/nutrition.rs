use crate::food::analysis::schema::{parse_response, response_schema, ParsedResponse};
use crate::food::config::FoodConfig;
use crate::food::models::NutritionEstimate;
use crate::providers::traits::CompletionProvider;
use serde_json::Value;
use thiserror::Error;

pub const NOT_FOOD_MESSAGE: &str = "This does not look like food.";
pub const NO_ESTIMATE_MESSAGE: &str = "Could not analyze this food.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong during analysis. Try refining the query.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NutritionError {
    #[error("input was not recognized as food")]
    NotFood,
    #[error("estimation service returned no content")]
    EmptyResponse,
    #[error("estimation request failed: {0}")]
    Transport(String),
    #[error("estimation response is malformed: {0}")]
    Malformed(String),
}

impl NutritionError {
    /// Everything except an explicit "not food" answer is a service failure.
    pub fn is_service_error(&self) -> bool {
        !matches!(self, NutritionError::NotFood)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            NutritionError::NotFood => NOT_FOOD_MESSAGE,
            NutritionError::EmptyResponse => NO_ESTIMATE_MESSAGE,
            NutritionError::Transport(_) | NutritionError::Malformed(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

pub fn build_prompt(query: &str, config: &FoodConfig) -> String {
    format!(
        "Analyze the following food item, described in {language} or any other language, and provide \
         nutritional information for the serving size stated or implied in the description, or for a \
         standard {portion}g portion if no serving size is given.\n\n\
         Food item: \"{query}\"\n\n\
         If the input is not a food item, set is_food to false and return null for all other values.\n\
         Provide realistic estimates based on standard nutritional databases.\n\
         Translate the name to {language} for the 'name' field.\n",
        language = config.target_language,
        portion = config.default_portion_grams,
        query = query,
    )
}

/// Turns free-text food descriptions into nutrition estimates through a
/// completion provider. Every call goes to the provider; nothing is cached
/// and nothing is retried.
pub struct NutritionClient {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    config: FoodConfig,
    schema: Value,
}

impl NutritionClient {
    pub fn new(provider: Box<dyn CompletionProvider + Send + Sync>, config: FoodConfig) -> Self {
        let schema = response_schema(&config.target_language);
        Self { provider, config, schema }
    }

    pub fn config(&self) -> &FoodConfig {
        &self.config
    }

    pub async fn model_name(&self) -> String {
        self.provider
            .get_model_info()
            .await
            .unwrap_or_else(|_| "unknown".to_string())
    }

    pub async fn estimate(&self, query: &str) -> Result<NutritionEstimate, NutritionError> {
        let result = self.request_estimate(query).await;
        match &result {
            Ok(estimate) => log::info!("Estimated '{}': {} kcal", estimate.name, estimate.calories),
            Err(NutritionError::NotFood) => log::info!("Query '{}' was not recognized as food", query),
            Err(e) => log::error!("Error analyzing food '{}': {}", query, e),
        }
        result
    }

    async fn request_estimate(&self, query: &str) -> Result<NutritionEstimate, NutritionError> {
        let prompt = build_prompt(query, &self.config);
        log::debug!("Estimation prompt: {}", prompt);

        let text = self
            .provider
            .complete_json(&prompt, &self.schema)
            .await
            .map_err(|e| NutritionError::Transport(e.to_string()))?
            .filter(|text| !text.trim().is_empty())
            .ok_or(NutritionError::EmptyResponse)?;

        match parse_response(&text).map_err(NutritionError::Malformed)? {
            ParsedResponse::Food(estimate) => Ok(estimate),
            ParsedResponse::NotFood => Err(NutritionError::NotFood),
        }
    }
}
