use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    api_url: String,
    temperature: Option<f32>,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: config.api_key,
            client,
            model: config.model,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }

    fn request_body(&self, prompt: &str, schema: &Value) -> Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
        if let Some(temperature) = self.temperature {
            generation_config["temperature"] = json!(temperature);
        }

        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": generation_config
        })
    }
}

/// Concatenates the text parts of the first candidate. Returns `None` when the
/// candidate carries no text, which the caller treats as an empty answer.
pub fn extract_text(response_json: &Value) -> Option<String> {
    let parts = response_json["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete_json(&self, prompt: &str, schema: &Value) -> Result<Option<String>> {
        let response = self.client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(prompt, schema))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini returned {}: {}", status, body));
        }

        let response_json: Value = response.json().await?;
        Ok(extract_text(&response_json))
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
