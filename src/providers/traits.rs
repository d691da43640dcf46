use async_trait::async_trait;
use anyhow::Result;
use serde_json::Value;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a single prompt and asks the model to answer with JSON shaped by
    /// `schema`. `Ok(None)` means the model answered with no text at all.
    async fn complete_json(&self, prompt: &str, schema: &Value) -> Result<Option<String>>;

    async fn get_model_info(&self) -> Result<String>;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
