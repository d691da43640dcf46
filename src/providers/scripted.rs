//! Canned provider for tests. Replies are consumed in order; every prompt is
//! recorded so tests can inspect what was sent.

use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::providers::traits::CompletionProvider;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Empty,
    Fail(String),
    /// Never answers.
    Hang,
}

#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Reply::Text(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete_json(&self, prompt: &str, _schema: &Value) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(Some(text)),
            Some(Reply::Empty) => Ok(None),
            Some(Reply::Fail(message)) => Err(anyhow!(message)),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(anyhow!("no scripted reply left")),
        }
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok("scripted".to_string())
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}
