// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::llm_client::{ChatCompletionClient, CodeGenerator, LlmError};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub generator: Arc<dyn CodeGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn CodeGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        let client = ChatCompletionClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }
}
