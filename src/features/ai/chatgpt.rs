//! ChatGPT backend (OpenAI chat completion)
//!
//! Single-turn completions through the openai crate. The crate reads its
//! key from the `OPENAI_KEY` environment variable, which `main` exports
//! when a credential is configured; this type only tracks availability.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};

use super::backend::{AiBackend, BackendError};

pub struct ChatGptBackend {
    model: String,
    max_tokens: u64,
    available: bool,
}

impl ChatGptBackend {
    pub fn new(api_key: Option<&str>, model: String, max_tokens: u64) -> Self {
        ChatGptBackend {
            model,
            max_tokens,
            available: api_key.map_or(false, |key| !key.is_empty()),
        }
    }
}

#[async_trait]
impl AiBackend for ChatGptBackend {
    fn name(&self) -> &'static str {
        "ChatGPT"
    }

    fn selector(&self) -> &'static str {
        "chatgpt"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BackendError> {
        let messages = vec![ChatCompletionMessage {
            role: ChatCompletionMessageRole::User,
            content: Some(prompt.to_string()),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        }];

        debug!("ChatGPT request | model: {} | prompt: {} chars", self.model, prompt.len());

        let completion = ChatCompletion::builder(&self.model, messages)
            .max_tokens(self.max_tokens)
            .create()
            .await
            .map_err(|e| BackendError::classify(e.to_string()))?;

        completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                BackendError::MalformedResponse("completion carried no message content".to_string())
            })
    }
}
