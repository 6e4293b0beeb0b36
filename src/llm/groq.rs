// src/llm/groq.rs

//! OpenAI-compatible chat-completions client for the Groq API.
//! No wrappers; just reqwest and Rust.

use anyhow::Result;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, Error as EventSourceError, RequestBuilderExt};
use serde_json::{Value, json};
use std::time::Duration;

use super::{
    ChatMessage, CompletionError, CompletionProvider, FREQUENCY_PENALTY, MAX_TOKENS,
    PRESENCE_PENALTY, TEMPERATURE, TOP_P,
};
use crate::config::BedsideConfig;

// No Debug derive: the struct holds the API credential.
pub struct GroqClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
    stream: bool,
}

impl GroqClient {
    /// Builds the client from startup configuration. The request timeout is
    /// fixed here, once; nothing re-reads it later.
    pub fn new(config: &BedsideConfig) -> Result<Self> {
        anyhow::ensure!(!config.groq_api_key.is_empty(), "GROQ_API_KEY is not set");

        let http = Client::builder()
            .timeout(Duration::from_secs(config.completion_timeout))
            .build()?;

        Ok(Self {
            http,
            api_key: config.groq_api_key.clone(),
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            stream: config.completion_stream,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(&self, messages: &[ChatMessage], stream: bool) -> Value {
        json!({
            "model": self.model,
            "messages": messages,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
            "top_p": TOP_P,
            "frequency_penalty": FREQUENCY_PENALTY,
            "presence_penalty": PRESENCE_PENALTY,
            "stream": stream,
            "stop": null,
        })
    }

    /// Single round trip, full completion in one JSON body.
    async fn complete_batched(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let resp = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, false))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let payload: Value = resp.json().await?;
        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        if text.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(text)
    }

    /// SSE stream of delta fragments, concatenated into one reply.
    async fn complete_streamed(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let request = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, true));

        let mut source = request
            .eventsource()
            .map_err(|e| CompletionError::Stream(e.to_string()))?;

        let mut text = String::new();
        while let Some(event) = source.next().await {
            match event {
                Ok(Event::Open) => {}
                Ok(Event::Message(frame)) => {
                    if frame.data == "[DONE]" {
                        break;
                    }
                    if let Ok(chunk) = serde_json::from_str::<Value>(&frame.data) {
                        if let Some(delta) = chunk["choices"][0]["delta"]["content"].as_str() {
                            text.push_str(delta);
                        }
                    }
                }
                Err(EventSourceError::StreamEnded) => break,
                Err(e) => {
                    source.close();
                    return Err(CompletionError::Stream(e.to_string()));
                }
            }
        }
        source.close();

        if text.trim().is_empty() {
            return Err(CompletionError::Empty);
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        if self.stream {
            self.complete_streamed(messages).await
        } else {
            self.complete_batched(messages).await
        }
    }
}
