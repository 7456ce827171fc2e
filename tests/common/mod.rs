//! Test doubles for the injected capabilities: a deterministic encoder and
//! a scriptable completion client.

use async_trait::async_trait;
use docy::llm::client::{CompletionClient, FragmentStream};
use docy::rag::Encoder;
use docy::types::{AppError, ChatMessage, Result};
use futures::StreamExt;
use std::sync::{Arc, Mutex};

/// Byte-histogram embeddings: deterministic, identical input → identical
/// vector, and identical text scores cosine 1.0 against itself.
pub struct HashEncoder {
    pub encode_calls: Mutex<usize>,
}

impl HashEncoder {
    pub fn new() -> Self {
        Self {
            encode_calls: Mutex::new(0),
        }
    }

    fn embed(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; 16];
        for b in text.bytes() {
            v[(b as usize) % 16] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Encoder for HashEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }

    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        *self.encode_calls.lock().unwrap() += 1;
        Ok(Self::embed(text))
    }
}

/// Completion client with scripted behavior. Records every dispatched
/// (model, messages) pair so tests can assert on the assembled prompt and
/// the resolved model, and counts how many fragments streaming consumers
/// actually pull.
pub struct ScriptedCompleter {
    /// Reply for non-streaming calls.
    pub reply: String,
    /// Per-fragment script for streaming calls; `Err` becomes a stream
    /// interruption after the preceding fragments.
    pub script: Vec<std::result::Result<String, String>>,
    /// When set, every call fails as upstream-unavailable.
    pub unavailable: bool,
    pub calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    pulled: Arc<Mutex<usize>>,
}

impl ScriptedCompleter {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            script: Vec::new(),
            unavailable: false,
            calls: Mutex::new(Vec::new()),
            pulled: Arc::new(Mutex::new(0)),
        }
    }

    pub fn streaming(script: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            reply: String::new(),
            script,
            unavailable: false,
            calls: Mutex::new(Vec::new()),
            pulled: Arc::new(Mutex::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reply: String::new(),
            script: Vec::new(),
            unavailable: true,
            calls: Mutex::new(Vec::new()),
            pulled: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Vec<ChatMessage> {
        self.calls.lock().unwrap().last().cloned().unwrap().1
    }

    pub fn last_model(&self) -> String {
        self.calls.lock().unwrap().last().cloned().unwrap().0
    }

    /// How many fragments streaming consumers have pulled so far.
    pub fn pulled_count(&self) -> usize {
        *self.pulled.lock().unwrap()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompleter {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        if self.unavailable {
            return Err(AppError::UpstreamUnavailable("connection refused".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        Ok(self.reply.clone())
    }

    async fn chat_stream(&self, model: &str, messages: &[ChatMessage]) -> Result<FragmentStream> {
        if self.unavailable {
            return Err(AppError::UpstreamUnavailable("connection refused".to_string()));
        }
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));

        let items: Vec<Result<String>> = self
            .script
            .iter()
            .map(|entry| match entry {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(AppError::StreamInterrupted(msg.clone())),
            })
            .collect();

        let pulled = self.pulled.clone();
        let stream = futures::stream::iter(items).inspect(move |_| {
            *pulled.lock().unwrap() += 1;
        });
        Ok(Box::new(stream))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        if self.unavailable {
            return Err(AppError::UpstreamUnavailable("connection refused".to_string()));
        }
        Ok(vec!["gemma3:1b".to_string(), "llama3.2".to_string()])
    }
}
