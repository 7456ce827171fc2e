use crate::llm::client::{CompletionClient, FragmentStream};
use crate::rag::embeddings::Encoder;
use crate::types::{AppError, ChatMessage, Result, Role};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage as OllamaMessage, request::ChatMessageRequest},
    generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
};

/// Ollama server client: chat completions (plain and streamed), model
/// listing, and text embeddings over one connection.
pub struct OllamaClient {
    client: Ollama,
    embedding_model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, embedding_model: String) -> Self {
        let url_parts: Vec<&str> = base_url.split("://").collect();
        let (host, port) = if url_parts.len() == 2 {
            let host_port: Vec<&str> = url_parts[1].split(':').collect();
            let host = host_port[0].to_string();
            let port = if host_port.len() == 2 {
                host_port[1].parse().unwrap_or(11434)
            } else {
                11434
            };
            (host, port)
        } else {
            ("localhost".to_string(), 11434)
        };

        Self {
            client: Ollama::new(host, port),
            embedding_model,
        }
    }

    fn to_ollama_messages(messages: &[ChatMessage]) -> Vec<OllamaMessage> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System => OllamaMessage::system(m.content.clone()),
                Role::User => OllamaMessage::user(m.content.clone()),
                Role::Assistant => OllamaMessage::assistant(m.content.clone()),
            })
            .collect()
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let request =
            ChatMessageRequest::new(model.to_string(), Self::to_ollama_messages(messages));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Ollama chat error: {}", e)))?;

        Ok(response.message.content)
    }

    async fn chat_stream(&self, model: &str, messages: &[ChatMessage]) -> Result<FragmentStream> {
        let request =
            ChatMessageRequest::new(model.to_string(), Self::to_ollama_messages(messages));

        let mut stream_response = self
            .client
            .send_chat_messages_stream(request)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Ollama stream error: {}", e)))?;

        let output_stream = stream! {
            while let Some(chunk_result) = stream_response.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        let content = chunk.message.content;
                        if !content.is_empty() {
                            yield Ok(content);
                        }
                    }
                    Err(_) => {
                        yield Err(AppError::StreamInterrupted(
                            "Ollama stream chunk error".to_string(),
                        ));
                        break;
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(output_stream)))
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Ollama list error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl Encoder for OllamaClient {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = GenerateEmbeddingsRequest::new(
            self.embedding_model.clone(),
            EmbeddingsInput::Multiple(texts.to_vec()),
        );

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Ollama embed error: {}", e)))?;

        if response.embeddings.len() != texts.len() {
            return Err(AppError::UpstreamUnavailable(format!(
                "Ollama returned {} embeddings for {} inputs",
                response.embeddings.len(),
                texts.len()
            )));
        }

        Ok(response.embeddings)
    }

    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let request = GenerateEmbeddingsRequest::new(
            self.embedding_model.clone(),
            EmbeddingsInput::Single(text.to_string()),
        );

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Ollama embed error: {}", e)))?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::UpstreamUnavailable("Ollama returned no embedding".to_string())
            })
    }
}
