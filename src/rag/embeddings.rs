use crate::types::Result;
use async_trait::async_trait;

/// Text-to-vector encoding capability.
///
/// The concrete encoder is injected at startup (see
/// [`crate::llm::ollama::OllamaClient`], which serves embeddings over the
/// same Ollama connection used for chat). Implementations must be
/// deterministic for identical input: re-encoding the same passage yields
/// the same vector.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode a batch of passages, one fixed-length vector per passage,
    /// in input order.
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Encode a single query string.
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;
}
