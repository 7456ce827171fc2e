use crate::types::{ChatMessage, Result};
use async_trait::async_trait;
use futures::Stream;

/// A lazy, finite, non-restartable sequence of answer fragments.
///
/// Dropping the stream stops any further fragment requests and releases the
/// underlying connection.
pub type FragmentStream = Box<dyn Stream<Item = Result<String>> + Send + Unpin>;

/// Opaque chat-completion service.
///
/// The inference engine itself is an external collaborator; this trait is
/// the whole surface the pipeline depends on, so tests substitute scripted
/// implementations and providers can be swapped without touching the
/// orchestration code.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Dispatch `messages` and await the full answer.
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;

    /// Dispatch `messages` and return fragments as the service emits them,
    /// in emission order, without buffering the whole answer.
    async fn chat_stream(&self, model: &str, messages: &[ChatMessage]) -> Result<FragmentStream>;

    /// Identifiers of the models the service can run.
    async fn list_models(&self) -> Result<Vec<String>>;
}
