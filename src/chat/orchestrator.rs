use crate::chat::prompt::PromptPolicy;
use crate::llm::client::{CompletionClient, FragmentStream};
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::Encoder;
use crate::rag::index::{DocumentSession, SessionIndex};
use crate::rag::retriever;
use crate::types::{AppError, ChatMessage, ChatMode, ChatRequest, Fragment, Result, Role};
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

// ============= Request Lifecycle =============

/// Lifecycle of one chat request.
///
/// `Init → Retrieving (grounded only) → Assembling → Dispatched →
/// {Streaming → Done | Streaming → Error | Completed | Failed}`.
/// Terminal phases end the request; nothing is retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Retrieving,
    Assembling,
    Dispatched,
    Streaming,
    Done,
    Error,
    Completed,
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::Done | Phase::Error | Phase::Completed | Phase::Failed
        )
    }
}

/// Phase tracker for one request, logged under a per-request id.
struct RequestTrace {
    id: Uuid,
    phase: Phase,
}

impl RequestTrace {
    fn new() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(request_id = %id, phase = ?Phase::Init, "chat request started");
        Self {
            id,
            phase: Phase::Init,
        }
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(!self.phase.is_terminal(), "advance past terminal phase");
        self.phase = next;
        tracing::debug!(request_id = %self.id, phase = ?next, "phase transition");
    }
}

// ============= Engine Types =============

/// Outcome of a successful upload.
#[derive(Debug, Clone, Copy)]
pub struct IngestStats {
    pub passage_count: usize,
    pub char_count: usize,
}

/// A completed dispatch: either the whole answer or a lazy fragment
/// sequence. A streamed failure arrives in-band as a terminal
/// [`Fragment::Error`], never as a panic past the consumer.
pub enum CompletionResult {
    Full(String),
    Stream(Pin<Box<dyn Stream<Item = Fragment> + Send>>),
}

impl std::fmt::Debug for CompletionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionResult::Full(text) => f.debug_tuple("Full").field(text).finish(),
            CompletionResult::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// The retrieval-and-completion pipeline for one document session.
///
/// Encoder and completion service are injected; the engine owns only the
/// orchestration. Cloning the `Arc`s keeps one session shared across all
/// concurrent requests.
pub struct ChatEngine {
    session: Arc<DocumentSession>,
    encoder: Arc<dyn Encoder>,
    completer: Arc<dyn CompletionClient>,
    policy: PromptPolicy,
    default_model: String,
    chunk_size: usize,
    top_k: usize,
}

impl ChatEngine {
    pub fn new(
        session: Arc<DocumentSession>,
        encoder: Arc<dyn Encoder>,
        completer: Arc<dyn CompletionClient>,
        policy: PromptPolicy,
        default_model: String,
        chunk_size: usize,
        top_k: usize,
    ) -> Self {
        Self {
            session,
            encoder,
            completer,
            policy,
            default_model,
            chunk_size,
            top_k,
        }
    }

    /// Chunk, embed, and install `text` as the session's document.
    ///
    /// The new index is built completely before it replaces the old one, so
    /// a failure at any step leaves the previous index untouched and
    /// concurrent readers never observe a partial state.
    pub async fn ingest(&self, text: &str) -> Result<IngestStats> {
        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "document is empty after extraction".to_string(),
            ));
        }

        let passages = TextChunker::new(self.chunk_size).chunk(text);
        let embeddings = self.encoder.encode_batch(&passages).await?;
        let index = SessionIndex::new(passages, embeddings)?;

        let stats = IngestStats {
            passage_count: index.len(),
            char_count: text.chars().count(),
        };
        self.session.replace(index);

        tracing::info!(
            passage_count = stats.passage_count,
            char_count = stats.char_count,
            "document ingested"
        );
        Ok(stats)
    }

    /// Run one chat turn: validate, retrieve (grounded mode), assemble, and
    /// dispatch to the completion service.
    pub async fn respond(&self, request: &ChatRequest) -> Result<CompletionResult> {
        let mut trace = RequestTrace::new();

        // Fail fast: reject malformed conversations before any retrieval or
        // embedding work.
        let question = match request.messages.last() {
            None => {
                trace.advance(Phase::Failed);
                return Err(AppError::InvalidInput("conversation is empty".to_string()));
            }
            Some(last) if last.role != Role::User => {
                trace.advance(Phase::Failed);
                return Err(AppError::InvalidInput(
                    "last message must be from user".to_string(),
                ));
            }
            Some(last) => last.content.clone(),
        };

        let retrieved = match request.mode {
            ChatMode::Grounded => {
                trace.advance(Phase::Retrieving);
                self.retrieve(&question, &mut trace).await?
            }
            ChatMode::General => Vec::new(),
        };

        trace.advance(Phase::Assembling);
        let messages = self.policy.assemble(&retrieved, &request.messages, request.mode);

        let model = request.model.as_deref().unwrap_or(&self.default_model);
        trace.advance(Phase::Dispatched);
        if request.streaming {
            self.dispatch_streaming(model, &messages, trace).await
        } else {
            self.dispatch_full(model, &messages, trace).await
        }
    }

    /// Model identifiers the completion service can run.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        self.completer.list_models().await
    }

    /// Top-k passages for the question, or no context when no document is
    /// loaded. "No context" is a valid state, not a failure.
    async fn retrieve(&self, question: &str, trace: &mut RequestTrace) -> Result<Vec<String>> {
        let index = match self.session.snapshot() {
            Some(index) if !index.is_empty() => index,
            _ => return Ok(Vec::new()),
        };

        let query = match self.encoder.encode(question).await {
            Ok(query) => query,
            Err(e) => {
                trace.advance(Phase::Failed);
                return Err(e);
            }
        };

        Ok(retriever::top_k(&index, &query, self.top_k))
    }

    async fn dispatch_full(
        &self,
        model: &str,
        messages: &[ChatMessage],
        mut trace: RequestTrace,
    ) -> Result<CompletionResult> {
        match self.completer.chat(model, messages).await {
            Ok(text) => {
                trace.advance(Phase::Completed);
                Ok(CompletionResult::Full(text))
            }
            Err(e) => {
                trace.advance(Phase::Failed);
                Err(e)
            }
        }
    }

    async fn dispatch_streaming(
        &self,
        model: &str,
        messages: &[ChatMessage],
        mut trace: RequestTrace,
    ) -> Result<CompletionResult> {
        let upstream = match self.completer.chat_stream(model, messages).await {
            Ok(upstream) => upstream,
            Err(e) => {
                trace.advance(Phase::Failed);
                return Err(e);
            }
        };

        trace.advance(Phase::Streaming);
        Ok(CompletionResult::Stream(fragment_stream(upstream, trace)))
    }
}

/// Adapt the provider stream into the in-band fragment protocol.
///
/// Fragments are yielded in arrival order without buffering. An upstream
/// error becomes one terminal [`Fragment::Error`] and the sequence ends;
/// content already delivered stays delivered. If the consumer drops the
/// returned stream, the generator (and with it the upstream connection) is
/// dropped too, so no further fragments are requested.
fn fragment_stream(
    mut upstream: FragmentStream,
    mut trace: RequestTrace,
) -> Pin<Box<dyn Stream<Item = Fragment> + Send>> {
    Box::pin(async_stream::stream! {
        while let Some(item) = upstream.next().await {
            match item {
                Ok(text) => yield Fragment::Response(text),
                Err(e) => {
                    trace.advance(Phase::Error);
                    yield Fragment::Error(e.to_string());
                    return;
                }
            }
        }
        trace.advance(Phase::Done);
    })
}
