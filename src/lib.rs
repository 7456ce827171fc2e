//! # Docy - Single-Document RAG Chat Server
//!
//! A retrieval-augmented chat backend for one uploaded document: the
//! document is split into passages, embedded, and each grounded chat turn
//! retrieves the most relevant passages to anchor the model's answer,
//! optionally streamed fragment by fragment.
//!
//! ## Pipeline
//!
//! ```text
//! upload bytes → extract → chunk → embed → SessionIndex
//!                                              ⇅
//! chat turn → validate → retrieve top-k → assemble prompt → dispatch
//!                                        → full answer | fragment stream
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - Chunking, embedding capability, session index, retrieval
//! - [`chat`] - Prompt assembly and completion orchestration
//! - [`llm`] - Completion-service clients (Ollama)
//! - [`extract`] - Upload text extraction (PDF/DOCX/TXT)
//! - [`api`] - HTTP handlers and routes
//! - [`types`] - Wire types and error handling
//!
//! The embedding encoder and the completion service are injected
//! capabilities ([`rag::Encoder`], [`llm::CompletionClient`]); everything
//! else is orchestration around them. All state is in-memory and
//! process-lifetime: a restart starts with no document loaded.

/// HTTP API handlers and routes.
pub mod api;
/// Prompt assembly and completion orchestration.
pub mod chat;
/// Upload text extraction.
pub mod extract;
/// Completion-service clients.
pub mod llm;
/// Retrieval pipeline (chunking, embeddings, index, search).
pub mod rag;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

pub use chat::{ChatEngine, CompletionResult, PromptPolicy};
pub use llm::{CompletionClient, OllamaClient};
pub use rag::{DocumentSession, Encoder, SessionIndex, TextChunker};
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Environment-driven configuration.
    pub config: Arc<Config>,
    /// The retrieval-and-completion pipeline for the active session.
    pub engine: Arc<ChatEngine>,
}
