//! Completion-service clients.
//!
//! The orchestrator talks to an opaque chat-completion service through the
//! [`CompletionClient`] trait; [`ollama::OllamaClient`] is the shipped
//! implementation and also provides the [`crate::rag::Encoder`] capability
//! via the Ollama embeddings endpoint.

/// Completion client trait and streaming types.
pub mod client;
/// Ollama-backed completion client and encoder.
pub mod ollama;

pub use client::{CompletionClient, FragmentStream};
pub use ollama::OllamaClient;
