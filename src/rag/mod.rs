//! Retrieval pipeline for the uploaded document.
//!
//! Flow: raw extracted text → [`chunker`] passages → encoded by an
//! [`embeddings::Encoder`] → held in an [`index::SessionIndex`] → queried by
//! [`retriever::top_k`] on each grounded chat turn.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod retriever;

pub use chunker::TextChunker;
pub use embeddings::Encoder;
pub use index::{DocumentSession, SessionIndex};
