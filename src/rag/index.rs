use crate::types::{AppError, Result};
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// The (passage sequence, embedding matrix) pairing for the loaded document.
///
/// Immutable once built. The length invariant is enforced at construction:
/// an index can never hold mismatched passage and embedding counts.
pub struct SessionIndex {
    passages: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl SessionIndex {
    pub fn new(passages: Vec<String>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if passages.len() != embeddings.len() {
            return Err(AppError::Internal(format!(
                "passage/embedding count mismatch: {} passages, {} embeddings",
                passages.len(),
                embeddings.len()
            )));
        }
        Ok(Self {
            passages,
            embeddings,
        })
    }

    pub fn passages(&self) -> &[String] {
        &self.passages
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

/// Holder for the active document's index.
///
/// Empty at startup; replaced wholesale on each successful upload. Chat
/// requests take lock-free snapshots, so any number of reads may run
/// concurrently with a replacement. A failed upload never touches the
/// stored index because the new one is built fully before [`replace`] is
/// called.
///
/// Concurrent uploads are not serialized: the last build to complete wins.
///
/// [`replace`]: DocumentSession::replace
#[derive(Default)]
pub struct DocumentSession {
    index: ArcSwapOption<SessionIndex>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically install a freshly built index, discarding the previous one.
    pub fn replace(&self, index: SessionIndex) {
        self.index.store(Some(Arc::new(index)));
    }

    /// Read-only snapshot of the current index, if a document is loaded.
    pub fn snapshot(&self) -> Option<Arc<SessionIndex>> {
        self.index.load_full()
    }
}
