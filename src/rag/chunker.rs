/// Greedy word-packing chunker.
///
/// Whitespace-delimited tokens are accumulated in order into the current
/// passage while `current_length + len(token) + 1 <= chunk_size`; otherwise
/// the passage is closed and a new one starts with that token. Deterministic,
/// order-preserving, and without overlap between consecutive passages — a
/// deliberate simplification, not an oversight.
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Split `text` into passages of at most `chunk_size` characters.
    ///
    /// A single token longer than `chunk_size` becomes its own oversized
    /// passage; tokens are never split. Empty or whitespace-only input
    /// yields no passages.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        // The budget counts characters, not bytes; multibyte text packs the
        // same number of characters per passage as ASCII.
        let mut current_chars = 0usize;

        for word in text.split_whitespace() {
            let word_chars = word.chars().count();
            if current.is_empty() {
                current.push_str(word);
                current_chars = word_chars;
            } else if current_chars + word_chars + 1 <= self.chunk_size {
                current.push(' ');
                current.push_str(word);
                current_chars += word_chars + 1;
            } else {
                chunks.push(std::mem::take(&mut current));
                current.push_str(word);
                current_chars = word_chars;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
