use crate::rag::index::SessionIndex;

/// Default number of passages used to ground an answer.
pub const DEFAULT_TOP_K: usize = 3;

/// Cosine similarity between two vectors.
///
/// Mismatched dimensions and zero-norm vectors score 0.0 rather than
/// erroring; a degenerate embedding should rank last, not fail the request.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// The `min(k, passage_count)` passages most similar to the query vector,
/// in descending-similarity order. Ties go to the earlier passage in the
/// document. An empty index yields an empty result — "no context" is a
/// valid state downstream, not a failure.
pub fn top_k(index: &SessionIndex, query: &[f32], k: usize) -> Vec<String> {
    if index.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = index
        .embeddings()
        .iter()
        .enumerate()
        .map(|(i, embedding)| (i, cosine_similarity(query, embedding)))
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    scored
        .into_iter()
        .take(k.min(index.len()))
        .map(|(i, _)| index.passages()[i].clone())
        .collect()
}
