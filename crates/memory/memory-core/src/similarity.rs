//! Cosine similarity and nearest-neighbor ranking shared by all store backends.

use crate::types::{MemoryRecord, ScoredRecord};
use std::cmp::Ordering;

/// Cosine similarity of two vectors. Returns 0.0 when either vector has zero norm
/// or the lengths differ.
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

/// Cosine distance, `1 - cosine_similarity`, in `[0, 2]`.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

/// Scores every record against `query` and keeps the `k` closest,
/// ordered by ascending distance with ties broken by id.
pub fn rank_by_distance<I>(query: &[f32], records: I, k: usize) -> Vec<ScoredRecord>
where
    I: IntoIterator<Item = MemoryRecord>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredRecord> = records
        .into_iter()
        .map(|record| {
            let distance = cosine_distance(query, &record.embedding);
            ScoredRecord { record, distance }
        })
        .collect();

    scored.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.record.id.cmp(&b.record.id))
    });
    scored.truncate(k);
    scored
}
