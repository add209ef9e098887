//! Text embeddings and vector similarity.
//!
//! The default embedder is a deterministic hashed bag-of-features model:
//! NFKC-normalized lowercase tokens plus character trigrams, each hashed
//! into a fixed-width vector which is then L2-normalized. It needs no
//! model files and always maps equal text to equal vectors, which keeps
//! ranking reproducible. Callers with a real embedding model plug it in
//! through the [`Embedder`] trait.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use unicode_normalization::UnicodeNormalization;

/// Maps text to a fixed-dimension vector. Implementations must be pure:
/// the same input always yields the same vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn dimension(&self) -> usize;
}

/// Deterministic hashed bag-of-tokens embedder.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dimension: 256 }
    }
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    /// NFKC-fold and lowercase, then split on non-alphanumerics.
    fn tokenize(text: &str) -> Vec<String> {
        let folded: String = text.nfkc().collect::<String>().to_lowercase();
        folded
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn bucket(&self, feature: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in Self::tokenize(text) {
            vector[self.bucket(&token)] += 1.0;

            // Character trigrams give partial credit to near-matches
            // like "analyze" vs "analysis".
            let chars: Vec<char> = token.chars().collect();
            if chars.len() >= 3 {
                for window in chars.windows(3) {
                    let gram: String = window.iter().collect();
                    vector[self.bucket(&gram)] += 0.5;
                }
            }
        }

        l2_normalize(&mut vector);
        vector
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Cosine similarity between two vectors. Returns 0.0 for mismatched
/// lengths or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Clip a raw cosine value onto [0, 1] for reporting.
pub fn clip_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
