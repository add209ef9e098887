//! Persona-driven relevance: embeddings, ranking, synthesis.

mod embedding;
mod ranker;
mod synthesize;

pub use embedding::{clip_unit, cosine_similarity, Embedder, HashEmbedder};
pub use ranker::{rank_sections, LevelMultipliers};
pub use synthesize::{synthesize, RelevanceBand, DEFAULT_TOP_N};
