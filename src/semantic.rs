//! Semantic similarity via sentence embeddings.

use std::sync::Arc;

use tracing::debug;

use crate::error::MatchError;

/// Sentence encoder producing fixed-dimension dense vectors.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests.
pub trait Embedder: Send + Sync {
    fn name(&self) -> &str;

    /// One vector per input, in input order.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError>;
}

/// Cosine similarity in [-1, 1]. Zero-length or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Truncate to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Shared handle to the process-wide embedder plus the input length cap.
#[derive(Clone)]
pub struct SemanticScorer {
    embedder: Arc<dyn Embedder>,
    max_chars: usize,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn Embedder>, max_chars: usize) -> Self {
        Self {
            embedder,
            max_chars,
        }
    }

    pub fn model_name(&self) -> &str {
        self.embedder.name()
    }

    /// Embed both texts (truncated) and return their cosine similarity.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64, MatchError> {
        let a = truncate_chars(a, self.max_chars);
        let b = truncate_chars(b, self.max_chars);
        let vectors = self.embedder.embed(&[a, b])?;
        let [va, vb] = vectors.as_slice() else {
            return Err(MatchError::Embedding(format!(
                "expected 2 embeddings, got {}",
                vectors.len()
            )));
        };
        if va.is_empty() || va.len() != vb.len() {
            return Err(MatchError::Embedding(format!(
                "embedding dimensions differ or are empty: {} vs {}",
                va.len(),
                vb.len()
            )));
        }
        let sim = cosine_similarity(va, vb);
        if !sim.is_finite() {
            return Err(MatchError::Embedding(
                "embedding contains non-finite values".to_string(),
            ));
        }
        debug!(model = self.embedder.name(), similarity = sim, "semantic score");
        Ok(sim)
    }
}

#[cfg(feature = "bert")]
pub use bert::BertEmbedder;

#[cfg(feature = "bert")]
mod bert {
    use std::sync::Mutex;

    use rust_bert::pipelines::sentence_embeddings::{
        SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
    };
    use tracing::info;

    use super::Embedder;
    use crate::error::MatchError;

    /// all-MiniLM-L6-v2 through rust-bert. Downloads weights on first use.
    pub struct BertEmbedder {
        model: Mutex<SentenceEmbeddingsModel>,
    }

    impl BertEmbedder {
        /// Blocking. Call before entering the async runtime.
        pub fn load() -> Result<Self, MatchError> {
            info!("Loading sentence embedding model all-MiniLM-L6-v2");
            let model = SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL6V2)
                .create_model()
                .map_err(|e| MatchError::ModelInit(e.to_string()))?;
            Ok(Self {
                model: Mutex::new(model),
            })
        }
    }

    impl Embedder for BertEmbedder {
        fn name(&self) -> &str {
            "all-MiniLM-L6-v2"
        }

        fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
            let model = self
                .model
                .lock()
                .map_err(|_| MatchError::Embedding("model lock poisoned".to_string()))?;
            model
                .encode(texts)
                .map_err(|e| MatchError::Embedding(e.to_string()))
        }
    }
}
