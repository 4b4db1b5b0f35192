//! Error taxonomy for the matching pipeline.

use thiserror::Error;

/// Everything that can stop a match request.
///
/// `Input`, `Fetch` and `NotFound` are user-facing and get folded into a
/// `MatchOutcome` by the pipeline. The rest are propagated to the caller.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Please upload a PDF and paste a job URL.")]
    Input,

    #[error("{0}")]
    Fetch(String),

    #[error("No job description found.")]
    NotFound,

    #[error("Embedding model failed to load: {0}")]
    ModelInit(String),

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Could not read resume: {0}")]
    Resume(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for MatchError {
    fn from(err: reqwest::Error) -> Self {
        MatchError::Fetch(err.to_string())
    }
}
