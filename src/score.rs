//! Blend semantic and keyword scores with platform-dependent weights.

use tracing::debug;

use crate::error::MatchError;
use crate::keywords::{self, KeywordOverlap};
use crate::platform::Platform;
use crate::semantic::SemanticScorer;

/// (semantic, keyword) weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub semantic: f64,
    pub keyword: f64,
}

pub const DEFAULT_WEIGHTS: Weights = Weights {
    semantic: 0.6,
    keyword: 0.4,
};

/// Platform groups checked in order; the first group containing the platform
/// decides. Anything unlisted falls back to `DEFAULT_WEIGHTS`.
pub const WEIGHT_GROUPS: &[(&[Platform], Weights)] = &[
    (
        &[
            Platform::Workday,
            Platform::Taleo,
            Platform::SuccessFactors,
            Platform::Adp,
        ],
        Weights {
            semantic: 0.5,
            keyword: 0.5,
        },
    ),
    (
        &[Platform::Lever, Platform::JazzHr, Platform::SmartRecruiters],
        Weights {
            semantic: 0.7,
            keyword: 0.3,
        },
    ),
];

pub fn weights_for(platform: Platform) -> Weights {
    WEIGHT_GROUPS
        .iter()
        .find(|(members, _)| members.contains(&platform))
        .map(|&(_, weights)| weights)
        .unwrap_or(DEFAULT_WEIGHTS)
}

/// `round((semantic * w_sem + keyword * w_kw) * 100)`, ties to even,
/// clamped to [0, 100]. Non-finite inputs are an error, never a score.
pub fn blend(semantic: f64, keyword_ratio: f64, weights: Weights) -> Result<u32, MatchError> {
    let raw = (semantic * weights.semantic + keyword_ratio * weights.keyword) * 100.0;
    if !raw.is_finite() {
        return Err(MatchError::Embedding(format!(
            "non-finite score (semantic {semantic}, keyword {keyword_ratio})"
        )));
    }
    Ok(raw.round_ties_even().clamp(0.0, 100.0) as u32)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composed {
    pub score: u32,
    pub semantic: f64,
    pub keywords: KeywordOverlap,
    pub weights: Weights,
}

/// Score cleaned resume text against cleaned job text.
pub fn compose(
    resume_clean: &str,
    jd_clean: &str,
    platform: Platform,
    scorer: &SemanticScorer,
) -> Result<Composed, MatchError> {
    let weights = weights_for(platform);
    let semantic = scorer.similarity(resume_clean, jd_clean)?;
    let keywords = keywords::keyword_overlap(resume_clean, jd_clean);
    let score = blend(semantic, keywords.ratio, weights)?;
    debug!(
        %platform,
        semantic,
        keyword_ratio = keywords.ratio,
        w_sem = weights.semantic,
        w_kw = weights.keyword,
        score,
        "composed score"
    );
    Ok(Composed {
        score,
        semantic,
        keywords,
        weights,
    })
}
