//! The match entry point shared by the CLI and HTTP front-ends.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::MatchError;
use crate::extract::JobFetcher;
use crate::normalize::normalize;
use crate::platform::{self, Platform};
use crate::score;
use crate::semantic::SemanticScorer;

/// Marks descriptions that carry an error instead of scraped text.
pub const ERROR_PREFIX: &str = "❌";

pub const IMPROVE_HINT: &str = "⚠️ Consider adding more relevant terms and phrasing from the job post.";
pub const GREAT_ALIGNMENT: &str = "🚀 Great alignment!";

/// Scores at or above this get the affirmation instead of the hint.
pub const GOOD_SCORE: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Matched,
    InvalidInput,
    ExtractionFailed,
}

/// What a front-end renders: description, score and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub kind: OutcomeKind,
    pub job_description: String,
    pub score: Option<u32>,
    pub summary: String,
    pub platform: Option<Platform>,
    pub matched_keywords: Vec<String>,
}

impl MatchOutcome {
    fn invalid_input() -> Self {
        Self {
            kind: OutcomeKind::InvalidInput,
            job_description: MatchError::Input.to_string(),
            score: None,
            summary: String::new(),
            platform: None,
            matched_keywords: Vec::new(),
        }
    }

    fn extraction_failed(err: &MatchError) -> Self {
        let job_description = match err {
            MatchError::NotFound => format!("{ERROR_PREFIX} No job description found."),
            other => format!("{ERROR_PREFIX} Error: {other}"),
        };
        Self {
            kind: OutcomeKind::ExtractionFailed,
            job_description,
            score: None,
            summary: String::new(),
            platform: None,
            matched_keywords: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind != OutcomeKind::Matched
    }
}

/// Fixed summary template: platform, score, keywords, then a hint or an
/// affirmation depending on the score.
pub fn summarize(platform: Platform, score: u32, matched: &[String]) -> String {
    let mut summary = format!(
        "✅ ATS: {platform}\n🎯 Score: {score}/100\n🔑 Matched Keywords: {}",
        matched.join(", ")
    );
    summary.push('\n');
    summary.push_str(if score < GOOD_SCORE {
        IMPROVE_HINT
    } else {
        GREAT_ALIGNMENT
    });
    summary
}

/// Owns the HTTP fetcher and a handle to the shared embedding model.
/// Cheap to clone.
#[derive(Clone)]
pub struct Matcher {
    fetcher: JobFetcher,
    scorer: SemanticScorer,
}

impl Matcher {
    pub fn new(fetcher: JobFetcher, scorer: SemanticScorer) -> Self {
        Self { fetcher, scorer }
    }

    pub fn model_name(&self) -> &str {
        self.scorer.model_name()
    }

    /// Score `resume_text` against the posting at `job_url`.
    ///
    /// Missing input and fetch/extraction failures come back as an `Ok`
    /// outcome with no score. Scoring failures are returned as `Err`.
    pub async fn match_resume(
        &self,
        resume_text: &str,
        job_url: &str,
    ) -> Result<MatchOutcome, MatchError> {
        let job_url = job_url.trim();
        if resume_text.trim().is_empty() || job_url.is_empty() {
            return Ok(MatchOutcome::invalid_input());
        }

        let job_description = match self.fetcher.extract(job_url).await {
            Ok(text) => text,
            Err(err @ (MatchError::Fetch(_) | MatchError::NotFound)) => {
                warn!(url = job_url, "Job description extraction failed: {err}");
                return Ok(MatchOutcome::extraction_failed(&err));
            }
            Err(err) => return Err(err),
        };

        let platform = platform::detect(job_url);
        let resume_clean = normalize(resume_text);
        let jd_clean = normalize(&job_description);

        let scorer = self.scorer.clone();
        let composed = tokio::task::spawn_blocking(move || {
            score::compose(&resume_clean, &jd_clean, platform, &scorer)
        })
        .await
        .map_err(|e| MatchError::Internal(anyhow::anyhow!("scoring task failed: {e}")))?
        .inspect_err(|e| error!("Scoring failed: {e}"))?;

        info!(
            %platform,
            score = composed.score,
            matched = composed.keywords.matched.len(),
            "Resume matched"
        );

        let summary = summarize(platform, composed.score, &composed.keywords.matched);
        Ok(MatchOutcome {
            kind: OutcomeKind::Matched,
            job_description,
            score: Some(composed.score),
            summary,
            platform: Some(platform),
            matched_keywords: composed.keywords.matched,
        })
    }
}
