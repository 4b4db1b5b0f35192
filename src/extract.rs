//! Fetch a job posting and pull out the description text.

use std::time::Duration;

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use crate::error::MatchError;
use crate::platform::{self, Platform};

/// Blocks shorter than this (in characters) are never taken as the description.
pub const MIN_BLOCK_CHARS: usize = 500;

/// Block-level containers scanned by the generic fallback.
const BLOCK_TAGS: &str = "div, section";

/// Per-platform (tag, class-or-id) of the description container.
/// Greenhouse and unknown hosts go straight to the generic fallback.
pub const SELECTORS: &[(Platform, &str, &str)] = &[
    (Platform::Workday, "div", "jobPostingDescription"),
    (Platform::Icims, "div", "iCIMS_JobContent"),
    (Platform::Taleo, "div", "requisitionDescriptionInterface"),
    (Platform::Lever, "div", "content"),
    (Platform::SmartRecruiters, "div", "job-sections"),
    (Platform::Jobvite, "div", "jv-job-detail-description"),
    (Platform::Adp, "div", "job-description"),
    (Platform::SuccessFactors, "div", "jobdescription"),
    (Platform::BrassRing, "div", "jobdescription"),
    (Platform::JazzHr, "div", "job-description"),
    (Platform::BreezyHr, "div", "description"),
    (Platform::JobDiva, "div", "jobdescription"),
    (Platform::Bullhorn, "div", "job-description"),
    (Platform::BambooHr, "div", "BambooRich"),
];

/// HTTP client wrapper for job pages. One GET per call, no retries.
#[derive(Clone)]
pub struct JobFetcher {
    client: Client,
}

impl JobFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, MatchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| MatchError::Internal(anyhow::anyhow!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET `url` and return the raw body. Timeouts, transport errors and
    /// non-2xx statuses are `MatchError::Fetch`.
    pub async fn fetch(&self, url: &str) -> Result<String, MatchError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| MatchError::Fetch(format!("invalid URL '{url}': {e}")))?;
        info!("Fetching job post: {}", parsed);

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MatchError::Fetch(format!("HTTP error: {status}")));
        }
        Ok(response.text().await?)
    }

    /// Fetch and extract the job description for `url`.
    pub async fn extract(&self, url: &str) -> Result<String, MatchError> {
        let html = self.fetch(url).await?;
        extract_from_html(&html, platform::detect(url))
    }
}

/// Text of an element with text nodes newline-joined and outer whitespace trimmed.
fn block_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("\n").trim().to_string()
}

fn find_platform_block(document: &Html, platform: Platform) -> Option<String> {
    let &(_, tag, name) = SELECTORS.iter().find(|(p, _, _)| *p == platform)?;
    for selector_str in [format!("{tag}.{name}"), format!("{tag}#{name}")] {
        let Ok(selector) = Selector::parse(&selector_str) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = block_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Longest div/section whose plain text exceeds `MIN_BLOCK_CHARS`.
/// Earlier blocks win ties.
fn find_longest_block(document: &Html) -> Option<String> {
    let selector = Selector::parse(BLOCK_TAGS).ok()?;
    let mut best: Option<(usize, String)> = None;
    for element in document.select(&selector) {
        let plain_len: usize = element.text().map(|t| t.chars().count()).sum();
        if plain_len <= MIN_BLOCK_CHARS {
            continue;
        }
        let text = block_text(element);
        let len = text.chars().count();
        if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
            best = Some((len, text));
        }
    }
    best.map(|(_, text)| text)
}

/// Pull the description out of a parsed page: platform selector first, then
/// the generic longest-block scan.
pub fn extract_from_html(html: &str, platform: Platform) -> Result<String, MatchError> {
    let document = Html::parse_document(html);

    if let Some(text) = find_platform_block(&document, platform) {
        info!(%platform, chars = text.chars().count(), "Extracted job description via platform selector");
        return Ok(text);
    }

    if SELECTORS.iter().any(|(p, _, _)| *p == platform) {
        warn!(%platform, "Platform selector found nothing, falling back to generic extraction");
    }

    let text = find_longest_block(&document).ok_or(MatchError::NotFound)?;
    info!(chars = text.chars().count(), "Extracted job description via longest block");
    Ok(text)
}
