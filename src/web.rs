//! HTTP front-end (axum). Translates requests to `Matcher::match_resume`.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::MatchError;
use crate::pipeline::{MatchOutcome, Matcher};
use crate::resume;

/// Shared app state: the matcher holding the loaded model.
pub type AppState = Arc<Matcher>;

/// Body for POST /match.
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_url: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/match", post(match_handler))
        .route("/match/upload", post(upload_handler))
        .with_state(state)
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            MatchError::Input => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            MatchError::Resume(_) => (StatusCode::BAD_REQUEST, "RESUME_UNREADABLE"),
            MatchError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED"),
            MatchError::NotFound => (StatusCode::UNPROCESSABLE_ENTITY, "NOT_FOUND"),
            MatchError::ModelInit(_) | MatchError::Embedding(_) | MatchError::Internal(_) => {
                tracing::error!("Match request failed: {self:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));
        (status, body).into_response()
    }
}

/// GET /health
pub async fn health(State(matcher): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "model": matcher.model_name() }))
}

/// POST /match with JSON `{ resume_text, job_url }`.
pub async fn match_handler(
    State(matcher): State<AppState>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, MatchError> {
    let outcome = matcher.match_resume(&req.resume_text, &req.job_url).await?;
    Ok(Json(outcome))
}

/// POST /match/upload with multipart fields `resume` (PDF or text file) and `job_url`.
pub async fn upload_handler(
    State(matcher): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchOutcome>, MatchError> {
    let mut resume_text = String::new();
    let mut job_url = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatchError::Resume(e.to_string()))?
    {
        match field.name() {
            Some("resume") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| MatchError::Resume(e.to_string()))?;
                if !data.is_empty() {
                    resume_text = tokio::task::spawn_blocking(move || resume::text_from_bytes(&data))
                        .await
                        .map_err(|e| {
                            MatchError::Internal(anyhow::anyhow!("resume extraction task failed: {e}"))
                        })??;
                }
            }
            Some("job_url") => {
                job_url = field
                    .text()
                    .await
                    .map_err(|e| MatchError::Resume(e.to_string()))?;
            }
            _ => {}
        }
    }

    let outcome = matcher.match_resume(&resume_text, &job_url).await?;
    Ok(Json(outcome))
}

/// GET / -> static upload form.
pub async fn index_page() -> Html<&'static str> {
    const HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Resume Matcher</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
    h1 { font-size: 1.5rem; }
    label { display: block; margin-top: 1rem; font-weight: 600; }
    input[type="url"] { width: 100%; padding: 0.5rem; font-size: 1rem; box-sizing: border-box; }
    button { margin-top: 1rem; padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
    pre { white-space: pre-wrap; background: #f6f6f6; padding: 0.75rem; }
    .score { font-size: 2rem; font-weight: 700; }
    .error { color: #b00; }
  </style>
</head>
<body>
  <h1>Resume Matcher</h1>
  <p>Match your resume to any job description from Greenhouse, Lever, Workday, and more.</p>
  <form id="form">
    <label for="resume">Upload Resume (PDF)</label>
    <input type="file" name="resume" id="resume" accept=".pdf">
    <label for="job_url">Paste Job URL</label>
    <input type="url" name="job_url" id="job_url">
    <button type="submit">Match</button>
  </form>
  <div id="results"></div>
  <script>
    const form = document.getElementById('form');
    const results = document.getElementById('results');
    const esc = (s) => s.replace(/[&<>]/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;' }[c]));
    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      results.innerHTML = '<p>Matching...</p>';
      try {
        const r = await fetch('/match/upload', { method: 'POST', body: new FormData(form) });
        const body = await r.json();
        if (!r.ok) {
          results.innerHTML = '<p class="error">' + esc(body.error.message) + '</p>';
        } else if (body.kind !== 'matched') {
          results.innerHTML = '<p class="error">' + esc(body.job_description) + '</p>';
        } else {
          results.innerHTML =
            '<p class="score">' + body.score + '/100</p>' +
            '<h2>Summary &amp; Keyword Match</h2><pre>' + esc(body.summary) + '</pre>' +
            '<h2>Extracted Job Description</h2><pre>' + esc(body.job_description) + '</pre>';
        }
      } catch (err) {
        results.innerHTML = '<p class="error">Error: ' + esc(String(err)) + '</p>';
      }
    });
  </script>
</body>
</html>
"#;
    Html(HTML)
}
