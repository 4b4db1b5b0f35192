use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;

use ats_resume_matcher::extract::JobFetcher;
use ats_resume_matcher::pipeline::{IMPROVE_HINT, GREAT_ALIGNMENT};
use ats_resume_matcher::semantic::{Embedder, SemanticScorer};
use ats_resume_matcher::{web, MatchError, MatchOutcome, Matcher, OutcomeKind, Platform};

const RESUME: &str = "Experienced Python developer with AWS and Docker";
const JOB: &str = "Seeking Python developer skilled in AWS, Docker, and Kubernetes.";

/// First text -> [1, 0], second -> [0.8, 0.6]; cosine 0.8.
struct FixedEmbedder;

impl Embedder for FixedEmbedder {
    fn name(&self) -> &str {
        "fixed"
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, _)| if i == 0 { vec![1.0, 0.0] } else { vec![0.8, 0.6] })
            .collect())
    }
}

struct BrokenEmbedder;

impl Embedder for BrokenEmbedder {
    fn name(&self) -> &str {
        "broken"
    }

    fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Err(MatchError::Embedding("tensor shape mismatch".to_string()))
    }
}

/// Vectors of different dimensions, as a misconfigured model would return.
struct RaggedEmbedder;

impl Embedder for RaggedEmbedder {
    fn name(&self) -> &str {
        "ragged"
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, _)| if i == 0 { vec![1.0, 0.0, 0.0] } else { vec![1.0, 0.0] })
            .collect())
    }
}

fn matcher_with(embedder: Arc<dyn Embedder>, timeout: Duration) -> Matcher {
    let fetcher = JobFetcher::new(timeout, "ats-resume-matcher-tests").unwrap();
    Matcher::new(fetcher, SemanticScorer::new(embedder, 4096))
}

fn matcher() -> Matcher {
    matcher_with(Arc::new(FixedEmbedder), Duration::from_secs(5))
}

/// Job text padded with stop words so the block clears the 500-char floor
/// without changing the keyword vocabulary.
fn job_page() -> String {
    let padding = " and the of with".repeat(40);
    format!(
        "<html><head><title>Job</title></head><body>\
         <nav>Careers</nav><div class=\"posting\">{JOB}{padding}</div></body></html>"
    )
}

fn workday_page() -> String {
    "<html><body><div class=\"jobPostingDescription\"><p>Rust engineer</p><p>Tokio and Axum</p></div></body></html>"
        .to_string()
}

/// Serve canned job pages on an ephemeral local port.
async fn spawn_job_site() -> String {
    let app = Router::new()
        .route("/job", get(|| async { axum::response::Html(job_page()) }))
        .route("/workday", get(|| async { axum::response::Html(workday_page()) }))
        .route(
            "/empty",
            get(|| async { axum::response::Html("<html><body><div>Apply</div></body></html>") }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                axum::response::Html(job_page())
            }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn end_to_end_unknown_platform() {
    let base = spawn_job_site().await;
    let outcome = matcher()
        .match_resume(RESUME, &format!("{base}/job"))
        .await
        .unwrap();

    assert_eq!(outcome.kind, OutcomeKind::Matched);
    assert_eq!(outcome.platform, Some(Platform::Unknown));
    assert!(outcome.job_description.starts_with(JOB));
    for kw in ["aws", "developer", "docker", "python"] {
        assert!(outcome.matched_keywords.contains(&kw.to_string()), "missing {kw}");
    }
    assert_eq!(outcome.matched_keywords, vec!["aws", "developer", "docker", "python"]);
    // semantic 0.8 * 0.6 + keyword 4/8 * 0.4 = 0.68
    assert_eq!(outcome.score, Some(68));
    assert!(outcome.summary.contains("Unknown"));
    assert!(outcome.summary.contains("68/100"));
    assert!(outcome.summary.ends_with(IMPROVE_HINT));
}

#[tokio::test]
async fn same_inputs_give_same_result() {
    let base = spawn_job_site().await;
    let url = format!("{base}/job");
    let m = matcher();
    let first = m.match_resume(RESUME, &url).await.unwrap();
    let second = m.match_resume(RESUME, &url).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn platform_in_url_selects_selector_and_weights() {
    let base = spawn_job_site().await;
    // Substring detection: a Workday host name anywhere in the URL counts.
    let url = format!("{base}/workday?ref=acme.myworkdayjobs.com");
    let outcome = matcher()
        .match_resume("Rust engineer who loves Tokio", &url)
        .await
        .unwrap();

    assert_eq!(outcome.platform, Some(Platform::Workday));
    assert_eq!(outcome.job_description, "Rust engineer\nTokio and Axum");
    // vocabulary: axum, engineer, loves, rust, tokio -> 3 matched of 5
    assert_eq!(outcome.matched_keywords, vec!["engineer", "rust", "tokio"]);
    // 0.8 * 0.5 + 0.6 * 0.5 = 0.7
    assert_eq!(outcome.score, Some(70));
    assert!(outcome.summary.contains("ATS: Workday"));
}

#[tokio::test]
async fn lever_weights_apply() {
    let base = spawn_job_site().await;
    let url = format!("{base}/job?utm=jobs.lever.co");
    let outcome = matcher().match_resume(RESUME, &url).await.unwrap();
    assert_eq!(outcome.platform, Some(Platform::Lever));
    // 0.8 * 0.7 + 0.5 * 0.3 = 0.71
    assert_eq!(outcome.score, Some(71));
}

#[tokio::test]
async fn http_500_is_a_fetch_error_without_score() {
    let base = spawn_job_site().await;
    let outcome = matcher()
        .match_resume(RESUME, &format!("{base}/broken"))
        .await
        .unwrap();
    assert_eq!(outcome.kind, OutcomeKind::ExtractionFailed);
    assert!(outcome.job_description.starts_with("❌ Error:"));
    assert!(outcome.job_description.contains("500"));
    assert_eq!(outcome.score, None);
    assert!(outcome.summary.is_empty());
}

#[tokio::test]
async fn timeout_is_a_fetch_error() {
    let base = spawn_job_site().await;
    let m = matcher_with(Arc::new(FixedEmbedder), Duration::from_millis(200));
    let outcome = m.match_resume(RESUME, &format!("{base}/slow")).await.unwrap();
    assert_eq!(outcome.kind, OutcomeKind::ExtractionFailed);
    assert!(outcome.job_description.starts_with("❌ Error:"));
    assert_eq!(outcome.score, None);
}

#[tokio::test]
async fn page_without_description_is_not_found() {
    let base = spawn_job_site().await;
    let outcome = matcher()
        .match_resume(RESUME, &format!("{base}/empty"))
        .await
        .unwrap();
    assert_eq!(outcome.kind, OutcomeKind::ExtractionFailed);
    assert_eq!(outcome.job_description, "❌ No job description found.");
    assert_eq!(outcome.score, None);
}

#[tokio::test]
async fn missing_inputs_return_instructions() {
    let m = matcher();
    for (resume, url) in [("", "https://jobs.lever.co/x"), (RESUME, "   "), ("  ", "")] {
        let outcome = m.match_resume(resume, url).await.unwrap();
        assert_eq!(outcome.kind, OutcomeKind::InvalidInput);
        assert_eq!(outcome.job_description, "Please upload a PDF and paste a job URL.");
        assert_eq!(outcome.score, None);
        assert!(outcome.summary.is_empty());
    }
}

#[tokio::test]
async fn embedding_failure_propagates() {
    let base = spawn_job_site().await;
    let m = matcher_with(Arc::new(BrokenEmbedder), Duration::from_secs(5));
    let err = m
        .match_resume(RESUME, &format!("{base}/job"))
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::Embedding(_)));
}

#[tokio::test]
async fn degenerate_embeddings_never_produce_a_score() {
    let base = spawn_job_site().await;
    let m = matcher_with(Arc::new(RaggedEmbedder), Duration::from_secs(5));
    let err = m
        .match_resume(RESUME, &format!("{base}/job"))
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::Embedding(_)));
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn http_match_endpoint_returns_outcome() {
    let base = spawn_job_site().await;
    let app = web::router(Arc::new(matcher()));
    let payload = serde_json::json!({ "resume_text": RESUME, "job_url": format!("{base}/job") });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/match")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let outcome: MatchOutcome = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(outcome.score, Some(68));
    assert_eq!(outcome.kind, OutcomeKind::Matched);
}

#[tokio::test]
async fn http_upload_endpoint_reads_multipart() {
    let base = spawn_job_site().await;
    let app = web::router(Arc::new(matcher()));
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"resume\"; filename=\"resume.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {RESUME}\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"job_url\"\r\n\r\n\
         {base}/job\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/match/upload")
                .header("content-type", format!("multipart/form-data; boundary={boundary}"))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["kind"], "matched");
    assert_eq!(json["score"], 68);
    assert_eq!(json["platform"], "Unknown");
}

#[tokio::test]
async fn http_internal_error_is_500() {
    let base = spawn_job_site().await;
    let app = web::router(Arc::new(matcher_with(
        Arc::new(BrokenEmbedder),
        Duration::from_secs(5),
    )));
    let payload = serde_json::json!({ "resume_text": RESUME, "job_url": format!("{base}/job") });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/match")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn health_reports_model() {
    let app = web::router(Arc::new(matcher()));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "fixed");
}

#[test]
fn summary_affirms_high_scores() {
    let summary = ats_resume_matcher::pipeline::summarize(Platform::Greenhouse, 91, &[]);
    assert!(summary.ends_with(GREAT_ALIGNMENT));
}
