//! ats-resume-matcher: score a resume against a job posting, from the CLI or over HTTP.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats_resume_matcher::config::Config;
use ats_resume_matcher::extract::JobFetcher;
use ats_resume_matcher::semantic::{BertEmbedder, SemanticScorer};
use ats_resume_matcher::{resume, web, Matcher};

#[derive(Parser)]
#[command(name = "ats-resume-matcher")]
#[command(about = "Match a resume against a job posting from an ATS URL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one resume against one job URL and print the result.
    Match {
        /// Resume file (PDF or plain text).
        #[arg(long, short)]
        resume: PathBuf,

        /// Job posting URL.
        #[arg(long, short)]
        url: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP API and upload form.
    Serve {
        /// Port to listen on (overrides MATCHER_PORT).
        #[arg(long, short)]
        port: Option<u16>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // rust-bert downloads and loads weights with blocking I/O, so this has to
    // happen before the runtime starts. No model, no service.
    let embedder = BertEmbedder::load().context("cannot start without the embedding model")?;
    let scorer = SemanticScorer::new(Arc::new(embedder), config.max_embed_chars);
    let fetcher = JobFetcher::new(config.fetch_timeout, &config.user_agent)?;
    let matcher = Matcher::new(fetcher, scorer);
    info!("Embedding model {} ready", matcher.model_name());

    let rt = tokio::runtime::Runtime::new()?;
    match cli.command {
        Command::Match { resume, url, json } => rt.block_on(run_match(&matcher, &resume, &url, json)),
        Command::Serve { port } => rt.block_on(run_serve(matcher, port.unwrap_or(config.port))),
    }
}

async fn run_match(matcher: &Matcher, resume_path: &Path, url: &str, json: bool) -> Result<()> {
    let resume_text = resume::text_from_path(resume_path)?;
    let outcome = matcher.match_resume(&resume_text, url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if outcome.is_error() {
        eprintln!("{}", outcome.job_description);
    } else {
        println!("Extracted Job Description:\n{}\n", outcome.job_description);
        if let Some(score) = outcome.score {
            println!("Match Score: {score}\n");
        }
        println!("{}", outcome.summary);
    }
    Ok(())
}

async fn run_serve(matcher: Matcher, port: u16) -> Result<()> {
    let app = web::router(Arc::new(matcher));

    let addr = format!("0.0.0.0:{}", port);
    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
