//! Resume-to-job-posting matcher: fetch a posting from an ATS URL, extract
//! the description and blend semantic and keyword overlap into a 0-100 score.

pub mod config;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
pub mod platform;
pub mod resume;
pub mod score;
pub mod semantic;
pub mod web;

pub use error::MatchError;
pub use pipeline::{MatchOutcome, Matcher, OutcomeKind};
pub use platform::Platform;
