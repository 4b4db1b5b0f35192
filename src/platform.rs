//! ATS platform detection from a job URL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant tracking system hosting a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Greenhouse,
    Workday,
    #[serde(rename = "iCIMS")]
    Icims,
    Taleo,
    Lever,
    SmartRecruiters,
    Jobvite,
    #[serde(rename = "ADP")]
    Adp,
    SuccessFactors,
    BrassRing,
    #[serde(rename = "JazzHR")]
    JazzHr,
    #[serde(rename = "BreezyHR")]
    BreezyHr,
    JobDiva,
    Bullhorn,
    #[serde(rename = "BambooHR")]
    BambooHr,
    Unknown,
}

impl Platform {
    /// Vendor name as shown to users.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Greenhouse => "Greenhouse",
            Platform::Workday => "Workday",
            Platform::Icims => "iCIMS",
            Platform::Taleo => "Taleo",
            Platform::Lever => "Lever",
            Platform::SmartRecruiters => "SmartRecruiters",
            Platform::Jobvite => "Jobvite",
            Platform::Adp => "ADP",
            Platform::SuccessFactors => "SuccessFactors",
            Platform::BrassRing => "BrassRing",
            Platform::JazzHr => "JazzHR",
            Platform::BreezyHr => "BreezyHR",
            Platform::JobDiva => "JobDiva",
            Platform::Bullhorn => "Bullhorn",
            Platform::BambooHr => "BambooHR",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Domain substring -> platform. Scanned in order; first hit wins.
pub const ATS_DOMAINS: &[(&str, Platform)] = &[
    ("greenhouse.io", Platform::Greenhouse),
    ("myworkdayjobs.com", Platform::Workday),
    ("icims.com", Platform::Icims),
    ("taleo.net", Platform::Taleo),
    ("lever.co", Platform::Lever),
    ("smartrecruiters.com", Platform::SmartRecruiters),
    ("jobvite.com", Platform::Jobvite),
    ("adp.com", Platform::Adp),
    ("successfactors.com", Platform::SuccessFactors),
    ("brassring.com", Platform::BrassRing),
    ("jazzhr.com", Platform::JazzHr),
    ("breezy.hr", Platform::BreezyHr),
    ("jobdiva.com", Platform::JobDiva),
    ("bullhorn.com", Platform::Bullhorn),
    ("bamboohr.com", Platform::BambooHr),
];

/// Classify a job URL by plain substring containment (no URL parsing).
pub fn detect(url: &str) -> Platform {
    ATS_DOMAINS
        .iter()
        .find(|(domain, _)| url.contains(*domain))
        .map(|&(_, platform)| platform)
        .unwrap_or(Platform::Unknown)
}
