use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest error text shown next to a failed link.
pub const ERROR_DISPLAY_LEN: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkOutcome {
    /// HTTP 200 and both style markers present
    Styled,
    /// HTTP 200 but at least one marker missing
    Unstyled,
    /// Non-200 status or transport error
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResult {
    /// The href exactly as it appeared in the page
    pub link: String,
    pub url: String,
    pub status_code: Option<u16>,
    pub has_stylesheet: bool,
    pub has_font: bool,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl LinkResult {
    pub fn new(link: String, url: String) -> Self {
        Self {
            link,
            url,
            status_code: None,
            has_stylesheet: false,
            has_font: false,
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(link: String, url: String, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(link, url)
        }
    }

    pub fn outcome(&self) -> LinkOutcome {
        if self.error.is_some() {
            return LinkOutcome::Failed;
        }
        match self.status_code {
            Some(200) if self.has_stylesheet && self.has_font => LinkOutcome::Styled,
            Some(200) => LinkOutcome::Unstyled,
            _ => LinkOutcome::Failed,
        }
    }

    /// Last path segment of the link, used as its display name
    pub fn file_name(&self) -> &str {
        self.link.rsplit('/').next().unwrap_or(&self.link)
    }

    /// Error text cut down for a single report line
    pub fn short_error(&self) -> Option<String> {
        self.error.as_deref().map(truncate_error)
    }
}

pub fn truncate_error(error: &str) -> String {
    let cut: String = error.chars().take(ERROR_DISPLAY_LEN).collect();
    format!("{}...", cut)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    AllStyled,
    SomeUnstyled,
    SomeBroken,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::AllStyled => "ALL AWARDS PAGE LINKS ARE WORKING AND STYLED!",
            Verdict::SomeUnstyled => "All links work but some lack styling",
            Verdict::SomeBroken => "Some links are broken",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub success: usize,
    pub styled: usize,
    pub verdict: Verdict,
}

impl ValidationSummary {
    pub fn from_results(results: &[LinkResult]) -> Self {
        let total = results.len();
        let success = results
            .iter()
            .filter(|r| r.outcome() != LinkOutcome::Failed)
            .count();
        let styled = results
            .iter()
            .filter(|r| r.outcome() == LinkOutcome::Styled)
            .count();

        let verdict = if success == total && styled == total {
            Verdict::AllStyled
        } else if success == total {
            Verdict::SomeUnstyled
        } else {
            Verdict::SomeBroken
        };

        Self {
            total,
            success,
            styled,
            verdict,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub page_url: String,
    pub generated_at: DateTime<Utc>,
    pub links: Vec<LinkResult>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn new(page_url: String, links: Vec<LinkResult>) -> Self {
        let summary = ValidationSummary::from_results(&links);
        Self {
            page_url,
            generated_at: Utc::now(),
            links,
            summary,
        }
    }
}
