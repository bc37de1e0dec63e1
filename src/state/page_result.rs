/// Per-page crawl results
///
/// A worker creates one `PageResult` for every job it claims, whatever the
/// outcome, and hands it to the result sink.
use crate::FetchError;
use std::fmt;

/// Outcome of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was fetched and parsed; holds its title (possibly empty)
    Title(String),

    /// The fetch failed
    Failed(FetchError),
}

/// Result of fetching one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// The URL that was fetched
    pub url: String,

    /// Title or error
    pub outcome: PageOutcome,
}

impl PageResult {
    /// Creates a successful result
    pub fn success(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: PageOutcome::Title(title.into()),
        }
    }

    /// Creates a failed result
    pub fn failure(url: impl Into<String>, error: FetchError) -> Self {
        Self {
            url: url.into(),
            outcome: PageOutcome::Failed(error),
        }
    }

    /// Returns true if the page was fetched successfully
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PageOutcome::Title(_))
    }

    /// Returns the page title, if the fetch succeeded
    pub fn title(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Title(title) => Some(title),
            PageOutcome::Failed(_) => None,
        }
    }

    /// Returns the error, if the fetch failed
    pub fn error(&self) -> Option<&FetchError> {
        match &self.outcome {
            PageOutcome::Title(_) => None,
            PageOutcome::Failed(error) => Some(error),
        }
    }
}

impl fmt::Display for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            PageOutcome::Title(title) => write!(f, "{} - {}", self.url, title),
            PageOutcome::Failed(error) => write!(f, "ERROR {}: {}", self.url, error.cause()),
        }
    }
}
