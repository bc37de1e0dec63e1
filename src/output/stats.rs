//! Result aggregation for a crawl run
//!
//! This module drains the scheduler's result stream and keeps the counts and
//! per-page outcomes that the final report is printed from.

use crate::output::Progress;
use crate::state::PageResult;
use tokio::sync::mpsc;

/// Aggregated results of a crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Per-page outcomes in arrival order (not deterministic across runs)
    pub results: Vec<PageResult>,

    /// Number of pages fetched successfully
    pub ok: usize,

    /// Number of pages that failed
    pub fail: usize,

    /// Scheduled links that never produced a result because the run was cancelled
    pub abandoned: usize,
}

impl CrawlReport {
    /// Total number of results received
    pub fn total(&self) -> usize {
        self.ok + self.fail
    }

    /// Iterates over failed results
    pub fn failures(&self) -> impl Iterator<Item = &PageResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// Collects page results into a [`CrawlReport`]
#[derive(Debug, Default)]
pub struct Aggregator {
    scheduled: usize,
    report: CrawlReport,
}

impl Aggregator {
    /// Creates an aggregator for a run that scheduled `scheduled` jobs
    pub fn new(scheduled: usize) -> Self {
        Self {
            scheduled,
            report: CrawlReport::default(),
        }
    }

    /// Records one result and updates the running counts
    pub fn record(&mut self, result: PageResult) {
        if result.is_success() {
            self.report.ok += 1;
        } else {
            self.report.fail += 1;
        }
        self.report.results.push(result);
    }

    /// Number of results recorded so far
    pub fn received(&self) -> usize {
        self.report.results.len()
    }

    /// Consumes results until the stream is closed, then returns the report
    ///
    /// Each result is handed to `progress` as it arrives. The scheduler closes
    /// the stream only after all of its workers have finished, so draining to
    /// the end accounts for every claimed job.
    pub async fn drain(
        mut self,
        mut results: mpsc::Receiver<PageResult>,
        progress: &mut dyn Progress,
    ) -> CrawlReport {
        while let Some(result) = results.recv().await {
            tracing::trace!("Result {}/{}: {}", self.received() + 1, self.scheduled, result);
            progress.page_done(&result);
            self.record(result);
        }
        self.finish()
    }

    /// Finalizes the report
    pub fn finish(mut self) -> CrawlReport {
        self.report.abandoned = self.scheduled.saturating_sub(self.report.results.len());
        self.report
    }
}
