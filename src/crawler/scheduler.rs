//! Bounded worker pool for fetching the link set
//!
//! This module handles:
//! - The shared job queue, where each job is claimed by exactly one worker
//! - A fixed pool of workers, which caps the number of in-flight fetches
//! - Per-job deadlines derived from the run context
//! - Delivery of exactly one result per claimed job

use crate::crawler::context::{JobContext, RunContext};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Document;
use crate::state::PageResult;
use crate::FetchError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// A single URL scheduled for one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    /// The absolute URL to fetch
    pub url: String,
}

impl CrawlJob {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Fixed list of jobs shared by all workers
///
/// Claiming pops from the front under a lock, so jobs are handed out in order
/// and never twice.
#[derive(Debug, Default)]
pub struct JobQueue {
    jobs: Mutex<VecDeque<CrawlJob>>,
    claimed: AtomicUsize,
}

impl JobQueue {
    /// Creates a queue holding the given jobs
    pub fn new(jobs: impl IntoIterator<Item = CrawlJob>) -> Self {
        Self {
            jobs: Mutex::new(jobs.into_iter().collect()),
            claimed: AtomicUsize::new(0),
        }
    }

    /// Claims the next unclaimed job, if any remain
    pub fn claim(&self) -> Option<CrawlJob> {
        let job = match self.jobs.lock() {
            Ok(mut jobs) => jobs.pop_front(),
            // A worker panicking mid-claim leaves the queue itself intact
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };

        if job.is_some() {
            self.claimed.fetch_add(1, Ordering::SeqCst);
        }
        job
    }

    /// Number of jobs handed out so far
    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::SeqCst)
    }

    /// Number of jobs still waiting to be claimed
    pub fn remaining(&self) -> usize {
        match self.jobs.lock() {
            Ok(jobs) => jobs.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

/// Scheduler runs one fetch per job on a fixed pool of workers
///
/// The scheduler coordinates:
/// - The worker count (at most `max_concurrency` fetches in flight)
/// - The per-job timeout, clamped to the run deadline
/// - The result channel, which closes once every worker has exited
pub struct Scheduler<F> {
    fetcher: Arc<F>,
    max_concurrency: usize,
    job_timeout: Duration,
}

impl<F> Scheduler<F>
where
    F: Fetcher + 'static,
{
    /// Creates a new scheduler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetcher every worker uses
    /// * `max_concurrency` - Number of workers; values below 1 are raised to 1
    /// * `job_timeout` - Deadline for each fetch
    pub fn new(fetcher: Arc<F>, max_concurrency: usize, job_timeout: Duration) -> Self {
        Self {
            fetcher,
            max_concurrency: max_concurrency.max(1),
            job_timeout,
        }
    }

    /// Returns the number of workers the scheduler launches
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Starts the worker pool over the given jobs
    ///
    /// Returns the receiving end of the result stream. It yields one
    /// [`PageResult`] per claimed job and ends once every worker has finished.
    /// When the run context is cancelled or expires, in-flight fetches report a
    /// cancellation error and jobs not yet claimed are abandoned.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, jobs: Vec<CrawlJob>, ctx: &RunContext) -> mpsc::Receiver<PageResult> {
        let (tx, rx) = mpsc::channel(jobs.len().max(1));
        let workers = self.max_concurrency.min(jobs.len());
        let queue = Arc::new(JobQueue::new(jobs));

        tracing::debug!("Starting {} workers", workers);

        for id in 0..workers {
            tokio::spawn(run_worker(
                id,
                Arc::clone(&queue),
                Arc::clone(&self.fetcher),
                ctx.clone(),
                self.job_timeout,
                tx.clone(),
            ));
        }

        // Workers hold the only remaining senders; the stream closes after the last one exits
        drop(tx);

        rx
    }
}

/// Claims and fetches jobs until the queue is empty or the run is over
async fn run_worker<F>(
    id: usize,
    queue: Arc<JobQueue>,
    fetcher: Arc<F>,
    ctx: RunContext,
    job_timeout: Duration,
    results: mpsc::Sender<PageResult>,
) where
    F: Fetcher + 'static,
{
    loop {
        if ctx.is_done() {
            tracing::debug!(
                "Worker {} stopping: run cancelled after {} jobs claimed, {} unclaimed",
                id,
                queue.claimed(),
                queue.remaining()
            );
            break;
        }

        let Some(job) = queue.claim() else {
            break;
        };

        tracing::debug!("Worker {} fetching {}", id, job.url);

        let job_ctx = ctx.job(job_timeout);
        let result = match fetch_isolated(Arc::clone(&fetcher), job.url.clone(), job_ctx).await {
            Ok(document) => PageResult::success(job.url, document.find_title()),
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", job.url, e.cause());
                PageResult::failure(job.url, e)
            }
        };

        if results.send(result).await.is_err() {
            tracing::warn!("Worker {} stopping: result receiver dropped", id);
            break;
        }
    }

    tracing::debug!("Worker {} finished", id);
}

/// Runs one fetch on its own task so a panicking fetcher fails only that job
async fn fetch_isolated<F>(
    fetcher: Arc<F>,
    url: String,
    ctx: JobContext,
) -> Result<Document, FetchError>
where
    F: Fetcher + 'static,
{
    let task_url = url.clone();
    let task = tokio::spawn(async move { fetcher.fetch(&task_url, &ctx).await });

    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Fetch task for {} failed: {}", url, e);
            Err(FetchError::Request {
                url,
                message: format!("fetch task failed: {}", e),
            })
        }
    }
}
