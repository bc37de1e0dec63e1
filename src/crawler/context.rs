//! Run-wide and per-job cancellation scopes
//!
//! A [`RunContext`] owns the deadline and cancellation token for one crawl.
//! Every fetch runs under a [`JobContext`] derived from it. A job's deadline is
//! the earlier of its own timeout and the run deadline, and its token is a
//! child of the run token: cancelling the run cancels every job, while a job
//! timing out affects nobody else.

use crate::FetchError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline and cancellation signal shared by a whole crawl run
#[derive(Debug, Clone)]
pub struct RunContext {
    token: CancellationToken,
    deadline: Instant,
}

impl RunContext {
    /// Creates a run context that expires `timeout` from now
    pub fn new(timeout: Duration) -> Self {
        Self::with_token(CancellationToken::new(), timeout)
    }

    /// Creates a run context driven by an externally owned token
    ///
    /// Cancelling `token` (for example from a Ctrl-C handler) cancels the run.
    pub fn with_token(token: CancellationToken, timeout: Duration) -> Self {
        Self {
            token,
            deadline: Instant::now() + timeout,
        }
    }

    /// Cancels the run and every job derived from it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns true once the run was cancelled or its deadline has passed
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || Instant::now() >= self.deadline
    }

    /// Time left until the run deadline
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Resolves when the run is cancelled or its deadline passes
    pub async fn done(&self) {
        tokio::select! {
            _ = self.token.cancelled() => {}
            _ = tokio::time::sleep_until(self.deadline) => {}
        }
    }

    /// Derives the scope for one linked-page fetch
    pub fn job(&self, timeout: Duration) -> JobContext {
        let own_deadline = Instant::now() + timeout;
        JobContext {
            token: self.token.child_token(),
            deadline: own_deadline.min(self.deadline),
            run_deadline: self.deadline,
            timeout,
        }
    }

    /// Derives the scope for the seed fetch, bounded only by the run deadline
    pub fn seed(&self) -> JobContext {
        JobContext {
            token: self.token.child_token(),
            deadline: self.deadline,
            run_deadline: self.deadline,
            timeout: self.remaining(),
        }
    }
}

/// Cancellation scope for a single fetch
#[derive(Debug, Clone)]
pub struct JobContext {
    token: CancellationToken,
    deadline: Instant,
    run_deadline: Instant,
    timeout: Duration,
}

impl JobContext {
    /// The job's own timeout, before clamping to the run deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns true if the owning run has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs `fut` under this scope
    ///
    /// The future is dropped, aborting whatever request it was driving, as
    /// soon as the run is cancelled or the job deadline passes. Expiry of the
    /// run deadline is reported as [`FetchError::Cancelled`]; expiry of the
    /// job's own timeout as [`FetchError::Timeout`].
    pub async fn bound<T, F>(&self, url: &str, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        tokio::select! {
            biased;

            _ = self.token.cancelled() => Err(FetchError::Cancelled {
                url: url.to_string(),
            }),

            outcome = tokio::time::timeout_at(self.deadline, fut) => match outcome {
                Ok(result) => result,
                Err(_) if Instant::now() >= self.run_deadline => Err(FetchError::Cancelled {
                    url: url.to_string(),
                }),
                Err(_) => Err(FetchError::Timeout {
                    url: url.to_string(),
                    after: self.timeout,
                }),
            },
        }
    }
}
