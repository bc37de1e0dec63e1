//! Crawler coordinator - main crawl orchestration logic
//!
//! This module ties the pieces of a run together:
//! - Fetching the seed page (the only fatal step)
//! - Building the link set from the seed's links
//! - Dispatching the link set to the scheduler
//! - Draining results into a report

use crate::config::{Config, CrawlerConfig};
use crate::crawler::context::RunContext;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::scheduler::{CrawlJob, Scheduler};
use crate::output::{Aggregator, CrawlReport, Progress};
use crate::url::{extract_host, LinkResolver, LinkSet};
use crate::{CrawlError, UrlError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Everything a finished crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The seed URL as given
    pub seed_url: String,

    /// Title of the seed page
    pub seed_title: String,

    /// Filtered, deduplicated links found on the seed page
    pub links: LinkSet,

    /// Per-page results and counts
    pub report: CrawlReport,

    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}

/// Main crawler structure
pub struct Crawler<F> {
    fetcher: Arc<F>,
    settings: CrawlerConfig,
}

impl Crawler<HttpFetcher> {
    /// Creates a crawler that fetches over HTTP with the configured client
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::new(fetcher, config.crawler.clone()))
    }
}

impl<F> Crawler<F>
where
    F: Fetcher + 'static,
{
    /// Creates a crawler around any fetcher
    pub fn new(fetcher: F, settings: CrawlerConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            settings,
        }
    }

    /// Runs a crawl with a fresh run context built from the settings
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The seed was fetched; per-link failures are inside the report
    /// * `Err(CrawlError)` - The seed URL was invalid or the seed fetch failed
    pub async fn crawl(&self, seed_url: &str) -> crate::Result<CrawlOutcome> {
        let ctx = RunContext::new(self.settings.run_timeout());
        self.crawl_with(seed_url, &ctx, &mut ()).await
    }

    /// Runs a crawl under a caller-supplied run context
    ///
    /// This is the main crawling logic that:
    /// 1. Fetches the seed page under the run deadline
    /// 2. Resolves, deduplicates and origin-filters its links
    /// 3. Reports the seed title and links to `progress`
    /// 4. Schedules one fetch per remaining link
    /// 5. Aggregates results, reporting each one, until every worker has finished
    pub async fn crawl_with(
        &self,
        seed_url: &str,
        ctx: &RunContext,
        progress: &mut dyn Progress,
    ) -> crate::Result<CrawlOutcome> {
        let start_time = Instant::now();

        let resolver = LinkResolver::new(seed_url)?;
        let seed_host = extract_host(resolver.base())
            .ok_or_else(|| UrlError::MissingHost(seed_url.to_string()))?;

        tracing::info!("Fetching seed page {}", seed_url);
        let seed = self
            .fetcher
            .fetch(seed_url, &ctx.seed())
            .await
            .map_err(CrawlError::SeedFetch)?;

        let seed_title = seed.find_title().to_string();
        let links = LinkSet::build(&resolver, &seed_host, seed.find_links());
        tracing::info!(
            "Seed page '{}' has {} links, {} in scope for {}",
            seed_title,
            seed.find_links().len(),
            links.len(),
            seed_host
        );

        progress.seed_fetched(&seed_title, &links);

        let scheduler = Scheduler::new(
            Arc::clone(&self.fetcher),
            self.settings.max_concurrency,
            self.settings.job_timeout(),
        );
        let jobs: Vec<CrawlJob> = links.iter().map(CrawlJob::new).collect();
        let results = scheduler.spawn(jobs, ctx);

        let report = Aggregator::new(links.len())
            .drain(results, progress)
            .await;
        if report.abandoned > 0 {
            tracing::warn!(
                "Run cancelled: {} links were never fetched",
                report.abandoned
            );
        }

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl completed: {} of {} pages reported ({} OK, {} errors) in {:?}",
            report.total(),
            links.len(),
            report.ok,
            report.fail,
            elapsed
        );

        Ok(CrawlOutcome {
            seed_url: seed_url.to_string(),
            seed_title,
            links,
            report,
            elapsed,
        })
    }
}

/// Runs a crawl from configuration over HTTP
///
/// # Example
///
/// ```no_run
/// use lemme_scrape::config::Config;
/// use lemme_scrape::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default(), "https://quotes.toscrape.com/").await?;
/// println!("Fetched {} OK, {} errors", outcome.report.ok, outcome.report.fail);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, seed_url: &str) -> crate::Result<CrawlOutcome> {
    Crawler::from_config(config)?.crawl(seed_url).await
}
