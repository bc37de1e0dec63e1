//! Plain-text rendering of a crawl run as it progresses

use crate::output::CrawlReport;
use crate::state::PageResult;
use crate::url::LinkSet;
use std::io::{self, Write};
use std::time::Duration;

/// Receives crawl events while the run is still going
///
/// Both hooks default to doing nothing, so `()` serves as a silent observer.
pub trait Progress: Send {
    /// Called once the seed page is fetched and its links are filtered,
    /// before any link is dispatched
    fn seed_fetched(&mut self, _title: &str, _links: &LinkSet) {}

    /// Called for every page result as it arrives
    fn page_done(&mut self, _result: &PageResult) {}
}

impl Progress for () {}

/// Writes the run report line by line as events arrive
///
/// The seed title and links are written before the workers start, each page
/// result as soon as it is received, and the summary by [`ReportWriter::finish`].
/// The first write error is kept and returned from `finish`; later writes are
/// skipped.
#[derive(Debug)]
pub struct ReportWriter<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn write_with(&mut self, lines: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = lines(&mut self.out).and_then(|()| self.out.flush()) {
            self.error = Some(e);
        }
    }

    /// Writes the summary lines and hands back the underlying writer
    pub fn finish(mut self, report: &CrawlReport, elapsed: Duration) -> io::Result<W> {
        self.write_with(|out| {
            if report.abandoned > 0 {
                writeln!(out, "Cancelled before fetching {} links", report.abandoned)?;
            }
            writeln!(out, "Fetched {} OK, {} errors", report.ok, report.fail)?;
            writeln!(out, "Running time: {:.3?}", elapsed)
        });

        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write + Send> Progress for ReportWriter<W> {
    fn seed_fetched(&mut self, title: &str, links: &LinkSet) {
        self.write_with(|out| {
            writeln!(out, "Title: {}", title)?;
            for link in links {
                writeln!(out, "{}", link)?;
            }
            Ok(())
        });
    }

    fn page_done(&mut self, result: &PageResult) {
        self.write_with(|out| writeln!(out, "{}", result));
    }
}
