//! URL handling module for Lemme-Scrape
//!
//! This module provides link resolution, deduplication and origin filtering,
//! and combines them into the [`LinkSet`] a crawl run schedules from.

mod dedupe;
mod resolve;
mod scope;

// Re-export main functions
pub use dedupe::dedupe;
pub use resolve::{resolve, LinkResolver};
pub use scope::{extract_host, host_matches, is_in_scope};

/// Ordered, duplicate-free set of in-scope absolute URLs
///
/// A link set is built once per run from the hrefs on the seed page and is
/// read-only afterwards. Order is first-discovery order on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: Vec<String>,
}

impl LinkSet {
    /// Builds a link set from raw hrefs
    ///
    /// Each href is resolved against the resolver's base, the results are
    /// deduplicated, and only URLs in scope for `seed_host` are kept. Hrefs
    /// that fail to resolve are skipped silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use lemme_scrape::url::{LinkResolver, LinkSet};
    ///
    /// let resolver = LinkResolver::new("https://example.com/").unwrap();
    /// let hrefs = ["/a", "https://other.org/", "/a", "https://blog.example.com/"];
    /// let links = LinkSet::build(&resolver, "example.com", hrefs);
    /// assert_eq!(links.as_slice(), ["https://example.com/a", "https://blog.example.com/"]);
    /// ```
    pub fn build<I, S>(resolver: &LinkResolver, seed_host: &str, hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = hrefs
            .into_iter()
            .filter_map(|href| match resolver.resolve(href.as_ref()) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Skipping link: {}", e);
                    None
                }
            });

        let links = dedupe(resolved)
            .into_iter()
            .filter(|url| {
                let keep = is_in_scope(url, seed_host);
                if !keep {
                    tracing::trace!("Out of scope for {}: {}", seed_host, url);
                }
                keep
            })
            .collect();

        Self { links }
    }

    /// Returns the number of links
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Returns whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Iterates over the links in discovery order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.links.iter()
    }

    /// Returns the links as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.links
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
