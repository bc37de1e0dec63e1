use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves link references against a base URL that is parsed only once
///
/// The seed page's URL is parsed when the resolver is built. Every `href`
/// found on the page is then resolved against it.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    base: Url,
}

impl LinkResolver {
    /// Creates a resolver for the given base URL
    ///
    /// # Returns
    ///
    /// * `Ok(LinkResolver)` - The base URL parsed successfully
    /// * `Err(UrlError)` - The base URL is not an absolute URL
    pub fn new(base: &str) -> UrlResult<Self> {
        let base = Url::parse(base).map_err(|e| parse_error(base, e))?;
        Ok(Self { base })
    }

    /// Returns the parsed base URL
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves a candidate link against the base URL
    ///
    /// The candidate may be absolute or relative. Resolution follows the
    /// standard rules: scheme and authority are inherited when missing, paths
    /// are merged, `.` and `..` segments are collapsed. Query and fragment are
    /// kept as written.
    ///
    /// # Examples
    ///
    /// ```
    /// use lemme_scrape::url::LinkResolver;
    ///
    /// let resolver = LinkResolver::new("https://example.com/a/").unwrap();
    /// assert_eq!(resolver.resolve("../b").unwrap(), "https://example.com/b");
    /// assert_eq!(resolver.resolve("c?x=1#top").unwrap(), "https://example.com/a/c?x=1#top");
    /// ```
    pub fn resolve(&self, candidate: &str) -> UrlResult<String> {
        self.base
            .join(candidate)
            .map(String::from)
            .map_err(|e| parse_error(candidate, e))
    }
}

/// Resolves `candidate` against `base` and returns the absolute URL string
///
/// Fails when either input cannot be parsed. Callers skip the link in that
/// case rather than reporting it.
///
/// # Examples
///
/// ```
/// use lemme_scrape::url::resolve;
///
/// assert_eq!(resolve("https://example.com/a/", "../b").unwrap(), "https://example.com/b");
/// assert!(resolve("not a url", "/page").is_err());
/// ```
pub fn resolve(base: &str, candidate: &str) -> UrlResult<String> {
    LinkResolver::new(base)?.resolve(candidate)
}

fn parse_error(input: &str, err: url::ParseError) -> UrlError {
    UrlError::Parse {
        input: input.to_string(),
        reason: err.to_string(),
    }
}
