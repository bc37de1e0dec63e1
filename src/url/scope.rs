use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use lemme_scrape::url::extract_host;
///
/// let url = Url::parse("https://Blog.EXAMPLE.com:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("blog.example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a host equals the seed host or is one of its subdomains
///
/// Both arguments are compared case-insensitively. A subdomain must be
/// separated by a dot, so `notexample.com` is not under `example.com`.
pub fn host_matches(host: &str, seed_host: &str) -> bool {
    let host = host.to_lowercase();
    let seed_host = seed_host.to_lowercase();

    host == seed_host || host.ends_with(&format!(".{}", seed_host))
}

/// Checks whether a URL is within the crawl's origin
///
/// A URL is in scope when it parses, its scheme is `http` or `https`, and its
/// host is the seed host or a subdomain of it. Ports are not compared.
///
/// # Examples
///
/// ```
/// use lemme_scrape::url::is_in_scope;
///
/// assert!(is_in_scope("https://a.example.com/x", "example.com"));
/// assert!(!is_in_scope("https://evil.com/x", "example.com"));
/// assert!(!is_in_scope("ftp://example.com/x", "example.com"));
/// ```
pub fn is_in_scope(url: &str, seed_host: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    match extract_host(&parsed) {
        Some(host) => host_matches(&host, seed_host),
        None => false,
    }
}
