//! HTML document model
//!
//! This module turns a response body into a [`Document`], which holds the
//! parts of the page the crawler queries:
//! - the page title
//! - the raw `href` of every `<a>` element, in document order

use scraper::{Html, Selector};

/// A parsed HTML page
///
/// Parsing happens once, when the document is built. The document owns plain
/// strings, so it can be moved between tasks freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    title: String,
    links: Vec<String>,
}

impl Document {
    /// Parses an HTML body
    ///
    /// HTML parsing is error-tolerant, so any text produces a document; a page
    /// without a `<title>` has an empty title.
    ///
    /// # Example
    ///
    /// ```
    /// use lemme_scrape::crawler::Document;
    ///
    /// let html = r#"<html><head><title> Test </title></head>
    ///     <body><a href="/page">Link</a></body></html>"#;
    /// let doc = Document::parse(html);
    /// assert_eq!(doc.find_title(), "Test");
    /// assert_eq!(doc.find_links(), ["/page"]);
    /// ```
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        Self {
            title: extract_title(&document),
            links: extract_hrefs(&document),
        }
    }

    /// Returns the trimmed text of the first `<title>` element
    pub fn find_title(&self) -> &str {
        &self.title
    }

    /// Returns the raw `href` values of all `<a>` elements, unresolved
    pub fn find_links(&self) -> &[String] {
        &self.links
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the href attribute of every anchor
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
