use std::collections::HashSet;

/// Removes duplicate URLs, keeping the first occurrence of each
///
/// The relative order of first occurrences is preserved, so the output lists
/// links in the order they were discovered on the page.
///
/// # Examples
///
/// ```
/// use lemme_scrape::url::dedupe;
///
/// let links = vec!["https://a.com/1", "https://a.com/2", "https://a.com/1"];
/// assert_eq!(dedupe(links), vec!["https://a.com/1", "https://a.com/2"]);
/// ```
pub fn dedupe<I, S>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for link in links {
        let link = link.into();
        if seen.insert(link.clone()) {
            unique.push(link);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let result = dedupe(Vec::<String>::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_keeps_first_occurrence_order() {
        let result = dedupe(["c", "a", "c", "b", "a"]);
        assert_eq!(result, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_duplicates_remain() {
        let input = ["x", "y", "x", "x", "z", "y"];
        let result = dedupe(input);
        let unique: HashSet<_> = result.iter().collect();
        assert_eq!(unique.len(), result.len());
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/a",
            "https://example.com/c#frag",
            "https://example.com/c",
        ];
        let once = dedupe(input);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_distinct_by_exact_string() {
        // Fragments and trailing slashes make URLs distinct values
        let result = dedupe(["https://a.com/p", "https://a.com/p#x", "https://a.com/p/"]);
        assert_eq!(result.len(), 3);
    }
}
