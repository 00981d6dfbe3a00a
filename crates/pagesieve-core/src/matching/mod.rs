pub mod normalize;

use crate::extraction::PageContent;
use normalize::normalize_text;
use tracing::debug;

/// Split free-form keyword input into keywords, one per line.
///
/// Lines are trimmed and blank lines dropped.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Does `text` contain every keyword?
///
/// The text is normalized; keywords are only lowercased. Matching is raw
/// substring containment, so "cat" matches inside "category". An empty
/// keyword list matches everything.
pub fn page_matches<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    let normalized = normalize_text(text);
    keywords
        .iter()
        .all(|k| normalized.contains(&k.as_ref().to_lowercase()))
}

/// Return the numbers of the pages that contain every keyword, in document order.
///
/// Callers must reject an empty keyword list themselves if match-all is not wanted.
pub fn find_matching_pages<S: AsRef<str>>(pages: &[PageContent], keywords: &[S]) -> Vec<usize> {
    let mut matched: Vec<usize> = Vec::new();

    for page in pages {
        if matched.contains(&page.page_number) {
            continue;
        }
        if page_matches(&page.text(), keywords) {
            debug!(page = page.page_number, "page contains all keywords");
            matched.push(page.page_number);
        }
    }

    matched
}
