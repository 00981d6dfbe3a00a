/// Normalize page text for keyword comparison.
///
/// Lowercases, then collapses every whitespace run (including newlines and
/// form feeds) to a single space. Leading and trailing whitespace is dropped.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
