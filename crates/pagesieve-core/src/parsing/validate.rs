use regex::Regex;
use std::sync::LazyLock;

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));
static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("valid regex"));

/// Decide whether an extracted grid holds real data.
///
/// True iff some cell contains a decimal digit and some (possibly other)
/// cell contains an ASCII letter. Rejects decorative rules, page furniture
/// and header-only fragments. Structure and alignment are not checked.
pub fn is_data_table<S: AsRef<str>>(grid: &[Vec<S>]) -> bool {
    let cells = || grid.iter().flat_map(|row| row.iter().map(|c| c.as_ref()));

    let has_digit = cells().any(|c| DIGIT.is_match(c));
    let has_alpha = cells().any(|c| ALPHA.is_match(c));

    has_digit && has_alpha
}
