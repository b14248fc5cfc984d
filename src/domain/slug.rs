//! Title to file-name token derivation

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

// ASCII word characters only: the slug ends up in a URL path.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid non-word regex"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("valid hyphen regex"));

/// Derive a lower-case, hyphen-separated, filename-safe slug from a title.
///
/// Steps run in a fixed order, later ones clean up what earlier ones leave:
/// lower-case, whitespace runs to `-`, drop everything but `[a-z0-9_-]`,
/// collapse hyphen runs, strip leading and trailing hyphens.
///
/// A title without any word characters yields the empty string.
///
/// # Example
/// ```
/// use docnav::domain::slugify;
///
/// assert_eq!(slugify("  API  Design!!  "), "api-design");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    let cleaned = NON_WORD.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN.replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}
