//! Filesystem-safe identifiers from display strings
//!
//! Destination names arrive with accents, capitals and spaces
//! (`"Nueva York"`, `"París"`). [`slugify`] turns them into the lowercase
//! ASCII fragment used in per-destination file names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Anything left after lowercasing that is not allowed in a slug
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]").expect("slug character class is a valid regex"));

/// Convert a display string into a slug
///
/// Decomposes to NFD and drops combining marks, lowercases, maps spaces to
/// `_` and removes every character outside `[a-z0-9_-]`. Never fails: an
/// empty or punctuation-only input yields an empty slug. Distinct inputs may
/// collide (`"París"` and `"paris"` both give `"paris"`).
pub fn slugify(input: &str) -> String {
    let stripped: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .replace(' ', "_");

    UNSAFE_CHARS.replace_all(&stripped, "").into_owned()
}
