//! Text canonicalization applied before every comparison.
//!
//! Dataset fields and incoming request fields go through the same
//! transformation, so "exact match" always means equality of normalized
//! text, never byte-wise equality of raw input.

/// Canonicalize text for comparison: lowercase, trim, collapse internal
/// whitespace runs to a single space, and fold doubled quote variants
/// (`''`, `""`) to a single straight apostrophe.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`. Deliberately does
/// nothing else — no accent stripping, no punctuation removal.
pub fn normalize(text: &str) -> String {
    let mut unquoted = text.to_lowercase();
    // Fold to a fixpoint: a single pass leaves doubled quotes behind on
    // runs of three or more, and `""` -> `'` can itself create a new `''`.
    while unquoted.contains("''") || unquoted.contains("\"\"") {
        unquoted = unquoted.replace("''", "'").replace("\"\"", "'");
    }
    unquoted.split_whitespace().collect::<Vec<_>>().join(" ")
}
