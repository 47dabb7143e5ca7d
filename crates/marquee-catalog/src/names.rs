//! Display-name derivation from raw identifiers

/// Derive a human-readable display name from a raw identifier:
/// strip the `.desktop` suffix, replace `-` and `_` with spaces, and
/// title-case each word.
///
/// The derivation is idempotent: feeding the result back in yields the
/// same string.
pub fn display_name_from_identifier(identifier: &str) -> String {
    let name = identifier.strip_suffix(".desktop").unwrap_or(identifier);
    let name = name.replace(['-', '_'], " ");

    name.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
