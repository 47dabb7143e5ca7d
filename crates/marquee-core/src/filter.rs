//! Search-visibility predicate

use marquee_catalog::Catalog;

/// An entry is visible when the term is empty or its display name contains
/// the term, case-insensitively.
pub fn matches(display_name: &str, term: &str) -> bool {
    term.is_empty() || display_name.to_lowercase().contains(&term.to_lowercase())
}

/// Per-entry visibility flags, in catalog order, for the current term
pub fn visibility(catalog: &Catalog, term: &str) -> Vec<bool> {
    catalog
        .iter()
        .map(|entry| matches(&entry.display_name, term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_catalog::parse_catalog;

    #[test]
    fn empty_term_matches_everything() {
        assert!(matches("Abc Game", ""));
        assert!(matches("", ""));
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        assert!(matches("Abc Game", "ab"));
        assert!(matches("Abc Game", "GAME"));
        assert!(matches("Abc Game", "c g"));
        assert!(!matches("Other", "ab"));
    }

    #[test]
    fn visibility_follows_catalog_order() {
        let catalog = parse_catalog(
            "\"desktop_file\",\"exec\",\"icon\"\n\
             \"abc-game.desktop\",\"abc\",\"abc\"\n\
             \"other.desktop\",\"other\",\"other\"\n",
            &[],
        );

        assert_eq!(visibility(&catalog, "ab"), vec![true, false]);
        assert_eq!(visibility(&catalog, ""), vec![true, true]);
        assert_eq!(visibility(&catalog, "zzz"), vec![false, false]);
    }
}
