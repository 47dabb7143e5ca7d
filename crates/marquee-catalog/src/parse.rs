//! Catalog file parsing

use std::path::Path;
use tracing::{debug, warn};

use marquee_util::EntryId;

use crate::{
    BUILTIN_DENY_LIST, Catalog, CatalogResult, LaunchableEntry, display_name_from_identifier,
};

/// One parsed catalog row before deny-list filtering
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogRow {
    pub identifier: String,
    pub command: String,
    pub icon_ref: String,
}

/// Parse a single catalog row.
///
/// Rows look like `"<identifier>","<command>","<icon>"`: fields separated
/// by the literal sequence `","`, with one leading and one trailing quote.
/// Embedded quotes and commas are not supported. Returns `None` for rows
/// that do not yield three fields.
pub fn parse_row(line: &str) -> Option<CatalogRow> {
    let parts: Vec<&str> = line.split("\",\"").collect();
    if parts.len() < 3 {
        return None;
    }

    let identifier = parts[0].strip_prefix('"').unwrap_or(parts[0]);
    let command = parts[1];
    let icon_ref = parts[2].strip_suffix('"').unwrap_or(parts[2]);

    Some(CatalogRow {
        identifier: identifier.to_string(),
        command: command.to_string(),
        icon_ref: icon_ref.to_string(),
    })
}

/// Parse catalog content: a header line (discarded) followed by rows.
///
/// Malformed rows and denied identifiers are skipped. `extra_deny` extends
/// the built-in deny list.
pub fn parse_catalog(content: &str, extra_deny: &[String]) -> Catalog {
    let mut catalog = Catalog::new();

    for line in content.lines().skip(1) {
        if line.is_empty() {
            continue;
        }

        let Some(row) = parse_row(line) else {
            debug!(line, "Skipping malformed catalog row");
            continue;
        };

        if BUILTIN_DENY_LIST.contains(&row.identifier.as_str())
            || extra_deny.iter().any(|d| d == &row.identifier)
        {
            debug!(identifier = %row.identifier, "Skipping denied identifier");
            continue;
        }

        let display_name = display_name_from_identifier(&row.identifier);
        let entry = LaunchableEntry {
            id: EntryId::new(&row.identifier),
            display_name,
            command: row.command,
            icon_ref: row.icon_ref,
        };

        if !catalog.insert(entry) {
            warn!(identifier = %row.identifier, "Duplicate display name, row skipped");
        }
    }

    catalog
}

/// Load the catalog from a file.
///
/// An unreadable file is the only fatal condition; the caller surfaces it
/// once and continues with an empty catalog.
pub fn load_catalog(path: impl AsRef<Path>, extra_deny: &[String]) -> CatalogResult<Catalog> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_catalog(&content, extra_deny))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\"desktop_file\",\"exec\",\"icon\"\n";

    #[test]
    fn row_parses_three_fields() {
        let row = parse_row("\"supertux.desktop\",\"supertux2 --fullscreen\",\"supertux\"")
            .unwrap();
        assert_eq!(row.identifier, "supertux.desktop");
        assert_eq!(row.command, "supertux2 --fullscreen");
        assert_eq!(row.icon_ref, "supertux");
    }

    #[test]
    fn short_rows_rejected() {
        assert!(parse_row("\"only.desktop\",\"cmd\"").is_none());
        assert!(parse_row("plain text").is_none());
        assert!(parse_row("").is_none());
    }

    #[test]
    fn header_is_discarded() {
        let content = format!("{HEADER}\"pingus.desktop\",\"pingus\",\"pingus\"\n");
        let catalog = parse_catalog(&content, &[]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_name("Pingus").is_some());
    }

    #[test]
    fn malformed_rows_skipped_without_error() {
        let content = format!(
            "{HEADER}\
             \"abc-game.desktop\",\"abc\",\"abc\"\n\
             \"broken.desktop\",\"no-icon-field\"\n\
             \"other.desktop\",\"other\",\"other\"\n"
        );
        let catalog = parse_catalog(&content, &[]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.by_name("Abc Game").is_some());
        assert!(catalog.by_name("Other").is_some());
    }

    #[test]
    fn builtin_deny_list_applies() {
        let content = format!(
            "{HEADER}\
             \"asciijump.desktop\",\"asciijump\",\"asciijump\"\n\
             \"pingus.desktop\",\"pingus\",\"pingus\"\n"
        );
        let catalog = parse_catalog(&content, &[]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_id(&EntryId::new("asciijump.desktop")).is_none());
    }

    #[test]
    fn extra_deny_list_applies() {
        let content = format!("{HEADER}\"pingus.desktop\",\"pingus\",\"pingus\"\n");
        let catalog = parse_catalog(&content, &["pingus.desktop".to_string()]);
        assert!(catalog.is_empty());
    }

    #[test]
    fn empty_lines_skipped() {
        let content = format!("{HEADER}\n\n\"pingus.desktop\",\"pingus\",\"pingus\"\n");
        let catalog = parse_catalog(&content, &[]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        std::fs::write(
            &path,
            format!("{HEADER}\"supertux.desktop\",\"supertux2\",\"supertux\"\n"),
        )
        .unwrap();

        let catalog = load_catalog(&path, &[]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.by_name("Supertux").unwrap().command,
            "supertux2"
        );
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_catalog(dir.path().join("missing.csv"), &[]).is_err());
    }
}
