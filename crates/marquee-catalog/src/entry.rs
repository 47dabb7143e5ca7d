//! Launchable entry records and the insertion-ordered catalog

use marquee_util::EntryId;

/// One launchable program from the catalog. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchableEntry {
    /// Raw identifier from the catalog file (e.g. `supertux.desktop`)
    pub id: EntryId,

    /// Human-readable name derived from the identifier; unique per catalog
    pub display_name: String,

    /// Program plus space-delimited arguments
    pub command: String,

    /// Icon reference: a theme icon name or a file path
    pub icon_ref: String,
}

/// Insertion-ordered collection of launchable entries.
///
/// Display names are unique; the first row to claim a name wins and later
/// duplicates are rejected by [`Catalog::insert`].
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<LaunchableEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, preserving order. Returns `false` if an entry with
    /// the same display name already exists.
    pub fn insert(&mut self, entry: LaunchableEntry) -> bool {
        if self.by_name(&entry.display_name).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &LaunchableEntry> {
        self.entries.iter()
    }

    pub fn by_name(&self, display_name: &str) -> Option<&LaunchableEntry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }

    pub fn by_id(&self, id: &EntryId) -> Option<&LaunchableEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str) -> LaunchableEntry {
        LaunchableEntry {
            id: EntryId::new(id),
            display_name: name.to_string(),
            command: "true".to_string(),
            icon_ref: String::new(),
        }
    }

    #[test]
    fn insertion_order_preserved() {
        let mut catalog = Catalog::new();
        catalog.insert(entry("b.desktop", "B"));
        catalog.insert(entry("a.desktop", "A"));

        let names: Vec<_> = catalog.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn duplicate_display_name_rejected() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(entry("a.desktop", "Same")));
        assert!(!catalog.insert(entry("b.desktop", "Same")));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.by_name("Same").unwrap().id,
            EntryId::new("a.desktop")
        );
    }

    #[test]
    fn lookup_by_id_and_name() {
        let mut catalog = Catalog::new();
        catalog.insert(entry("a.desktop", "A"));

        assert!(catalog.by_id(&EntryId::new("a.desktop")).is_some());
        assert!(catalog.by_id(&EntryId::new("x.desktop")).is_none());
        assert!(catalog.by_name("A").is_some());
        assert!(catalog.by_name("X").is_none());
    }
}
