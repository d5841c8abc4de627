use std::collections::{BTreeMap, BTreeSet, btree_map};

/// Archive file name, relative to the archive directory.
pub type ArchiveId = String;

/// Entry name inside an archive, also used verbatim as the output file name.
pub type EntryName = String;

/// Requested entries of one archive.
pub type TargetSet = BTreeSet<EntryName>;

const SEPARATOR: char = '!';

/// Split a cell on its first `!` into `(archive, entry)`.
///
/// Returns `None` for cells that are not requests: no separator, or an
/// entry part that is empty or whitespace. The archive part may be empty.
pub fn parse_request(cell: &str) -> Option<(&str, &str)> {
    let (archive, entry) = cell.split_once(SEPARATOR)?;
    if entry.trim().is_empty() {
        return None;
    }
    Some((archive, entry))
}

/// Requested entries grouped by archive.
///
/// Every archive present maps to a non-empty set: groups only come into
/// existence together with their first entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkMap {
    archives: BTreeMap<ArchiveId, TargetSet>,
}

impl WorkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw cell values, keeping only request cells.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();
        for cell in cells {
            map.add_cell(cell.as_ref());
        }
        map
    }

    /// Record `cell` if it is a request. Returns whether it was one.
    pub fn add_cell(&mut self, cell: &str) -> bool {
        match parse_request(cell) {
            Some((archive, entry)) => {
                self.archives
                    .entry(archive.to_owned())
                    .or_default()
                    .insert(entry.to_owned());
                true
            }
            None => false,
        }
    }

    /// Number of archives.
    pub fn len(&self) -> usize {
        self.archives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Total number of distinct `(archive, entry)` requests.
    pub fn request_count(&self) -> usize {
        self.archives.values().map(BTreeSet::len).sum()
    }

    pub fn get(&self, archive: &str) -> Option<&TargetSet> {
        self.archives.get(archive)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ArchiveId, TargetSet> {
        self.archives.iter()
    }
}

impl IntoIterator for WorkMap {
    type Item = (ArchiveId, TargetSet);
    type IntoIter = btree_map::IntoIter<ArchiveId, TargetSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.archives.into_iter()
    }
}

impl<'a> IntoIterator for &'a WorkMap {
    type Item = (&'a ArchiveId, &'a TargetSet);
    type IntoIter = btree_map::Iter<'a, ArchiveId, TargetSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.archives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> TargetSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn parse_splits_on_first_separator() {
        assert_eq!(parse_request("a.zip!dir/b!c"), Some(("a.zip", "dir/b!c")));
    }

    #[test]
    fn parse_rejects_cells_without_separator() {
        assert_eq!(parse_request("plain value"), None);
        assert_eq!(parse_request(""), None);
    }

    #[test]
    fn parse_rejects_blank_entries() {
        assert_eq!(parse_request("a.zip!"), None);
        assert_eq!(parse_request("a.zip!   "), None);
        assert_eq!(parse_request("a.zip!\t\u{00A0}"), None);
    }

    #[test]
    fn parse_keeps_entry_verbatim() {
        assert_eq!(parse_request("a.zip! padded "), Some(("a.zip", " padded ")));
    }

    #[test]
    fn parse_allows_empty_archive() {
        assert_eq!(parse_request("!orphan.txt"), Some(("", "orphan.txt")));
    }

    #[test]
    fn groups_by_archive() {
        let map = WorkMap::from_cells(["a.zip!x", "b.zip!y", "a.zip!z"]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a.zip"), Some(&set(&["x", "z"])));
        assert_eq!(map.get("b.zip"), Some(&set(&["y"])));
        assert_eq!(map.request_count(), 3);
    }

    #[test]
    fn duplicates_collapse() {
        let map = WorkMap::from_cells(["a.zip!x", "a.zip!x", "a.zip!x"]);
        assert_eq!(map.get("a.zip"), Some(&set(&["x"])));
        assert_eq!(map.request_count(), 1);
    }

    #[test]
    fn non_requests_are_excluded() {
        let map = WorkMap::from_cells(["id", "42", "a.zip!x", "note", "b.zip!"]);
        assert_eq!(map.len(), 1);
        for (_, targets) in &map {
            assert!(targets.iter().all(|t| !t.is_empty()));
            assert!(!targets.contains("id"));
            assert!(!targets.contains("note"));
        }
    }

    #[test]
    fn no_group_is_ever_empty() {
        let cells = ["a!", "b! ", "c!x", "!", "d", "e!y", "a!  "];
        let map = WorkMap::from_cells(cells);
        assert!(map.iter().all(|(_, targets)| !targets.is_empty()));
        assert_eq!(map.get("a"), None);
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn add_cell_reports_whether_accepted() {
        let mut map = WorkMap::new();
        assert!(map.add_cell("a.zip!x"));
        assert!(!map.add_cell("header"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_archive_id_forms_a_group() {
        let map = WorkMap::from_cells(["!orphan.txt"]);
        assert_eq!(map.get(""), Some(&set(&["orphan.txt"])));
    }
}
