// src/catalog.rs

use crate::file_record::FileRecord;
use std::collections::BTreeMap;

/// Registry of known files, keyed by file id.
/// Iteration is ordered by id so snapshots are stable.
#[derive(Debug, Default, Clone)]
pub struct FileCatalog {
    files: BTreeMap<String, FileRecord>,
}

impl FileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, replacing any previous record with the same id.
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, file: FileRecord) -> Option<FileRecord> {
        self.files.insert(file.id.clone(), file)
    }

    pub fn remove(&mut self, id: &str) -> Option<FileRecord> {
        self.files.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&FileRecord> {
        self.files.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.files.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_duplicate_id() {
        let mut catalog = FileCatalog::new();
        assert!(catalog.insert(FileRecord::new("a", "First", 10.0)).is_none());
        let replaced = catalog.insert(FileRecord::new("a", "Second", 20.0));

        assert_eq!(replaced.map(|f| f.name), Some("First".to_string()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().name, "Second");
    }

    #[test]
    fn test_iteration_is_ordered_by_id() {
        let mut catalog = FileCatalog::new();
        catalog.insert(FileRecord::new("c", "C", 1.0));
        catalog.insert(FileRecord::new("a", "A", 1.0));
        catalog.insert(FileRecord::new("b", "B", 1.0));

        let ids: Vec<&str> = catalog.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut catalog = FileCatalog::new();
        catalog.insert(FileRecord::new("a", "A", 1.0));
        assert!(catalog.remove("a").is_some());
        assert!(catalog.remove("a").is_none());
        assert!(catalog.is_empty());
    }
}
