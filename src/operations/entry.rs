// File Entry
// Snapshot of one walked path, recomputed on every traversal

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::DirEntry;

use crate::utilities::relative_to;

/// A path relative to a tree root, with the attributes seen while walking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the tree root (empty for the root)
    pub path: PathBuf,
    pub is_directory: bool,
    pub size: u64,
    pub modification_time: Option<SystemTime>,
}

impl FileEntry {
    /// Build an entry from a walked path under `root`
    ///
    /// Symlinks to files report the target's size and mtime; attributes that
    /// cannot be read are left empty rather than failing the walk.
    pub fn from_dir_entry(root: &Path, entry: &DirEntry) -> Self {
        let metadata = std::fs::metadata(entry.path())
            .or_else(|_| entry.metadata().map_err(std::io::Error::from))
            .ok();

        Self {
            path: relative_to(root, entry.path()),
            is_directory: entry.file_type().is_dir(),
            size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
            modification_time: metadata.and_then(|m| m.modified().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use walkdir::WalkDir;

    #[test]
    fn test_entries_are_relative() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b.txt"), "world").unwrap();

        let entries: Vec<FileEntry> = WalkDir::new(dir.path())
            .sort_by_file_name()
            .into_iter()
            .map(|e| FileEntry::from_dir_entry(dir.path(), &e.unwrap()))
            .collect();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path, PathBuf::new());
        assert!(entries[0].is_directory);
        assert_eq!(entries[1].path, PathBuf::from("sub"));
        assert_eq!(entries[2].path, PathBuf::from("sub/b.txt"));
        assert!(!entries[2].is_directory);
        assert_eq!(entries[2].size, 5);
        assert!(entries[2].modification_time.is_some());
    }
}
