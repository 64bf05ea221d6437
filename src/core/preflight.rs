// Pre-flight Validation
// Checks the source and replica roots before the first pass

use std::path::Path;

use super::SyncError;
use crate::utilities::is_inside;

/// Verify both roots exist, are directories and do not overlap
///
/// Only the two tree roots are checked; the interval and log file arguments
/// are not paths that must already exist.
pub fn check_roots(source: &Path, replica: &Path) -> Result<(), SyncError> {
    for root in [source, replica] {
        if !root.exists() {
            return Err(SyncError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(SyncError::NotADirectory(root.to_path_buf()));
        }
    }

    let source_abs = source
        .canonicalize()
        .map_err(|e| SyncError::io(source, e))?;
    let replica_abs = replica
        .canonicalize()
        .map_err(|e| SyncError::io(replica, e))?;

    if is_inside(&replica_abs, &source_abs) || is_inside(&source_abs, &replica_abs) {
        return Err(SyncError::NestedRoots {
            source_root: source.to_path_buf(),
            replica_root: replica.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_roots_pass() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let replica = dir.path().join("replica");
        std::fs::create_dir(&source).unwrap();
        std::fs::create_dir(&replica).unwrap();

        assert!(check_roots(&source, &replica).is_ok());
    }

    #[test]
    fn test_missing_root_is_named() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let replica = dir.path().join("replica");
        std::fs::create_dir(&source).unwrap();

        match check_roots(&source, &replica) {
            Err(SyncError::PathNotFound(path)) => assert_eq!(path, replica),
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_source_checked_first() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let replica = dir.path().join("replica");

        match check_roots(&source, &replica) {
            Err(SyncError::PathNotFound(path)) => assert_eq!(path, source),
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_file_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        std::fs::write(&source, "not a dir").unwrap();

        assert!(matches!(
            check_roots(&source, dir.path()),
            Err(SyncError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_nested_roots_are_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source");
        let replica = source.join("replica");
        std::fs::create_dir_all(&replica).unwrap();

        assert!(matches!(check_roots(&source, &replica), Err(SyncError::NestedRoots { .. })));
        assert!(matches!(check_roots(&replica, &source), Err(SyncError::NestedRoots { .. })));
        assert!(matches!(check_roots(&source, &source), Err(SyncError::NestedRoots { .. })));
    }
}
