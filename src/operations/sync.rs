// Sync Engine
// One-way mirror of a source tree into a replica tree

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentHasher, FileEntry, Hasher, SyncAction, SyncOutcome};
use crate::core::SyncError;
use crate::utilities::relative_to;

/// Engine that converges a replica tree toward its source tree
///
/// A pass first walks the source top-down, creating directories and copying
/// new or changed files, then walks the replica bottom-up, deleting whatever
/// has no counterpart in the source. Per-entry failures become error records
/// in the returned [`SyncOutcome`]; only an unreadable root fails the call.
#[derive(Debug, Clone, Default)]
pub struct SyncEngine<H = Hasher> {
    hasher: H,
}

impl<H: ContentHasher> SyncEngine<H> {
    /// Create a sync engine comparing files with the given hasher
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Run one full pass: mirror, then prune
    pub fn sync(&self, source_root: &Path, replica_root: &Path) -> Result<SyncOutcome, SyncError> {
        let mut outcome = SyncOutcome::new();

        self.mirror(source_root, replica_root, &mut outcome)?;
        self.prune(source_root, replica_root, &mut outcome)?;

        Ok(outcome)
    }

    /// Top-down pass over the source: parents are created before their children
    fn mirror(&self, source_root: &Path, replica_root: &Path, outcome: &mut SyncOutcome) -> Result<(), SyncError> {
        for entry in WalkDir::new(source_root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    walk_failure(err, source_root, source_root, replica_root, outcome)?;
                    continue;
                }
            };

            let file = FileEntry::from_dir_entry(source_root, &entry);
            let replica_path = replica_root.join(&file.path);

            if file.is_directory {
                mirror_dir(&file, &replica_path, outcome);
            } else if entry.path().is_file() {
                self.mirror_file(&file, entry.path(), &replica_path, outcome);
            }
        }

        Ok(())
    }

    /// Bottom-up pass over the replica: a directory is visited after its contents
    fn prune(&self, source_root: &Path, replica_root: &Path, outcome: &mut SyncOutcome) -> Result<(), SyncError> {
        for entry in WalkDir::new(replica_root).contents_first(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    walk_failure(err, replica_root, source_root, replica_root, outcome)?;
                    continue;
                }
            };

            let file = FileEntry::from_dir_entry(replica_root, &entry);
            let source_path = source_root.join(&file.path);

            if file.is_directory {
                prune_dir(&file, &source_path, entry.path(), outcome);
            } else {
                prune_file(&file, &source_path, entry.path(), outcome);
            }
        }

        Ok(())
    }

    fn mirror_file(&self, file: &FileEntry, source_path: &Path, replica_path: &Path, outcome: &mut SyncOutcome) {
        let result = match self.needs_copy(source_path, replica_path) {
            Ok(false) => return,
            Ok(true) => copy_file(source_path, replica_path),
            Err(e) => Err(e),
        };

        outcome.record(SyncAction::CopyFile, &file.path, Some(source_path), replica_path, result);
    }

    /// A copy is needed when the replica is missing, is not a regular file, or
    /// its digest differs. Replica symlinks are never followed.
    fn needs_copy(&self, source_path: &Path, replica_path: &Path) -> io::Result<bool> {
        match fs::symlink_metadata(replica_path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e),
            Ok(metadata) if !metadata.is_file() => Ok(true),
            Ok(_) => {
                let source_digest = self.hasher.digest(source_path)?;
                let replica_digest = self.hasher.digest(replica_path)?;
                Ok(source_digest != replica_digest)
            }
        }
    }
}

fn mirror_dir(file: &FileEntry, replica_path: &Path, outcome: &mut SyncOutcome) {
    let result = match fs::symlink_metadata(replica_path) {
        Ok(metadata) if metadata.is_dir() => return,
        // A file or symlink occupies the directory's place
        Ok(_) => fs::remove_file(replica_path).and_then(|_| fs::create_dir(replica_path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => fs::create_dir_all(replica_path),
        Err(e) => Err(e),
    };

    outcome.record(SyncAction::CreateDir, &file.path, None, replica_path, result);
}

fn prune_file(file: &FileEntry, source_path: &Path, replica_path: &Path, outcome: &mut SyncOutcome) {
    let result = match source_path.try_exists() {
        Ok(true) => return,
        Ok(false) => fs::remove_file(replica_path),
        Err(e) => Err(e),
    };

    outcome.record(SyncAction::DeleteFile, &file.path, None, replica_path, result);
}

fn prune_dir(file: &FileEntry, source_path: &Path, replica_path: &Path, outcome: &mut SyncOutcome) {
    let result = match source_path.try_exists() {
        Ok(true) => return,
        Ok(false) => fs::remove_dir_all(replica_path),
        Err(e) => Err(e),
    };

    outcome.record(SyncAction::DeleteDir, &file.path, None, replica_path, result);
}

/// Copy a file over its replica, keeping permissions and timestamps
fn copy_file(source_path: &Path, replica_path: &Path) -> io::Result<()> {
    if let Ok(existing) = fs::symlink_metadata(replica_path) {
        if existing.is_dir() {
            fs::remove_dir_all(replica_path)?;
        } else if existing.file_type().is_symlink() || existing.permissions().readonly() {
            // Copying through a link would write to its target, and copied
            // permissions may have made the old replica unwritable
            fs::remove_file(replica_path)?;
        }
    }

    fs::copy(source_path, replica_path)?;

    let metadata = fs::metadata(source_path)?;
    filetime::set_file_times(
        replica_path,
        filetime::FileTime::from_last_access_time(&metadata),
        filetime::FileTime::from_last_modification_time(&metadata),
    )
}

/// Record a directory that could not be listed, or fail the pass if it is the root
fn walk_failure(
    err: walkdir::Error,
    walked_root: &Path,
    source_root: &Path,
    replica_root: &Path,
    outcome: &mut SyncOutcome,
) -> Result<(), SyncError> {
    let failed_path = err.path().unwrap_or(walked_root).to_path_buf();

    if err.depth() == 0 {
        return Err(SyncError::io(failed_path, err.into()));
    }

    let relative = relative_to(walked_root, &failed_path);
    let source_path = source_root.join(&relative);
    outcome.record(
        SyncAction::ReadDir,
        &relative,
        Some(&source_path),
        &replica_root.join(&relative),
        Err(err.into()),
    );

    Ok(())
}
