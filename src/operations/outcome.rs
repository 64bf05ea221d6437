// Sync Outcome
// Ordered record of every action one pass took, with per-entry errors

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of action taken on the replica
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncAction {
    CreateDir,
    CopyFile,
    DeleteFile,
    DeleteDir,
    /// A directory could not be listed; only ever carries an error
    ReadDir,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreateDir => "CREATE_DIR",
            Self::CopyFile => "COPY_FILE",
            Self::DeleteFile => "DELETE_FILE",
            Self::DeleteDir => "DELETE_DIR",
            Self::ReadDir => "READ_DIR",
        };
        f.write_str(name)
    }
}

/// One action taken (or attempted) during a pass
#[derive(Debug)]
pub struct SyncRecord {
    /// What was done
    pub action: SyncAction,
    /// Path relative to the tree roots
    pub path: PathBuf,
    /// Source file a copy was taken from
    pub source_path: Option<PathBuf>,
    /// Affected path under the replica root
    pub replica_path: PathBuf,
    /// Failure, if the action could not be completed
    pub error: Option<io::Error>,
}

impl SyncRecord {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything one `sync` call did, in the order it happened
#[derive(Debug, Default)]
pub struct SyncOutcome {
    records: Vec<SyncRecord>,
}

impl SyncOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(
        &mut self,
        action: SyncAction,
        path: &Path,
        source_path: Option<&Path>,
        replica_path: &Path,
        result: io::Result<()>,
    ) {
        self.records.push(SyncRecord {
            action,
            path: path.to_path_buf(),
            source_path: source_path.map(Path::to_path_buf),
            replica_path: replica_path.to_path_buf(),
            error: result.err(),
        });
    }

    pub fn records(&self) -> &[SyncRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records of one action kind, failed ones included
    pub fn with_action(&self, action: SyncAction) -> impl Iterator<Item = &SyncRecord> {
        self.records.iter().filter(move |r| r.action == action)
    }

    pub fn errors(&self) -> impl Iterator<Item = &SyncRecord> {
        self.records.iter().filter(|r| r.is_error())
    }

    pub fn summary(&self) -> SyncSummary {
        let mut summary = SyncSummary::default();

        for record in &self.records {
            if record.is_error() {
                summary.failed += 1;
                continue;
            }
            match record.action {
                SyncAction::CreateDir => summary.created_dirs += 1,
                SyncAction::CopyFile => summary.copied_files += 1,
                SyncAction::DeleteFile => summary.deleted_files += 1,
                SyncAction::DeleteDir => summary.deleted_dirs += 1,
                SyncAction::ReadDir => {}
            }
        }

        summary
    }
}

/// Per-action counts of successful records, plus failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created_dirs: usize,
    pub copied_files: usize,
    pub deleted_files: usize,
    pub deleted_dirs: usize,
    pub failed: usize,
}

impl SyncSummary {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories created, {} files copied, {} files deleted, {} directories deleted, {} failed",
            self.created_dirs, self.copied_files, self.deleted_files, self.deleted_dirs, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome() -> SyncOutcome {
        let mut outcome = SyncOutcome::new();
        outcome.record(SyncAction::CreateDir, Path::new("sub"), None, Path::new("/r/sub"), Ok(()));
        outcome.record(
            SyncAction::CopyFile,
            Path::new("a.txt"),
            Some(Path::new("/s/a.txt")),
            Path::new("/r/a.txt"),
            Ok(()),
        );
        outcome.record(
            SyncAction::CopyFile,
            Path::new("b.txt"),
            Some(Path::new("/s/b.txt")),
            Path::new("/r/b.txt"),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        outcome.record(SyncAction::DeleteFile, Path::new("old.txt"), None, Path::new("/r/old.txt"), Ok(()));
        outcome
    }

    #[test]
    fn test_records_keep_order() {
        let outcome = outcome();
        let paths: Vec<_> = outcome.records().iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("sub"),
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("old.txt")
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let summary = outcome().summary();
        assert_eq!(
            summary,
            SyncSummary {
                created_dirs: 1,
                copied_files: 1,
                deleted_files: 1,
                deleted_dirs: 0,
                failed: 1,
            }
        );
        assert!(!summary.is_clean());
        assert!(SyncOutcome::new().summary().is_clean());
    }

    #[test]
    fn test_filters() {
        let outcome = outcome();
        assert_eq!(outcome.with_action(SyncAction::CopyFile).count(), 2);
        assert_eq!(outcome.errors().count(), 1);
        assert_eq!(outcome.len(), 4);
    }

    #[test]
    fn test_action_names() {
        assert_eq!(SyncAction::CreateDir.to_string(), "CREATE_DIR");
        assert_eq!(SyncAction::DeleteDir.to_string(), "DELETE_DIR");
    }
}
