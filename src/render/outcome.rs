// Outcome rendering
// One log line per record: info for completed actions, error for failures

use tracing::{debug, error, info};

use crate::operations::{SyncAction, SyncOutcome, SyncRecord};

/// Human-readable message for one record
pub fn describe(record: &SyncRecord) -> String {
    let replica = record.replica_path.display();
    let source = record
        .source_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    match (&record.action, &record.error) {
        (SyncAction::CreateDir, None) => format!("Created directory: {replica}"),
        (SyncAction::CreateDir, Some(e)) => format!("Error creating directory {replica}: {e}"),
        (SyncAction::CopyFile, None) => format!("Copied file from {source} to {replica}"),
        (SyncAction::CopyFile, Some(e)) => {
            format!("Error copying file from {source} to {replica}: {e}")
        }
        (SyncAction::DeleteFile, None) => format!("Deleted file: {replica}"),
        (SyncAction::DeleteFile, Some(e)) => format!("Error deleting file {replica}: {e}"),
        (SyncAction::DeleteDir, None) => format!("Deleted directory: {replica}"),
        (SyncAction::DeleteDir, Some(e)) => format!("Error deleting directory {replica}: {e}"),
        (SyncAction::ReadDir, Some(e)) => format!("Error reading directory: {e}"),
        (SyncAction::ReadDir, None) => format!("Read directory: {replica}"),
    }
}

/// Emit every record of a pass, then a debug-level summary
pub fn log_outcome(outcome: &SyncOutcome) {
    for record in outcome.records() {
        let message = describe(record);
        if record.is_error() {
            error!("{message}");
        } else {
            info!("{message}");
        }
    }

    debug!("Pass summary: {}", outcome.summary());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn record(action: SyncAction, error: Option<io::Error>) -> SyncRecord {
        SyncRecord {
            action,
            path: PathBuf::from("a.txt"),
            source_path: Some(PathBuf::from("/s/a.txt")),
            replica_path: PathBuf::from("/r/a.txt"),
            error,
        }
    }

    #[test]
    fn test_success_messages() {
        assert_eq!(
            describe(&record(SyncAction::CopyFile, None)),
            "Copied file from /s/a.txt to /r/a.txt"
        );
        assert_eq!(describe(&record(SyncAction::CreateDir, None)), "Created directory: /r/a.txt");
        assert_eq!(describe(&record(SyncAction::DeleteFile, None)), "Deleted file: /r/a.txt");
        assert_eq!(describe(&record(SyncAction::DeleteDir, None)), "Deleted directory: /r/a.txt");
    }

    #[test]
    fn test_error_messages() {
        let denied = || Some(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

        assert_eq!(
            describe(&record(SyncAction::CopyFile, denied())),
            "Error copying file from /s/a.txt to /r/a.txt: denied"
        );
        assert_eq!(
            describe(&record(SyncAction::DeleteFile, denied())),
            "Error deleting file /r/a.txt: denied"
        );
        assert_eq!(
            describe(&record(SyncAction::ReadDir, denied())),
            "Error reading directory: denied"
        );
    }
}
