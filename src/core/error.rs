// Error Taxonomy
// Fatal and per-entry failures of the synchronizer and its scheduler

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A required root (source or replica) is absent at startup
    #[error("Path: {} does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Read, copy, delete or mkdir failure on a single path
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A root exists but is not a directory
    #[error("Path: {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Source and replica overlap, so a pass would copy into or prune its own input
    #[error("Source {} and replica {} must not contain each other", source_root.display(), replica_root.display())]
    NestedRoots {
        source_root: PathBuf,
        replica_root: PathBuf,
    },

    /// Anything else that went wrong during a pass
    #[error("{0}")]
    Unexpected(String),
}

impl SyncError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_message() {
        let err = SyncError::PathNotFound(PathBuf::from("/data/source"));
        assert_eq!(err.to_string(), "Path: /data/source does not exist");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = SyncError::io("/data/replica", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "/data/replica: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}
