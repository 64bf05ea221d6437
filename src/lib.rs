// Replica Sync Library
// One-way periodic synchronization of a replica folder with a source folder

// Core infrastructure - configuration, logging, errors and the scheduler
pub mod core;

// Operations - hashing and the sync pass
pub mod operations;

// Render - outcome to log lines
pub mod render;

// Utilities - helper functions and tools
pub mod utilities;

// Re-export commonly used items for convenience
pub use self::core::{App, AppConfig, ConfigFile, Shutdown, SyncError};
pub use operations::{
    ContentHasher, Digest, DigestAlgorithm, Hasher, SyncAction, SyncEngine, SyncOutcome, SyncRecord,
    SyncSummary,
};

/// Run one pass with the default hasher
///
/// Convenience for callers that do not need a configured engine.
pub fn sync(
    source: &std::path::Path,
    replica: &std::path::Path,
) -> Result<SyncOutcome, SyncError> {
    SyncEngine::new(Hasher::default()).sync(source, replica)
}
