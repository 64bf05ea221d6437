// Operations module
// Business logic for hashing, the sync pass and its outcome

pub mod entry;
pub mod hash;
pub mod outcome;
pub mod sync;

pub use entry::FileEntry;
pub use hash::{ContentHasher, Digest, DigestAlgorithm, Hasher, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use outcome::{SyncAction, SyncOutcome, SyncRecord, SyncSummary};
pub use sync::SyncEngine;
