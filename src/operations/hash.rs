// Content Hasher
// Streams a file through a digest so replica files can be compared with their source

use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Default number of bytes read per chunk
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest chunk buffer a hasher will allocate (64 MiB)
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Digest algorithm used for change detection
///
/// `Md5` only guards against accidental divergence. It is not a security
/// primitive: pick `Sha256` or `Blake3` when the replica may be tampered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" => Ok(Self::Blake3),
            other => Err(format!("unknown digest algorithm: {other}")),
        }
    }
}

/// Fixed-length fingerprint of a file's content
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: DigestAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}:{})", self.algorithm, self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Source of content digests for the synchronizer
pub trait ContentHasher {
    /// Digest the file at `path`; open and read failures are returned, never
    /// folded into a "different" answer
    fn digest(&self, path: &Path) -> io::Result<Digest>;
}

/// Streaming file hasher with bounded memory use
#[derive(Debug, Clone)]
pub struct Hasher {
    algorithm: DigestAlgorithm,
    chunk_size: usize,
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default(), DEFAULT_CHUNK_SIZE)
    }
}

impl Hasher {
    /// Create a hasher; a zero chunk size falls back to the default and
    /// larger ones are capped at [`MAX_CHUNK_SIZE`]
    pub fn new(algorithm: DigestAlgorithm, chunk_size: usize) -> Self {
        let chunk_size = match chunk_size {
            0 => DEFAULT_CHUNK_SIZE,
            n => n.min(MAX_CHUNK_SIZE),
        };
        Self { algorithm, chunk_size }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Digest everything readable from `reader`
    pub fn digest_reader<R: Read>(&self, reader: R) -> io::Result<Digest> {
        let bytes = match self.algorithm {
            DigestAlgorithm::Md5 => {
                let mut hasher = md5::Md5::new();
                fold_chunks(reader, self.chunk_size, |chunk| hasher.update(chunk))?;
                hasher.finalize().to_vec()
            }
            DigestAlgorithm::Sha256 => {
                let mut hasher = sha2::Sha256::new();
                fold_chunks(reader, self.chunk_size, |chunk| hasher.update(chunk))?;
                hasher.finalize().to_vec()
            }
            DigestAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                fold_chunks(reader, self.chunk_size, |chunk| {
                    hasher.update(chunk);
                })?;
                hasher.finalize().as_bytes().to_vec()
            }
        };

        Ok(Digest {
            algorithm: self.algorithm,
            bytes,
        })
    }
}

impl ContentHasher for Hasher {
    fn digest(&self, path: &Path) -> io::Result<Digest> {
        let file = File::open(path)?;
        self.digest_reader(file)
    }
}

/// Read `reader` to the end in `chunk_size` pieces
fn fold_chunks<R: Read>(
    mut reader: R,
    chunk_size: usize,
    mut update: impl FnMut(&[u8]),
) -> io::Result<()> {
    let mut buffer = vec![0u8; chunk_size];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(n) => update(&buffer[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
