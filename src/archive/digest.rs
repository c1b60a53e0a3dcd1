//! SHA-1 checksum of the release archive, as published in the repository index

use crate::core::error::{ReleaseResult, ResultExt};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Read size used while hashing
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-1 digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sha1Digest(String);

impl Sha1Digest {
  /// Hash everything `reader` yields, `CHUNK_SIZE` bytes at a time
  pub fn from_reader<R: Read>(mut reader: R) -> ReleaseResult<Self> {
    let mut hasher = Sha1::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
      let n = match reader.read(&mut buf) {
        Ok(0) => break,
        Ok(n) => n,
        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
        Err(e) => return Err(e.into()),
      };
      hasher.update(&buf[..n]);
    }

    Ok(Self(format!("{:x}", hasher.finalize())))
  }

  /// Hash a file without loading it into memory
  pub fn of_file(path: &Path) -> ReleaseResult<Self> {
    let file = File::open(path).with_context(|| format!("Failed to open {} for hashing", path.display()))?;
    let digest = Self::from_reader(file)?;
    tracing::debug!(path = %path.display(), sha1 = %digest, "archive hashed");
    Ok(digest)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Sha1Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
