//! Utility functions for cross-platform path handling

use std::path::{Component, Path};

/// Convert a relative path to a zip entry name (always forward slashes)
///
/// Zip entry names use `/` as separator on every platform. `.` components
/// are dropped so `./a/b` and `a/b` produce the same entry.
pub fn archive_entry_name(path: &Path) -> String {
  path
    .components()
    .filter_map(|c| match c {
      Component::Normal(part) => Some(part.to_string_lossy()),
      _ => None,
    })
    .collect::<Vec<_>>()
    .join("/")
}

/// Name the program was invoked as, for usage lines
pub fn program_name(argv0: Option<&str>) -> String {
  argv0
    .and_then(|a| Path::new(a).file_name())
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
