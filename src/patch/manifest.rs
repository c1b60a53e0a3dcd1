//! Plugin manifest (`install.xml`) version bump

use super::{read_lines, replace_between, write_lines};
use crate::core::error::{Field, ReleaseError, ReleaseResult};
use std::path::Path;

const VERSION_OPEN: &str = "<version>";
const VERSION_CLOSE: &str = "</version>";

/// Rewrite the first `<version>` tag in `lines`, returning whether one was found
pub fn patch_version(lines: &mut [String], version: &str) -> bool {
  for line in lines.iter_mut() {
    if let Some(updated) = replace_between(line, VERSION_OPEN, VERSION_CLOSE, version) {
      *line = updated;
      return true;
    }
  }
  false
}

/// Bump the manifest at `path` to `version`
///
/// The file is only rewritten once a `<version>` tag has been replaced.
pub fn update_manifest(path: &Path, version: &str) -> ReleaseResult<()> {
  let mut lines = read_lines(path)?;

  if !patch_version(&mut lines, version) {
    return Err(ReleaseError::MissingField {
      field: Field::Version,
      file: path.to_path_buf(),
    });
  }

  write_lines(path, &lines)?;
  tracing::debug!(path = %path.display(), %version, "manifest updated");
  Ok(())
}
