//! Repository index (`repo.xml`) update
//!
//! The index lists many plugins. Only the lines of the target
//! `<plugin name="...">` section are edited: its `version="..."` attribute,
//! its `<url>` and its `<sha>`. A section runs from its opening tag to the
//! next `<plugin name="` line.

use super::{read_lines, replace_between, write_lines};
use crate::core::error::{Field, ReleaseError, ReleaseResult};
use std::path::Path;

const SECTION_MARKER: &str = "<plugin name=\"";

/// New values written into the plugin's index entry
#[derive(Debug, Clone)]
pub struct IndexValues<'a> {
  pub version: &'a str,
  pub url: &'a str,
  pub sha: &'a str,
}

/// Which index fields were rewritten at least once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexUpdate {
  pub version: bool,
  pub url: bool,
  pub sha: bool,
}

impl IndexUpdate {
  pub fn is_complete(&self) -> bool {
    self.version && self.url && self.sha
  }

  /// First field never rewritten, checked in version, url, sha order
  pub fn first_missing(&self) -> Option<Field> {
    if !self.version {
      Some(Field::Version)
    } else if !self.url {
      Some(Field::Url)
    } else if !self.sha {
      Some(Field::Sha)
    } else {
      None
    }
  }
}

/// Patch `lines` in place, scoped to `section` when given
///
/// Scanning stops at the first line after which all three fields have been
/// rewritten. With no section, the whole file counts as the target.
pub fn patch_index(lines: &mut [String], section: Option<&str>, values: &IndexValues<'_>) -> IndexUpdate {
  let mut update = IndexUpdate::default();
  let mut in_section = section.is_none();

  for line in lines.iter_mut() {
    if let Some(name) = section
      && line.contains(SECTION_MARKER)
    {
      in_section = line.contains(name);
    }

    if !in_section {
      continue;
    }

    if let Some(updated) = replace_between(line, "version=\"", "\"", values.version) {
      *line = updated;
      update.version = true;
    }
    if let Some(updated) = replace_between(line, "<url>", "</url>", values.url) {
      *line = updated;
      update.url = true;
    }
    if let Some(updated) = replace_between(line, "<sha>", "</sha>", values.sha) {
      *line = updated;
      update.sha = true;
    }

    if update.is_complete() {
      break;
    }
  }

  update
}

/// Update the index file at `path`
///
/// The file is rewritten only when all three fields were found; otherwise it
/// is left untouched and the first missing field is reported.
pub fn update_index(path: &Path, section: Option<&str>, values: &IndexValues<'_>) -> ReleaseResult<IndexUpdate> {
  let mut lines = read_lines(path)?;
  let update = patch_index(&mut lines, section, values);
  tracing::debug!(path = %path.display(), ?section, ?update, "index scan finished");

  if let Some(field) = update.first_missing() {
    return Err(ReleaseError::MissingField {
      field,
      file: path.to_path_buf(),
    });
  }

  write_lines(path, &lines)?;
  Ok(update)
}
