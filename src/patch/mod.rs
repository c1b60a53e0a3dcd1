//! Line-oriented in-place text patching
//!
//! Both the plugin manifest and the repository index are edited as plain
//! text, one line at a time, so that everything not explicitly replaced
//! (indentation, comments, attribute order, line endings) survives untouched.
//!
//! - **manifest**: rewrite the `<version>` tag of `install.xml`
//! - **index**: rewrite version, url and sha inside one `<plugin name="...">` section

pub mod index;
pub mod manifest;

use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::path::Path;

pub use index::{IndexValues, update_index};
pub use manifest::update_manifest;

/// Replace the text between the first `start` and the next `end` after it
///
/// Returns `None` when either delimiter is missing, so "no match on this
/// line" is distinguishable from "matched and replaced with the same text".
pub fn replace_between(line: &str, start: &str, end: &str, replacement: &str) -> Option<String> {
  let open = line.find(start)? + start.len();
  let close = open + line[open..].find(end)?;

  let mut out = String::with_capacity(line.len() - (close - open) + replacement.len());
  out.push_str(&line[..open]);
  out.push_str(replacement);
  out.push_str(&line[close..]);
  Some(out)
}

/// Read a file as lines, each keeping its own terminator
pub(crate) fn read_lines(path: &Path) -> ReleaseResult<Vec<String>> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  Ok(content.split_inclusive('\n').map(String::from).collect())
}

/// Overwrite a file with `lines` concatenated as-is
pub(crate) fn write_lines(path: &Path, lines: &[String]) -> ReleaseResult<()> {
  fs::write(path, lines.concat()).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(())
}
