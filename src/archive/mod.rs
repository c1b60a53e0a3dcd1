//! Release archive packaging
//!
//! The plugin directory's contents are zipped with paths relative to the
//! directory itself, so `MIPMixer/install.xml` lands as `install.xml` at the
//! archive root. Walk order is sorted for reproducible entry order.

pub mod digest;

use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::ui::progress::FileProgress;
use crate::utils::archive_entry_name;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub use digest::Sha1Digest;

/// Number of files before a progress bar is shown
const PROGRESS_THRESHOLD: usize = 64;

/// A finished release archive
#[derive(Debug, Clone)]
pub struct Archive {
  pub path: PathBuf,
  /// File entries written (directories not counted)
  pub files: usize,
}

enum EntryKind {
  Dir,
  File,
}

struct PendingEntry {
  source: PathBuf,
  name: String,
  kind: EntryKind,
  mode: Option<u32>,
}

/// Zip the contents of `source` into `dest`, replacing any existing file
pub fn build_archive(source: &Path, dest: &Path) -> ReleaseResult<Archive> {
  if !source.is_dir() {
    return Err(ReleaseError::Io(io::Error::new(
      io::ErrorKind::NotFound,
      format!("plugin directory not found: {}", source.display()),
    )));
  }

  let entries = collect_entries(source)?;
  let file_count = entries.iter().filter(|e| matches!(e.kind, EntryKind::File)).count();
  tracing::debug!(source = %source.display(), entries = entries.len(), files = file_count, "archiving");

  let out = File::create(dest).with_context(|| format!("Failed to create {}", dest.display()))?;
  let mut zip = ZipWriter::new(BufWriter::new(out));
  let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
  let mut progress = FileProgress::for_at_least(file_count, PROGRESS_THRESHOLD, "Archiving");

  for entry in &entries {
    let options = match entry.mode {
      Some(mode) => base.unix_permissions(mode),
      None => base,
    };

    match entry.kind {
      EntryKind::Dir => zip.add_directory(format!("{}/", entry.name), options)?,
      EntryKind::File => {
        zip.start_file(entry.name.as_str(), options)?;
        let mut input =
          File::open(&entry.source).with_context(|| format!("Failed to read {}", entry.source.display()))?;
        io::copy(&mut input, &mut zip)?;
        tracing::trace!(entry = %entry.name, "added");
        if let Some(p) = progress.as_mut() {
          p.inc();
        }
      }
    }
  }

  zip.finish()?;

  Ok(Archive {
    path: dest.to_path_buf(),
    files: file_count,
  })
}

fn collect_entries(source: &Path) -> ReleaseResult<Vec<PendingEntry>> {
  let mut entries = Vec::new();

  for entry in WalkDir::new(source).follow_links(false).sort_by_file_name().min_depth(1) {
    let entry = entry?;
    let rel = entry.path().strip_prefix(source)?;
    let name = archive_entry_name(rel);

    let file_type = entry.file_type();
    let kind = if file_type.is_dir() {
      EntryKind::Dir
    } else if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
      // symlinked files are stored by content
      EntryKind::File
    } else {
      tracing::debug!(path = %entry.path().display(), "skipping non-regular entry");
      continue;
    };

    entries.push(PendingEntry {
      source: entry.path().to_path_buf(),
      name,
      kind,
      mode: unix_mode(entry.path()),
    });
  }

  Ok(entries)
}

#[cfg(unix)]
fn unix_mode(path: &Path) -> Option<u32> {
  use std::os::unix::fs::PermissionsExt;
  std::fs::metadata(path).ok().map(|m| m.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn unix_mode(_path: &Path) -> Option<u32> {
  None
}
