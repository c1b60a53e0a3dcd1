//! Sequential release pipeline
//!
//! check remote → bump manifest → zip plugin dir → SHA-1 → patch repo index
//!
//! Each step finishes its file I/O before the next starts. Nothing is rolled
//! back: if the index update fails, the manifest bump and archive remain.

use crate::archive::{Sha1Digest, build_archive};
use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::patch::{IndexValues, update_index, update_manifest};
use crate::release::remote::{ReleaseProbe, ensure_unreleased};
use crate::release::version::ReleaseVersion;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Sink for the one-line progress messages printed as `INFO: ...`
pub trait StepLog {
  fn info(&mut self, message: &str);
}

/// Everything a release run needs, resolved once
pub struct ReleaseContext {
  /// Working directory; empty means the process's current directory
  pub root: PathBuf,
  pub config: ReleaseConfig,
}

/// What a release run produced
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSummary {
  pub version: String,
  pub test_mode: bool,
  pub manifest: PathBuf,
  pub archive: PathBuf,
  pub files: usize,
  pub sha1: Sha1Digest,
  /// Published download URL; absent in test mode
  pub url: Option<String>,
  /// Index file rewritten, if any
  pub index: Option<PathBuf>,
}

impl ReleaseContext {
  pub fn new(root: impl Into<PathBuf>, config: ReleaseConfig) -> Self {
    Self {
      root: root.into(),
      config,
    }
  }

  /// Resolve a path relative to the working directory
  pub fn resolve(&self, rel: &Path) -> PathBuf {
    if self.root.as_os_str().is_empty() {
      rel.to_path_buf()
    } else {
      self.root.join(rel)
    }
  }

  /// Run the whole pipeline for `version`
  pub fn run(
    &self,
    version: &ReleaseVersion,
    probe: &dyn ReleaseProbe,
    log: &mut dyn StepLog,
  ) -> ReleaseResult<ReleaseSummary> {
    let v = version.as_str();
    let url = (!version.is_test()).then(|| self.config.release_url(v));
    tracing::debug!(version = v, semver = ?version.semver(), "starting release");

    if let Some(url) = &url {
      log.info(&format!("Checking {}", url));
      ensure_unreleased(probe, url)?;
    }

    let manifest = self.resolve(&self.config.manifest_path());
    log.info(&format!("Updating {}", manifest.display()));
    update_manifest(&manifest, v)?;

    log.info("Creating ZIP");
    let plugin_dir = self.resolve(Path::new(&self.config.project.plugin));
    let dest = self.resolve(Path::new(&self.config.archive_name(v)));
    let archive = build_archive(&plugin_dir, &dest)?;

    log.info("Generating SHA1");
    let sha1 = Sha1Digest::of_file(&archive.path)?;

    let mut index = None;
    if let Some(url) = &url {
      let index_path = self.resolve(&self.config.index.path);
      if index_path.exists() {
        log.info(&format!("Updating {}", index_path.display()));
        let values = IndexValues {
          version: v,
          url,
          sha: sha1.as_str(),
        };
        update_index(&index_path, self.config.index_section(), &values)?;
        index = Some(index_path);
      } else {
        tracing::debug!(path = %index_path.display(), "no repository index, skipping");
      }
    }

    Ok(ReleaseSummary {
      version: v.to_string(),
      test_mode: version.is_test(),
      manifest,
      archive: archive.path,
      files: archive.files,
      sha1,
      url,
      index,
    })
  }
}
