//! Release command implementation
//!
//! Wires config, the HTTP probe and console output into the release pipeline.

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::release::{HttpProbe, ReleaseContext, ReleaseSummary, ReleaseVersion, StepLog};
use std::path::PathBuf;
use std::time::Duration;

/// Console progress: stdout normally, stderr when stdout carries JSON
struct ConsoleLog {
  json: bool,
}

impl StepLog for ConsoleLog {
  fn info(&mut self, message: &str) {
    if self.json {
      eprintln!("INFO: {}", message);
    } else {
      println!("INFO: {}", message);
    }
  }
}

/// Run a release for `version` in the current directory
pub fn run_release(version: String, config_path: Option<PathBuf>, json: bool) -> ReleaseResult<()> {
  let version = ReleaseVersion::parse(&version)?;

  // empty root: paths stay relative to the current directory in messages
  let root = PathBuf::new();
  let config = ReleaseConfig::load(&root, config_path.as_deref())?;
  let probe = HttpProbe::new(Duration::from_secs(config.http.timeout_secs))?;
  let ctx = ReleaseContext::new(root, config);

  let summary = ctx.run(&version, &probe, &mut ConsoleLog { json })?;

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    print_summary(&summary);
  }

  Ok(())
}

fn print_summary(summary: &ReleaseSummary) {
  println!(
    "INFO: Created {} ({} files, sha1 {})",
    summary.archive.display(),
    summary.files,
    summary.sha1
  );
  if summary.test_mode {
    println!("INFO: Test build, repository index not updated");
  }
}
