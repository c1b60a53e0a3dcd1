//! Integration tests for local (`test`) release builds

use crate::helpers::{MANIFEST, REPO_XML, TestWorkspace, run_release, stdout};
use anyhow::Result;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;

#[test]
fn test_local_build_bumps_manifest() -> Result<()> {
  let ws = TestWorkspace::new()?;

  let output = run_release(&ws.path, &["test"])?;
  let out = stdout(&output);

  assert_eq!(
    ws.read_file("MIPMixer/install.xml")?,
    MANIFEST.replace("<version>1.0.0</version>", "<version>test</version>")
  );
  assert!(!out.contains("Checking"), "test builds never probe the release host");
  assert!(out.contains("INFO: Updating MIPMixer/install.xml"));
  assert!(out.contains("INFO: Creating ZIP"));
  assert!(out.contains("INFO: Generating SHA1"));

  Ok(())
}

#[test]
fn test_local_build_leaves_index_alone() -> Result<()> {
  let ws = TestWorkspace::new()?;
  run_release(&ws.path, &["test"])?;

  assert_eq!(ws.read_file("repo.xml")?, REPO_XML);
  Ok(())
}

#[test]
fn test_archive_matches_plugin_dir() -> Result<()> {
  let ws = TestWorkspace::new()?;
  run_release(&ws.path, &["test"])?;

  assert!(ws.file_exists("lms-mipmixer-test.zip"));

  let mut archive = zip::ZipArchive::new(File::open(ws.path.join("lms-mipmixer-test.zip"))?)?;
  let mut entries = BTreeMap::new();
  for i in 0..archive.len() {
    let mut entry = archive.by_index(i)?;
    if entry.is_dir() {
      continue;
    }
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    entries.insert(entry.name().to_string(), content);
  }

  let names: Vec<&str> = entries.keys().map(String::as_str).collect();
  assert_eq!(
    names,
    vec![
      "HTML/EN/plugins/MIPMixer/settings/basic.html",
      "Plugin.pm",
      "install.xml",
      "strings.txt",
    ]
  );
  // the archive carries the already-bumped manifest
  assert!(entries["install.xml"].contains("<version>test</version>"));
  assert_eq!(entries["Plugin.pm"], ws.read_file("MIPMixer/Plugin.pm")?);

  Ok(())
}

#[test]
fn test_json_summary() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let output = run_release(&ws.path, &["test", "--json"])?;

  let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("stdout should be JSON");
  assert_eq!(json["version"], "test");
  assert_eq!(json["test_mode"], true);
  assert_eq!(json["files"], 4);
  assert!(json["url"].is_null());
  assert!(json["index"].is_null());

  let bytes = std::fs::read(ws.path.join("lms-mipmixer-test.zip"))?;
  let expected = format!("{:x}", Sha1::digest(&bytes));
  assert_eq!(json["sha1"], expected.as_str());

  // progress lines move to stderr
  assert!(String::from_utf8_lossy(&output.stderr).contains("INFO: Creating ZIP"));

  Ok(())
}

#[test]
fn test_rebuild_is_repeatable() -> Result<()> {
  let ws = TestWorkspace::new()?;
  run_release(&ws.path, &["test"])?;
  let first = ws.read_file("MIPMixer/install.xml")?;

  run_release(&ws.path, &["test"])?;
  assert_eq!(ws.read_file("MIPMixer/install.xml")?, first);
  assert!(ws.file_exists("lms-mipmixer-test.zip"));

  Ok(())
}
