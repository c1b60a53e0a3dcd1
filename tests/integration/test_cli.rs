//! Command-line handling and fatal-error reporting

use crate::helpers::{MANIFEST, TestWorkspace, run_release_raw, stdout};
use anyhow::Result;

#[test]
fn test_no_arguments_prints_usage() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let output = run_release_raw(&ws.path, &[])?;

  assert_eq!(output.status.code(), Some(255));
  assert_eq!(stdout(&output).trim(), "Usage: plugin-release <major>.<minor>.<patch>");
  assert_eq!(ws.read_file("MIPMixer/install.xml")?, MANIFEST);

  Ok(())
}

#[test]
fn test_extra_arguments_print_usage() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let output = run_release_raw(&ws.path, &["1.2.3", "4.5.6"])?;

  assert_eq!(output.status.code(), Some(255));
  assert!(stdout(&output).starts_with("Usage: "));

  Ok(())
}

#[test]
fn test_invalid_version_is_fatal() -> Result<()> {
  let ws = TestWorkspace::new()?;

  for bad in ["1.2", "1.2.3.4", "a.b.c", "1.2.x", "-1.2.3"] {
    let output = run_release_raw(&ws.path, &[bad])?;
    assert_eq!(output.status.code(), Some(255), "{bad}");
    assert_eq!(stdout(&output).trim(), "ERROR: Invalid version number", "{bad}");
  }

  assert_eq!(ws.read_file("MIPMixer/install.xml")?, MANIFEST);
  Ok(())
}

#[test]
fn test_missing_config_is_fatal() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::remove_file(ws.path.join("release.toml"))?;

  let output = run_release_raw(&ws.path, &["test"])?;
  assert_eq!(output.status.code(), Some(255));
  assert!(stdout(&output).starts_with("ERROR: No plugin-release configuration found."));
  assert!(!ws.file_exists("lms-mipmixer-test.zip"));

  Ok(())
}

#[test]
fn test_config_missing_key_is_fatal() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let broken = ws.read_file("release.toml")?.replace("plugin = \"MIPMixer\"\n", "");
  ws.write_file("release.toml", &broken)?;

  let output = run_release_raw(&ws.path, &["test"])?;
  assert_eq!(output.status.code(), Some(255));
  let out = stdout(&output);
  assert!(out.starts_with("ERROR: Failed to parse config release.toml"), "{out}");
  assert_eq!(ws.read_file("MIPMixer/install.xml")?, MANIFEST);

  Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let custom = ws.read_file("release.toml")?.replace("lms-mipmixer", "custom-name");
  std::fs::remove_file(ws.path.join("release.toml"))?;
  ws.write_file("ci.toml", &custom)?;

  let output = run_release_raw(&ws.path, &["test", "--config", "ci.toml"])?;
  assert!(output.status.success(), "{}", stdout(&output));
  assert!(ws.file_exists("custom-name-test.zip"));

  Ok(())
}

#[test]
fn test_missing_manifest_version_tag() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let manifest = MANIFEST.replace("  <version>1.0.0</version>\n", "");
  ws.write_file("MIPMixer/install.xml", &manifest)?;

  let output = run_release_raw(&ws.path, &["test"])?;

  assert_eq!(output.status.code(), Some(255));
  let out = stdout(&output);
  assert!(out.contains("INFO: Updating MIPMixer/install.xml"), "{out}");
  assert!(
    out.lines().any(|l| l == "ERROR: Failed to update version in MIPMixer/install.xml"),
    "{out}"
  );
  assert_eq!(ws.read_file("MIPMixer/install.xml")?, manifest);
  assert!(!ws.file_exists("lms-mipmixer-test.zip"));

  Ok(())
}

#[test]
fn test_missing_plugin_dir_is_system_error() -> Result<()> {
  let ws = TestWorkspace::new()?;
  std::fs::remove_dir_all(ws.path.join("MIPMixer"))?;

  let output = run_release_raw(&ws.path, &["test"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: "));

  Ok(())
}

#[test]
fn test_help_exits_zero() -> Result<()> {
  let ws = TestWorkspace::new()?;
  let output = run_release_raw(&ws.path, &["--help"])?;
  assert!(output.status.success());
  assert!(stdout(&output).contains("--config"));
  Ok(())
}
