//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MANIFEST: &str = r#"<?xml version="1.0"?>
<extensions>
  <id>mipmixer@example.com</id>
  <name>MIPMixer</name>
  <version>1.0.0</version>
  <creator>Test Author</creator>
</extensions>
"#;

pub const REPO_XML: &str = r#"<?xml version="1.0"?>
<extensions>
  <plugins>
    <plugin name="MIPMixer" version="1.0.0" minTarget="7.9">
      <url>https://github.com/example/lms-mipmixer/releases/download/1.0.0/lms-mipmixer-1.0.0.zip</url>
      <sha>0000000000000000000000000000000000000000</sha>
    </plugin>
  </plugins>
</extensions>
"#;

pub const CONFIG: &str = r#"[project]
plugin = "MIPMixer"
git_name = "lms-mipmixer"
host = "https://github.com/example"
"#;

/// A plugin source tree with release.toml, install.xml and repo.xml
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new workspace with a small MIPMixer plugin
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    std::fs::write(path.join("release.toml"), CONFIG)?;
    std::fs::write(path.join("repo.xml"), REPO_XML)?;

    let plugin = path.join("MIPMixer");
    std::fs::create_dir_all(plugin.join("HTML/EN/plugins/MIPMixer/settings"))?;
    std::fs::write(plugin.join("install.xml"), MANIFEST)?;
    std::fs::write(plugin.join("Plugin.pm"), "package Plugins::MIPMixer::Plugin;\n\n1;\n")?;
    std::fs::write(
      plugin.join("HTML/EN/plugins/MIPMixer/settings/basic.html"),
      "[% PROCESS settings/header.html %]\n",
    )?;
    std::fs::write(plugin.join("strings.txt"), "PLUGIN_MIPMIXER\n\tEN\tMIP Mixer\n")?;

    Ok(Self { _root: root, path })
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  /// Write a file
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(path), content)?;
    Ok(())
  }
}

/// Run plugin-release, failing the test if it exits non-zero
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_release_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "plugin-release failed: plugin-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run plugin-release and hand back whatever it produced
pub fn run_release_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_plugin-release");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run plugin-release")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}
