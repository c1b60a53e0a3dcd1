use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for plugin-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  pub project: ProjectConfig,
  #[serde(default)]
  pub index: IndexConfig,
  #[serde(default)]
  pub http: HttpConfig,
}

/// What is being released and where it is published
///
/// # Example
///
/// ```toml
/// [project]
/// plugin = "MIPMixer"
/// git_name = "lms-mipmixer"
/// host = "https://github.com/CDrummond"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Plugin source directory, archived as the release payload
  pub plugin: String,

  /// Project name used for the archive file and the release URL
  pub git_name: String,

  /// Release host prefix, e.g. `https://github.com/<owner>`
  pub host: String,

  /// Manifest file inside the plugin directory
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,
}

fn default_manifest() -> PathBuf {
  PathBuf::from("install.xml")
}

/// Repository index (repo.xml) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
  /// Index file path, relative to the working directory
  #[serde(default = "default_index_path")]
  pub path: PathBuf,

  /// Plugin section to update (default: `project.plugin`)
  #[serde(default)]
  pub section: Option<String>,

  /// Restrict edits to the plugin section (false: first match anywhere)
  #[serde(default = "default_true")]
  pub scoped: bool,
}

fn default_index_path() -> PathBuf {
  PathBuf::from("repo.xml")
}

fn default_true() -> bool {
  true
}

impl Default for IndexConfig {
  fn default() -> Self {
    Self {
      path: default_index_path(),
      section: None,
      scoped: true,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
  /// Timeout for the release HEAD probe
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for HttpConfig {
  fn default() -> Self {
    Self {
      timeout_secs: default_timeout_secs(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, either from an explicit file or by searching `workspace_root`
  pub fn load(workspace_root: &Path, explicit: Option<&Path>) -> ReleaseResult<Self> {
    let config_path = match explicit {
      Some(p) => p.to_path_buf(),
      None => Self::find_config_path(workspace_root).ok_or_else(|| {
        ReleaseError::Config(ConfigError::NotFound {
          workspace_root: workspace_root.to_path_buf(),
        })
      })?,
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse_at(&content, Some(&config_path))?;

    tracing::debug!(path = %config_path.display(), "loaded release config");
    Ok(config)
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    Self::parse_at(content, None)
  }

  fn parse_at(content: &str, path: Option<&Path>) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content).map_err(|e| {
      ReleaseError::Config(ConfigError::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
      })
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Validate required fields
  pub fn validate(&self) -> ReleaseResult<()> {
    for (field, value) in [
      ("project.plugin", &self.project.plugin),
      ("project.git_name", &self.project.git_name),
      ("project.host", &self.project.host),
    ] {
      if value.trim().is_empty() {
        return Err(ReleaseError::Config(ConfigError::MissingField {
          field: field.to_string(),
        }));
      }
    }

    if let Some(section) = &self.index.section
      && section.trim().is_empty()
    {
      return Err(ReleaseError::Config(ConfigError::InvalidField {
        field: "index.section".to_string(),
        reason: "must name a plugin section".to_string(),
      }));
    }

    if !(self.project.host.starts_with("https://") || self.project.host.starts_with("http://")) {
      return Err(ReleaseError::Config(ConfigError::InvalidField {
        field: "project.host".to_string(),
        reason: format!("'{}' must start with http:// or https://", self.project.host),
      }));
    }

    if self.http.timeout_secs == 0 {
      return Err(ReleaseError::Config(ConfigError::InvalidField {
        field: "http.timeout_secs".to_string(),
        reason: "must be greater than zero".to_string(),
      }));
    }

    Ok(())
  }

  /// Path of the manifest, relative to the working directory
  pub fn manifest_path(&self) -> PathBuf {
    Path::new(&self.project.plugin).join(&self.project.manifest)
  }

  /// Plugin section name to scope index edits to, if scoping is on
  pub fn index_section(&self) -> Option<&str> {
    if !self.index.scoped {
      return None;
    }
    Some(self.index.section.as_deref().unwrap_or(&self.project.plugin))
  }

  /// Published download URL for `version`
  pub fn release_url(&self, version: &str) -> String {
    format!(
      "{}/{}/releases/download/{}/{}-{}.zip",
      self.project.host.trim_end_matches('/'),
      self.project.git_name,
      version,
      self.project.git_name,
      version
    )
  }

  /// Archive file name (without directory) for `version`
  pub fn archive_name(&self, version: &str) -> String {
    format!("{}-{}.zip", self.project.git_name, version)
  }
}
