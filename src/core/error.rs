//! Error types for plugin-release with contextual messages and exit codes
//!
//! Every failure in the pipeline is returned as a [`ReleaseError`] and handled
//! once, in `main`, which prints it and terminates the process. Nothing below
//! the top level calls `process::exit`.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for plugin-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Unexpected lower-level failure (I/O, network, zip)
  System = 1,
  /// Detected fatal condition (usage, bad version, already released, missing field)
  Fatal = 255,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for plugin-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Wrong command line
  Usage { program: String },

  /// Configuration errors
  Config(ConfigError),

  /// Input validation errors
  Validation(ValidationError),

  /// The version is already published at `url`
  Conflict { url: String },

  /// An expected tag or attribute was never rewritten
  MissingField { field: Field, file: PathBuf },

  /// I/O errors
  Io(io::Error),

  /// HTTP transport errors from the release probe
  Http(reqwest::Error),

  /// Zip writer errors
  Archive(zip::result::ZipError),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

/// Field rewritten by the manifest or index updaters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Version,
  Url,
  Sha,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Field::Version => write!(f, "version"),
      Field::Url => write!(f, "url"),
      Field::Sha => write!(f, "sha"),
    }
  }
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(e) => ReleaseError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Usage { .. }
      | ReleaseError::Config(_)
      | ReleaseError::Validation(_)
      | ReleaseError::Conflict { .. }
      | ReleaseError::MissingField { .. } => ExitCode::Fatal,
      ReleaseError::Io(_) | ReleaseError::Http(_) | ReleaseError::Archive(_) | ReleaseError::Message { .. } => {
        ExitCode::System
      }
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Validation(ValidationError::InvalidVersion { input }) => {
        Some(format!("'{}' is not of the form <major>.<minor>.<patch> (or `test`).", input))
      }
      ReleaseError::Conflict { url } => Some(format!("{} is already published. Pick a new version.", url)),
      ReleaseError::Http(_) => Some("Check network connectivity to the release host.".to_string()),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Usage { program } => write!(f, "Usage: {} <major>.<minor>.<patch>", program),
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Conflict { .. } => write!(f, "Version already exists"),
      ReleaseError::MissingField { field, file } => {
        write!(f, "Failed to update {} in {}", field, file.display())
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Http(e) => write!(f, "HTTP error: {}", e),
      ReleaseError::Archive(e) => write!(f, "Zip error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Http(e) => Some(e),
      ReleaseError::Archive(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<reqwest::Error> for ReleaseError {
  fn from(err: reqwest::Error) -> Self {
    ReleaseError::Http(err)
  }
}

impl From<zip::result::ZipError> for ReleaseError {
  fn from(err: zip::result::ZipError) -> Self {
    ReleaseError::Archive(err)
  }
}

impl From<walkdir::Error> for ReleaseError {
  fn from(err: walkdir::Error) -> Self {
    ReleaseError::message(format!("Directory walk error: {}", err))
  }
}

impl From<std::path::StripPrefixError> for ReleaseError {
  fn from(err: std::path::StripPrefixError) -> Self {
    ReleaseError::message(format!("Path strip prefix error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// release.toml not found
  NotFound { workspace_root: PathBuf },

  /// Config text is not valid TOML or does not match the schema
  Parse { path: Option<PathBuf>, message: String },

  /// Missing or empty required field
  MissingField { field: String },

  /// Field present but unusable
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some(
        "Create release.toml with a [project] table naming `plugin`, `git_name` and `host`.".to_string(),
      ),
      ConfigError::Parse { .. } => {
        Some("release.toml needs a [project] table with `plugin`, `git_name` and `host` strings.".to_string())
      }
      ConfigError::MissingField { field } => Some(format!("Add `{}` to release.toml.", field)),
      ConfigError::InvalidField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { workspace_root } => {
        write!(
          f,
          "No plugin-release configuration found.\nExpected file: {}",
          workspace_root.join("release.toml").display()
        )
      }
      ConfigError::Parse { path: Some(path), message } => {
        write!(f, "Failed to parse config {}: {}", path.display(), message.trim_end())
      }
      ConfigError::Parse { path: None, message } => write!(f, "Failed to parse config: {}", message.trim_end()),
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config field {}: {}", field, reason)
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// Version argument is not `major.minor.patch`
  InvalidVersion { input: String },
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::InvalidVersion { .. } => write!(f, "Invalid version number"),
    }
  }
}

/// Result type alias for plugin-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error the way the release script always has
///
/// Detected fatal conditions go to stdout as a single `ERROR:` line (usage
/// violations print the usage line instead). Lower-level failures go to
/// stderr with any help text.
pub fn print_error(error: &ReleaseError) {
  match error {
    ReleaseError::Usage { .. } => println!("{}", error),
    _ if error.exit_code() == ExitCode::Fatal => {
      println!("ERROR: {}", error);
      if let Some(help) = error.help_message() {
        eprintln!("Help: {}", help);
      }
    }
    _ => {
      eprintln!("ERROR: {}", error);
      if let Some(help) = error.help_message() {
        eprintln!("Help: {}", help);
      }
    }
  }
}
