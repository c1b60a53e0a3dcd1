//! Release version argument parsing
//!
//! A release version is either `major.minor.patch` (three non-negative
//! integers of any length) or the literal `test`, which builds the archive without touching
//! the network or the repository index.

use crate::core::error::{ReleaseError, ReleaseResult, ValidationError};
use std::fmt;

/// Literal accepted in place of a version to run a local dry build
pub const TEST_VERSION: &str = "test";

/// A validated version argument
///
/// The original text is kept verbatim so every substitution writes exactly
/// what the user typed. The parsed `semver` form is only present when every
/// component fits in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
  text: String,
  test: bool,
  semver: Option<semver::Version>,
}

impl ReleaseVersion {
  /// Parse a command-line version argument
  pub fn parse(input: &str) -> ReleaseResult<Self> {
    if input == TEST_VERSION {
      return Ok(Self {
        text: input.to_string(),
        test: true,
        semver: None,
      });
    }

    let invalid = || ReleaseError::Validation(ValidationError::InvalidVersion {
      input: input.to_string(),
    });

    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
      return Err(invalid());
    }

    if parts.iter().any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit())) {
      return Err(invalid());
    }

    let numbers: Vec<u64> = parts.iter().filter_map(|part| part.parse().ok()).collect();
    let semver = match numbers.as_slice() {
      &[major, minor, patch] => Some(semver::Version::new(major, minor, patch)),
      _ => None,
    };

    Ok(Self {
      text: input.to_string(),
      test: false,
      semver,
    })
  }

  /// True for the `test` bypass value
  pub fn is_test(&self) -> bool {
    self.test
  }

  /// Numeric version, absent in test mode or when a component overflows `u64`
  pub fn semver(&self) -> Option<&semver::Version> {
    self.semver.as_ref()
  }

  pub fn as_str(&self) -> &str {
    &self.text
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}
