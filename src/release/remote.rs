//! Published-release existence check
//!
//! Before anything is rewritten, the expected download URL is probed with a
//! HEAD request. A `200` or `302` means the version is already out.

use crate::core::error::{ReleaseError, ReleaseResult};
use std::time::Duration;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of HTTP status codes for a release URL
pub trait ReleaseProbe {
  /// Status code returned by a HEAD request to `url`, redirects not followed
  fn status(&self, url: &str) -> ReleaseResult<u16>;
}

/// Blocking reqwest-backed probe
pub struct HttpProbe {
  client: reqwest::blocking::Client,
}

impl HttpProbe {
  pub fn new(timeout: Duration) -> ReleaseResult<Self> {
    let client = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .connect_timeout(HTTP_CONNECT_TIMEOUT)
      .redirect(reqwest::redirect::Policy::none())
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client })
  }
}

impl ReleaseProbe for HttpProbe {
  fn status(&self, url: &str) -> ReleaseResult<u16> {
    let response = self.client.head(url).send()?;
    Ok(response.status().as_u16())
  }
}

/// True if `status` means the artifact is already published
pub fn is_published(status: u16) -> bool {
  status == 200 || status == 302
}

/// Fail with a conflict if `url` is already published
pub fn ensure_unreleased(probe: &dyn ReleaseProbe, url: &str) -> ReleaseResult<()> {
  let status = probe.status(url)?;
  tracing::debug!(%url, status, "release probe");

  if is_published(status) {
    return Err(ReleaseError::Conflict { url: url.to_string() });
  }
  Ok(())
}
