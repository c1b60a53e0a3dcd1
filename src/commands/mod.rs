//! CLI commands for plugin-release
//!
//! - **release**: bump, package, hash and index a plugin version

pub mod release;

pub use release::run_release;
