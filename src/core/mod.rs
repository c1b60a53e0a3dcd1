//! Core building blocks shared by every step
//!
//! - **config**: release.toml parsing and validation
//! - **error**: error types, exit codes and the top-level printer
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
