//! Release orchestration
//!
//! # Core Invariants
//!
//! 1. **A published version is never rebuilt**
//!    - The download URL is probed first; `200`/`302` aborts before any write
//!    - The `test` version skips the probe and never touches the index
//!
//! 2. **Files are edited line by line, never reserialized**
//!    - Only the delimited value changes; formatting survives
//!    - A file is only rewritten after every required field was found in it
//!
//! 3. **Steps are sequential and not transactional**
//!    - A later failure leaves earlier steps' results on disk
//!
//! # Architecture
//!
//! - **version**: `major.minor.patch` / `test` argument parsing
//! - **remote**: HEAD probe behind the `ReleaseProbe` trait
//! - **pipeline**: `ReleaseContext::run`, the ordered steps

pub mod pipeline;
pub mod remote;
pub mod version;

pub use pipeline::{ReleaseContext, ReleaseSummary, StepLog};
pub use remote::HttpProbe;
pub use version::ReleaseVersion;
