//! Platform services: terminal output backends and logging setup

pub mod output;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
