//! CLI library components for the `dpp` binary.

pub mod commands;
pub mod logging;
pub mod types;
