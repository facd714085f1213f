//! Shared pieces of the territory tracker CLI: persisted settings and the
//! logging bootstrap. The command surface itself lives in the binary.

pub mod config;
pub mod logging;
