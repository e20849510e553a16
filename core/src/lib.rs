//! Core of `prefixout`: rebuilds lines from a child's raw output streams,
//! prefixes them, and relays them to the parent's stdout/stderr.
pub mod config;
pub mod error;
pub mod line;
pub mod runner;
pub mod util;

pub use error::{CliError, RunnerError};
pub use line::{LineBuffer, PrefixConfig, StreamRole, StreamSink};
