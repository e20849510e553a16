use std::collections::HashMap;

use super::exit::ChildExit;

#[derive(Debug, Clone, Default)]
pub struct RunnerStartArgs {
    pub cmd: String,
    pub args: Vec<String>,
    pub envs: HashMap<String, String>,
    pub inherit_stdin: bool,
}

impl RunnerStartArgs {
    pub fn new(cmd: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayOptions {
    pub read_buffer_bytes: usize,
    pub handle_interrupts: bool,
}

impl Default for RelayOptions {
    fn default() -> Self {
        Self {
            read_buffer_bytes: 16 * 1024,
            handle_interrupts: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    pub exit: ChildExit,
    pub stdout_bytes: u64,
    pub stderr_bytes: u64,
    pub duration_ms: u64,
}
