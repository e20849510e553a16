use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "prefixout_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

// Diagnostics share stderr with the relayed child output; keep them quiet.
fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Size of the per-stream read buffer used by the relay pumps.
    #[serde(default = "default_read_buffer_bytes")]
    pub read_buffer_bytes: usize,

    /// Hand the parent's stdin to the child instead of the null device.
    #[serde(default)]
    pub inherit_stdin: bool,

    /// Listen for Ctrl-C; a second interrupt kills the child.
    #[serde(default = "default_handle_interrupts")]
    pub handle_interrupts: bool,
}

fn default_read_buffer_bytes() -> usize {
    16 * 1024
}

fn default_handle_interrupts() -> bool {
    true
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            read_buffer_bytes: default_read_buffer_bytes(),
            inherit_stdin: false,
            handle_interrupts: default_handle_interrupts(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Never,
    Auto,
    Always,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" | "off" | "false" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            "always" | "on" | "true" => Ok(ColorMode::Always),
            other => Err(format!("unknown color mode '{other}'")),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.relay.read_buffer_bytes == 0 {
            return Err("relay.read_buffer_bytes must be greater than zero".to_string());
        }
        if self.logging.enabled && !self.logging.console && !self.logging.file {
            return Err("logging enabled but both console and file are off".to_string());
        }
        Ok(())
    }
}
