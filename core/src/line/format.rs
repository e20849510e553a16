use crossterm::style::{style, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamRole {
    Stdout,
    Stderr,
}

impl StreamRole {
    pub fn label(self) -> &'static str {
        match self {
            StreamRole::Stdout => "stdout",
            StreamRole::Stderr => "stderr",
        }
    }
}

/// Per-stream decoration settings, fixed when the sink is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixConfig {
    prefix: String,
    timestamp: bool,
    color: bool,
    role: StreamRole,
}

impl PrefixConfig {
    pub fn new(prefix: impl Into<String>, role: StreamRole) -> Self {
        Self {
            prefix: prefix.into(),
            timestamp: false,
            color: false,
            role,
        }
    }

    pub fn with_timestamp(self, timestamp: bool) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_color(self, color: bool) -> Self {
        Self { color, ..self }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn timestamp(&self) -> bool {
        self.timestamp
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn role(&self) -> StreamRole {
        self.role
    }
}

/// Turns one complete line into the text of one output record.
pub trait LineFormat: Send {
    fn format(&self, config: &PrefixConfig, line: &[u8]) -> Vec<u8>;
}

/// Prefix placement with optional bold (stdout) or bold red (stderr) styling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixFormat;

impl LineFormat for PrefixFormat {
    fn format(&self, config: &PrefixConfig, line: &[u8]) -> Vec<u8> {
        format_line(config, line)
    }
}

pub fn format_line(config: &PrefixConfig, line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(config.prefix.len() + line.len() + 16);

    if config.color && !config.prefix.is_empty() {
        let styled = match config.role {
            StreamRole::Stdout => style(config.prefix.as_str()).bold(),
            StreamRole::Stderr => style(config.prefix.as_str()).bold().red(),
        };
        out.extend_from_slice(styled.to_string().as_bytes());
    } else {
        out.extend_from_slice(config.prefix.as_bytes());
    }

    // The body is never restyled.
    out.extend_from_slice(line);
    out
}
