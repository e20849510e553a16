use std::path::PathBuf;

use clap::Parser;

/// Prefixes stdout/stderr of a command.
#[derive(Parser, Debug)]
#[command(name = "prefixout", version, about)]
pub struct Args {
    /// Differentiate stderr by appending "[stderr] " to its prefix.
    #[arg(short = 'd')]
    pub differentiate: bool,

    /// Timestamp every record (date and time).
    #[arg(short = 't')]
    pub timestamp: bool,

    /// Color the prefix: bold for stdout, bold red for stderr.
    #[arg(short = 'c')]
    pub color: bool,

    /// Prefix to put in front of every line (defaults to "COMMAND: ").
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Read configuration from this file instead of the default locations.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command to exec.
    #[arg(value_name = "COMMAND", required = true)]
    pub command: String,

    /// Command arguments, passed through verbatim.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Args {
    pub fn stdout_prefix(&self) -> String {
        match &self.prefix {
            Some(p) => p.clone(),
            None => format!("{}: ", self.command),
        }
    }

    pub fn stderr_prefix(&self) -> String {
        let mut prefix = self.stdout_prefix();
        if self.differentiate {
            prefix.push_str("[stderr] ");
        }
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("args should parse")
    }

    #[test]
    fn default_prefix_is_command_name() {
        let args = parse(&["prefixout", "--", "make", "-j4", "all"]);
        assert_eq!(args.command, "make");
        assert_eq!(args.args, vec!["-j4", "all"]);
        assert_eq!(args.stdout_prefix(), "make: ");
        assert_eq!(args.stderr_prefix(), "make: ");
    }

    #[test]
    fn grouped_short_flags() {
        let args = parse(&["prefixout", "-dtc", "--", "ls"]);
        assert!(args.differentiate);
        assert!(args.timestamp);
        assert!(args.color);
        assert_eq!(args.stderr_prefix(), "ls: [stderr] ");
    }

    #[test]
    fn explicit_prefix_short_and_long() {
        let args = parse(&["prefixout", "-p", "web| ", "--", "npm", "start"]);
        assert_eq!(args.stdout_prefix(), "web| ");

        let args = parse(&["prefixout", "-d", "--prefix", "db ", "--", "psql"]);
        assert_eq!(args.stdout_prefix(), "db ");
        assert_eq!(args.stderr_prefix(), "db [stderr] ");
    }

    #[test]
    fn child_flags_are_not_ours() {
        let args = parse(&["prefixout", "--", "sh", "-c", "echo -d -t"]);
        assert!(!args.differentiate);
        assert!(!args.timestamp);
        assert_eq!(args.args, vec!["-c", "echo -d -t"]);
    }

    #[test]
    fn missing_command_is_rejected() {
        assert!(Args::try_parse_from(["prefixout", "-d"]).is_err());
        assert!(Args::try_parse_from(["prefixout", "--"]).is_err());
    }
}
