use prefixout_core::config::AppConfig;
use prefixout_core::error::{CliError, RunnerError};
use prefixout_core::line::{PrefixConfig, StreamRole, StreamSink};
use prefixout_core::runner::{
    run_relay, start_session, ProcessRunner, RelayOptions, RunRelayArgs, RunnerStartArgs,
};
use prefixout_core::util::term::{color_enabled, force_ansi_colors};

use crate::commands::cli::Args;

// 2: malformed arguments (clap exits on its own)
// 70: internal/uncategorized
// 74: relay I/O error
// 78: config error
// 127: command could not be spawned
pub const EXIT_INTERNAL: i32 = 70;
pub const EXIT_IO: i32 = 74;
pub const EXIT_CONFIG: i32 = 78;
pub const EXIT_SPAWN: i32 = 127;

/// Everything needed to start one relay, resolved from args and config.
#[derive(Debug, Clone)]
pub struct RelayPlan {
    pub start: RunnerStartArgs,
    pub stdout: PrefixConfig,
    pub stderr: PrefixConfig,
    pub options: RelayOptions,
}

pub fn build_plan(args: &Args, cfg: &AppConfig) -> RelayPlan {
    let color_for = |role| args.color || color_enabled(cfg.output.color, role);

    let stdout = PrefixConfig::new(args.stdout_prefix(), StreamRole::Stdout)
        .with_timestamp(args.timestamp)
        .with_color(color_for(StreamRole::Stdout));
    let stderr = PrefixConfig::new(args.stderr_prefix(), StreamRole::Stderr)
        .with_timestamp(args.timestamp)
        .with_color(color_for(StreamRole::Stderr));

    let mut start = RunnerStartArgs::new(args.command.clone(), args.args.clone());
    start.inherit_stdin = cfg.relay.inherit_stdin;

    RelayPlan {
        start,
        stdout,
        stderr,
        options: RelayOptions {
            read_buffer_bytes: cfg.relay.read_buffer_bytes,
            handle_interrupts: cfg.relay.handle_interrupts,
        },
    }
}

pub async fn run_app(args: Args, cfg: &AppConfig) -> Result<i32, CliError> {
    let plan = build_plan(&args, cfg);
    if plan.stdout.color() || plan.stderr.color() {
        force_ansi_colors();
    }
    tracing::debug!(cmd = %plan.start.cmd, args = ?plan.start.args, "starting relay");

    let runner = ProcessRunner::new();
    let session = start_session(&runner, &plan.start).await?;

    let outcome = run_relay(RunRelayArgs {
        session,
        stdout_sink: StreamSink::new(std::io::stdout(), plan.stdout),
        stderr_sink: StreamSink::new(std::io::stderr(), plan.stderr),
        options: plan.options,
    })
    .await?;

    tracing::debug!(
        exit = %outcome.exit,
        stdout_bytes = outcome.stdout_bytes,
        stderr_bytes = outcome.stderr_bytes,
        duration_ms = outcome.duration_ms,
        "relay finished"
    );
    Ok(outcome.exit.exit_code())
}

pub fn exit_code_for_error(e: &CliError) -> i32 {
    match e {
        CliError::Config(_) => EXIT_CONFIG,
        CliError::Runner(re) => match re {
            RunnerError::Config(_) => EXIT_CONFIG,
            RunnerError::Spawn { .. } => EXIT_SPAWN,
            RunnerError::StreamIo { .. } => EXIT_IO,
            RunnerError::Task(_) => EXIT_INTERNAL,
            RunnerError::Plugin(_) => EXIT_INTERNAL,
        },
        CliError::Io(_) => EXIT_IO,
        CliError::Anyhow(_) => EXIT_INTERNAL,
    }
}
