use std::io::Write;

use crate::error::RunnerError;
use crate::line::{LineFormat, StreamSink};

use super::runtime;
use super::traits::{RunnerPlugin, RunnerSession};
use super::types::{RelayOptions, RelayOutcome, RunnerStartArgs};

/// Starts the child through `plugin`; any failure is reported as a spawn error.
pub async fn start_session(
    plugin: &dyn RunnerPlugin,
    args: &RunnerStartArgs,
) -> Result<Box<dyn RunnerSession>, RunnerError> {
    tracing::debug!(runner = plugin.name(), cmd = %args.cmd, "starting session");
    plugin
        .start_session(args)
        .await
        .map_err(|e| {
            tracing::debug!(runner = plugin.name(), error = %e, "session failed to start");
            RunnerError::Spawn {
                cmd: args.cmd.clone(),
                reason: format!("{}: {e}", plugin.name()),
            }
        })
}

pub struct RunRelayArgs<W1, F1, W2, F2>
where
    W1: Write,
    F1: LineFormat,
    W2: Write,
    F2: LineFormat,
{
    pub session: Box<dyn RunnerSession>,
    pub stdout_sink: StreamSink<W1, F1>,
    pub stderr_sink: StreamSink<W2, F2>,
    pub options: RelayOptions,
}

pub async fn run_relay<W1, F1, W2, F2>(
    args: RunRelayArgs<W1, F1, W2, F2>,
) -> Result<RelayOutcome, RunnerError>
where
    W1: Write + Send + 'static,
    F1: LineFormat + 'static,
    W2: Write + Send + 'static,
    F2: LineFormat + 'static,
{
    runtime::run_relay_runtime(runtime::RelayRuntimeInput {
        session: args.session,
        stdout_sink: args.stdout_sink,
        stderr_sink: args.stderr_sink,
        options: args.options,
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct Refusing;

    #[async_trait]
    impl RunnerPlugin for Refusing {
        fn name(&self) -> &str {
            "refusing"
        }

        async fn start_session(
            &self,
            _args: &RunnerStartArgs,
        ) -> anyhow::Result<Box<dyn RunnerSession>> {
            anyhow::bail!("no such file or directory")
        }
    }

    #[tokio::test]
    async fn start_failure_names_runner_and_command() {
        let args = RunnerStartArgs::new("ghost".to_string(), vec![]);
        let err = match start_session(&Refusing, &args).await {
            Err(e) => e,
            Ok(_) => panic!("session should not start"),
        };

        match err {
            RunnerError::Spawn { cmd, reason } => {
                assert_eq!(cmd, "ghost");
                assert_eq!(reason, "refusing: no such file or directory");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
