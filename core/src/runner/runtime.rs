//! Relay runtime: pumps stdout/stderr into their sinks, waits for the child,
//! and joins both lanes before the exit code is decided.
use std::io::Write;
use std::time::Instant;

use crate::error::RunnerError;
use crate::line::{LineFormat, StreamSink};

use super::exit::ChildExit;
use super::io_pump;
use super::traits::RunnerSession;
use super::types::{RelayOptions, RelayOutcome};

pub struct RelayRuntimeInput<W1, F1, W2, F2>
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

pub async fn run_relay_runtime<W1, F1, W2, F2>(
    input: RelayRuntimeInput<W1, F1, W2, F2>,
) -> Result<RelayOutcome, RunnerError>
where
    W1: Write + Send + 'static,
    F1: LineFormat + 'static,
    W2: Write + Send + 'static,
    F2: LineFormat + 'static,
{
    let RelayRuntimeInput {
        mut session,
        stdout_sink,
        stderr_sink,
        options,
    } = input;

    if options.read_buffer_bytes == 0 {
        return Err(RunnerError::Config(
            "read_buffer_bytes must be greater than zero".into(),
        ));
    }

    let stdout = session
        .stdout()
        .ok_or_else(|| RunnerError::Config("child stdout is not piped".into()))?;
    let stderr = session
        .stderr()
        .ok_or_else(|| RunnerError::Config("child stderr is not piped".into()))?;

    let started_at = Instant::now();
    let out_task = io_pump::pump(stdout, stdout_sink, options.read_buffer_bytes);
    let err_task = io_pump::pump(stderr, stderr_sink, options.read_buffer_bytes);

    let exit = match wait_for_child(&mut session, options.handle_interrupts).await {
        Ok(exit) => exit,
        Err(e) => {
            tracing::warn!(pid = ?session.pid(), error = %e, "waiting for child failed; stopping relay");
            out_task.abort();
            err_task.abort();
            let _ = tokio::join!(out_task, err_task);
            return Err(e);
        }
    };

    // Both lanes are drained (and their sinks closed) before returning.
    let (out_res, err_res) = tokio::join!(out_task, err_task);
    let duration_ms = started_at.elapsed().as_millis() as u64;

    let stdout_bytes = out_res?;
    let stderr_bytes = err_res?;

    tracing::debug!(
        pid = ?session.pid(),
        exit = %exit,
        duration_ms,
        stdout_ok = stdout_bytes.is_ok(),
        stderr_ok = stderr_bytes.is_ok(),
        "child finished"
    );

    Ok(RelayOutcome {
        exit,
        stdout_bytes: stdout_bytes?,
        stderr_bytes: stderr_bytes?,
        duration_ms,
    })
}

async fn wait_for_child(
    session: &mut Box<dyn RunnerSession>,
    handle_interrupts: bool,
) -> Result<ChildExit, RunnerError> {
    {
        let wait_fut = session.wait();
        tokio::pin!(wait_fut);

        let mut listen = handle_interrupts;
        let mut interrupted = false;

        loop {
            tokio::select! {
                res = &mut wait_fut => {
                    return res.map_err(RunnerError::Plugin);
                }
                sig = tokio::signal::ctrl_c(), if listen => {
                    match sig {
                        Err(e) => {
                            tracing::warn!(error = %e, "cannot listen for interrupts");
                            listen = false;
                        }
                        Ok(()) if interrupted => break,
                        Ok(()) => {
                            // The child shares our process group and sees the same interrupt.
                            interrupted = true;
                            tracing::info!("interrupt received; interrupt again to kill the child");
                        }
                    }
                }
            }
        }
    }

    tracing::warn!(pid = ?session.pid(), "second interrupt; killing child");
    if let Err(e) = session.kill().await {
        tracing::warn!(error = %e, "kill failed");
    }
    session.wait().await.map_err(RunnerError::Plugin)
}
