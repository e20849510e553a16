use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use prefixout_core::line::{PrefixConfig, StreamRole, StreamSink};
use prefixout_core::runner::{
    run_relay, start_session, ProcessRunner, RelayOptions, RelayOutcome, RunRelayArgs,
    RunnerStartArgs,
};
use prefixout_core::RunnerError;

/// Cloneable in-memory destination standing in for the parent's stdout/stderr.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Captured {
    pub outcome: Result<RelayOutcome, RunnerError>,
    pub stdout: SharedBuf,
    pub stderr: SharedBuf,
}

pub async fn relay_sh(script: &str, out_prefix: &str, err_prefix: &str) -> Captured {
    let args = RunnerStartArgs::new("sh", vec!["-c".to_string(), script.to_string()]);
    let stdout = SharedBuf::default();
    let stderr = SharedBuf::default();

    let outcome = match start_session(&ProcessRunner::new(), &args).await {
        Ok(session) => {
            run_relay(RunRelayArgs {
                session,
                stdout_sink: StreamSink::new(
                    stdout.clone(),
                    PrefixConfig::new(out_prefix, StreamRole::Stdout),
                ),
                stderr_sink: StreamSink::new(
                    stderr.clone(),
                    PrefixConfig::new(err_prefix, StreamRole::Stderr),
                ),
                options: RelayOptions::default(),
            })
            .await
        }
        Err(e) => Err(e),
    };

    Captured {
        outcome,
        stdout,
        stderr,
    }
}
