use anyhow::Result;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

use super::exit::ChildExit;
use super::traits::{RunnerPlugin, RunnerSession};
use super::types::RunnerStartArgs;

/// Spawns the command as a local child process with piped stdout/stderr.
pub struct ProcessRunner {}

impl ProcessRunner {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunnerPlugin for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    async fn start_session(&self, args: &RunnerStartArgs) -> Result<Box<dyn RunnerSession>> {
        let stdin = if args.inherit_stdin {
            Stdio::inherit()
        } else {
            Stdio::null()
        };

        let child = Command::new(&args.cmd)
            .args(&args.args)
            .envs(&args.envs)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        tracing::debug!(cmd = %args.cmd, pid = ?child.id(), "child spawned");
        Ok(Box::new(ProcessSession { child }))
    }
}

struct ProcessSession {
    child: Child,
}

#[async_trait]
impl RunnerSession for ProcessSession {
    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn kill(&mut self) -> Result<()> {
        self.child.start_kill()?;
        Ok(())
    }

    async fn wait(&mut self) -> Result<ChildExit> {
        let status = self.child.wait().await?;
        Ok(ChildExit::from_status(status))
    }
}
