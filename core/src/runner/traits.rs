use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::exit::ChildExit;
use super::types::RunnerStartArgs;

#[async_trait]
pub trait RunnerSession: Send {
    fn pid(&self) -> Option<u32>;
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    async fn kill(&mut self) -> anyhow::Result<()>;
    async fn wait(&mut self) -> anyhow::Result<ChildExit>;
}

#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &RunnerStartArgs)
        -> anyhow::Result<Box<dyn RunnerSession>>;
}
