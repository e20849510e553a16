use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("config error: {0}")]
    Config(String),
    #[error("could not spawn command `{cmd}`: {reason}")]
    Spawn { cmd: String, reason: String },
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("relay task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("plugin error: {0}")]
    Plugin(#[from] anyhow::Error),
}
