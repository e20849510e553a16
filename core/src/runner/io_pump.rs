use std::io::Write;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::error::RunnerError;
use crate::line::{LineFormat, StreamSink};

/// Relay loop for one child stream: read chunks, feed them to the sink, and
/// close the sink once the pipe reports EOF. Resolves to the byte count.
///
/// Destination writes are blocking, so they run on the blocking pool; a
/// stalled stdout never holds a runtime worker that the stderr lane needs.
pub fn pump<R, W, F>(
    mut rd: R,
    mut sink: StreamSink<W, F>,
    read_buffer_bytes: usize,
) -> JoinHandle<Result<u64, RunnerError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: Write + Send + 'static,
    F: LineFormat + 'static,
{
    let label = sink.config().role().label();

    tokio::spawn(async move {
        let mut buf = vec![0u8; read_buffer_bytes.max(1)];
        let mut total = 0u64;

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| RunnerError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }

            let (s, b, res) = tokio::task::spawn_blocking(move || {
                let res = sink.write_all(&buf[..n]);
                (sink, buf, res)
            })
            .await?;
            sink = s;
            buf = b;

            res.map_err(|e| {
                tracing::error!(target: "prefixout.relay", stream = label, error = %e, "relay write failed");
                RunnerError::StreamIo {
                    stream: label,
                    source: e,
                }
            })?;
            total += n as u64;
        }

        // EOF: release the last partial line.
        tokio::task::spawn_blocking(move || sink.close())
            .await?
            .map_err(|e| {
                tracing::error!(target: "prefixout.relay", stream = label, error = %e, "relay write failed");
                RunnerError::StreamIo {
                    stream: label,
                    source: e,
                }
            })?;

        tracing::debug!(target: "prefixout.relay", stream = label, bytes = total, "stream drained");
        Ok(total)
    })
}
