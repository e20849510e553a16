use std::io::{self, Write};

use crate::util::time::log_timestamp;

use super::buffer::LineBuffer;
use super::format::{LineFormat, PrefixConfig, PrefixFormat};

/// Source of the date/time stamp put in front of timestamped records.
pub trait Clock: Send {
    fn stamp(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn stamp(&self) -> String {
        log_timestamp()
    }
}

/// `Write` adapter that turns a raw child stream into prefixed records.
///
/// Every complete line becomes exactly one `write_all` on the destination,
/// so records from the sibling stream never land in the middle of a line.
///
/// Once input has been taken into the line buffer it counts as consumed: a
/// destination failure hit while emitting it is held back and returned by
/// the next `write` or by `close`.
pub struct StreamSink<W: Write, F: LineFormat = PrefixFormat> {
    writer: W,
    config: PrefixConfig,
    format: F,
    clock: Box<dyn Clock>,
    lines: LineBuffer,
    failed: Option<io::Error>,
    closed: bool,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W, config: PrefixConfig) -> Self {
        Self::with_format(writer, config, PrefixFormat)
    }
}

impl<W: Write, F: LineFormat> StreamSink<W, F> {
    pub fn with_format(writer: W, config: PrefixConfig, format: F) -> Self {
        Self {
            writer,
            config,
            format,
            clock: Box::new(LocalClock),
            lines: LineBuffer::with_capacity(8 * 1024),
            failed: None,
            closed: false,
        }
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            ..self
        }
    }

    pub fn config(&self) -> &PrefixConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Flushes a trailing partial line and stops accepting input.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let held = self.failed.take();

        let StreamSink {
            ref mut writer,
            ref config,
            ref format,
            ref clock,
            ref mut lines,
            ..
        } = *self;
        let res = lines.close(|line| write_record(writer, config, format, &**clock, line));
        match held {
            Some(e) => Err(e),
            None => res,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write, F: LineFormat> Write for StreamSink<W, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.closed {
            tracing::trace!(
                stream = self.config.role().label(),
                bytes = buf.len(),
                "write after close discarded"
            );
            return Ok(buf.len());
        }
        if let Some(e) = self.failed.take() {
            return Err(e);
        }

        let StreamSink {
            ref mut writer,
            ref config,
            ref format,
            ref clock,
            ref mut lines,
            ..
        } = *self;
        let res = lines.feed(buf, |line| {
            write_record(writer, config, format, &**clock, line)
        });
        if let Err(e) = res {
            tracing::debug!(
                stream = config.role().label(),
                error = %e,
                "destination write failed"
            );
            self.failed = Some(e);
        }

        Ok(buf.len())
    }

    // Partial lines are only released by `close`.
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn write_record<W: Write, F: LineFormat>(
    writer: &mut W,
    config: &PrefixConfig,
    format: &F,
    clock: &dyn Clock,
    line: &[u8],
) -> io::Result<()> {
    let body = format.format(config, line);

    let mut record = Vec::with_capacity(body.len() + 24);
    if config.timestamp() {
        record.extend_from_slice(clock.stamp().as_bytes());
    }
    record.extend_from_slice(&body);
    if !line.ends_with(b"\n") {
        record.push(b'\n');
    }

    writer.write_all(&record)?;
    loop {
        match writer.flush() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            res => return res,
        }
    }
}
