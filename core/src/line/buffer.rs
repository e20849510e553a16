use std::io;

/// Reassembles `\n`-terminated lines from arbitrarily chunked input.
///
/// Complete lines are handed to the `emit` callback (terminator included) in
/// arrival order. A trailing fragment stays buffered until more bytes arrive
/// or [`LineBuffer::close`] flushes it.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
    // Offset into `pending` that is known to hold no terminator.
    scanned: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            pending: Vec::with_capacity(cap),
            scanned: 0,
        }
    }

    /// Bytes received so far that do not yet form a complete line.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn feed<F>(&mut self, bytes: &[u8], mut emit: F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        if bytes.is_empty() {
            return Ok(());
        }
        self.pending.extend_from_slice(bytes);
        self.drain_lines(&mut emit)
    }

    /// Emits whatever is left as a final line. Calling it again is a no-op.
    pub fn close<F>(&mut self, mut emit: F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        // Lines left behind by a failed emit still go out first.
        self.drain_lines(&mut emit)?;

        self.scanned = 0;
        if self.pending.is_empty() {
            return Ok(());
        }
        let rest = std::mem::take(&mut self.pending);
        emit(&rest)
    }

    fn drain_lines<F>(&mut self, emit: &mut F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        let mut start = 0;
        let mut scan = self.scanned;

        let outcome = loop {
            match self.pending[scan..].iter().position(|&b| b == b'\n') {
                Some(i) => {
                    let end = scan + i + 1;
                    let res = emit(&self.pending[start..end]);
                    start = end;
                    scan = end;
                    if let Err(e) = res {
                        break Err(e);
                    }
                }
                None => {
                    scan = self.pending.len();
                    break Ok(());
                }
            }
        };

        // Single drain per call keeps many-lines-per-chunk linear.
        if start > 0 {
            self.pending.drain(..start);
        }
        self.scanned = scan - start;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn collect(chunks: &[&[u8]]) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
        let mut buf = LineBuffer::new();
        let mut before_close = Vec::new();
        for chunk in chunks {
            buf.feed(chunk, |line| {
                before_close.push(line.to_vec());
                Ok(())
            })
            .unwrap();
        }
        let mut on_close = Vec::new();
        buf.close(|line| {
            on_close.push(line.to_vec());
            Ok(())
        })
        .unwrap();
        (before_close, on_close)
    }

    #[test]
    fn holds_fragment_until_terminator_then_flushes_on_close() {
        let mut buf = LineBuffer::new();
        let mut out: Vec<Vec<u8>> = Vec::new();

        buf.feed(b"ab", |l| {
            out.push(l.to_vec());
            Ok(())
        })
        .unwrap();
        assert!(out.is_empty());
        assert_eq!(buf.pending(), b"ab");

        buf.feed(b"c\ndef", |l| {
            out.push(l.to_vec());
            Ok(())
        })
        .unwrap();
        assert_eq!(out, vec![b"abc\n".to_vec()]);
        assert_eq!(buf.pending(), b"def");

        buf.close(|l| {
            out.push(l.to_vec());
            Ok(())
        })
        .unwrap();
        assert_eq!(out, vec![b"abc\n".to_vec(), b"def".to_vec()]);
        assert!(buf.is_empty());
    }

    #[test]
    fn multiple_terminators_in_one_feed_keep_order() {
        let (lines, tail) = collect(&[b"x\ny\n", b""]);
        assert_eq!(lines, vec![b"x\n".to_vec(), b"y\n".to_vec()]);
        assert!(tail.is_empty());
    }

    #[test]
    fn empty_feed_is_noop() {
        let mut buf = LineBuffer::new();
        let mut called = false;
        buf.feed(b"", |_| {
            called = true;
            Ok(())
        })
        .unwrap();
        assert!(!called);
        assert!(buf.is_empty());
    }

    #[test]
    fn leading_terminator_emits_empty_line() {
        let (lines, tail) = collect(&[b"\n"]);
        assert_eq!(lines, vec![b"\n".to_vec()]);
        assert!(tail.is_empty());

        let (lines, _) = collect(&[b"\n\n", b"\n"]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn close_is_idempotent() {
        let mut buf = LineBuffer::new();
        buf.feed(b"tail", |_| Ok(())).unwrap();

        let mut count = 0;
        buf.close(|_| {
            count += 1;
            Ok(())
        })
        .unwrap();
        buf.close(|_| {
            count += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn chunking_does_not_change_lines() {
        let input: &[u8] = b"first\n\nthird line\r\nfourth\nunterminated";
        let (whole, whole_tail) = collect(&[input]);

        for split in 0..=input.len() {
            let (a, b) = input.split_at(split);
            let (lines, tail) = collect(&[a, b]);
            assert_eq!(lines, whole, "split at {split}");
            assert_eq!(tail, whole_tail, "split at {split}");
        }

        let bytes: Vec<&[u8]> = input.chunks(1).collect();
        let (lines, tail) = collect(&bytes);
        assert_eq!(lines, whole);
        assert_eq!(tail, vec![b"unterminated".to_vec()]);

        let joined: Vec<u8> = lines.concat();
        let last_nl = input.iter().rposition(|&b| b == b'\n').unwrap();
        assert_eq!(joined, input[..=last_nl].to_vec());
    }

    #[test]
    fn bytes_pass_through_untouched() {
        let (lines, tail) = collect(&[b"\xff\xfe bin\r\n", b"\x00"]);
        assert_eq!(lines, vec![b"\xff\xfe bin\r\n".to_vec()]);
        assert_eq!(tail, vec![b"\x00".to_vec()]);
    }

    #[test]
    fn emit_error_propagates_and_keeps_later_lines() {
        let mut buf = LineBuffer::new();
        let err = buf
            .feed(b"one\ntwo\nthr", |_| {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            })
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(buf.pending(), b"two\nthr");

        let mut out = Vec::new();
        buf.close(|l| {
            out.push(l.to_vec());
            Ok(())
        })
        .unwrap();
        assert_eq!(out, vec![b"two\n".to_vec(), b"thr".to_vec()]);
    }

    #[test]
    fn separate_buffers_do_not_mix() {
        let mut out_buf = LineBuffer::new();
        let mut err_buf = LineBuffer::new();
        let mut out_lines = Vec::new();
        let mut err_lines = Vec::new();

        let out_chunks: [&[u8]; 3] = [b"so", b"me out", b"put\n"];
        let err_chunks: [&[u8]; 3] = [b"err", b"or\nmo", b"re\n"];
        for (o, e) in out_chunks.iter().zip(err_chunks.iter()) {
            out_buf
                .feed(o, |l| {
                    out_lines.push(l.to_vec());
                    Ok(())
                })
                .unwrap();
            err_buf
                .feed(e, |l| {
                    err_lines.push(l.to_vec());
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(out_lines, vec![b"some output\n".to_vec()]);
        assert_eq!(err_lines, vec![b"error\n".to_vec(), b"more\n".to_vec()]);
    }
}
