//! Newline-delimited message framing for JSON-RPC over TCP.
//!
//! # Wire Format
//!
//! ```text
//! {"jsonrpc":"2.0","method":"GetProjectName","id":1}\n
//! ```
//!
//! One JSON value per frame, terminated by a single `\n`. JSON encoders
//! escape newlines inside strings, so the first raw `\n` byte ends the frame.
//!
//! Reading stops at the first newline, when the peer closes the stream, or
//! when a single read waits longer than the read timeout. In the last two
//! cases the frame is whatever arrived so far, possibly empty. Bytes that
//! arrive after a newline stay buffered and begin the next frame.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

/// Per-read timeout applied while waiting for a response frame.
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

/// Size of each socket read.
const READ_CHUNK_SIZE: usize = 1024;

/// Frame terminator.
const DELIMITER: u8 = b'\n';

/// Why accumulation of a frame stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEnd {
    /// A newline terminator was found.
    Delimited,
    /// The peer closed the stream.
    Closed,
    /// A read produced nothing within the read timeout.
    TimedOut,
}

/// One received frame, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub bytes: Vec<u8>,
    pub end: FrameEnd,
}

/// Accumulates newline-terminated frames from a byte stream.
pub struct FrameReader<R> {
    inner: R,
    pending: Vec<u8>,
    read_timeout: Duration,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_timeout(inner, RECEIVE_TIMEOUT)
    }

    pub fn with_timeout(inner: R, read_timeout: Duration) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            read_timeout,
        }
    }

    /// Number of bytes received but not yet returned in a frame.
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    /// Read the next frame.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a read fails. Timeouts and EOF
    /// are not errors; they end the frame early (see [`FrameEnd`]).
    pub async fn read_frame(&mut self) -> io::Result<Frame> {
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == DELIMITER) {
                let mut bytes: Vec<u8> = self.pending.drain(..=pos).collect();
                bytes.pop();
                return Ok(Frame {
                    bytes,
                    end: FrameEnd::Delimited,
                });
            }

            match timeout(self.read_timeout, self.inner.read(&mut chunk)).await {
                Ok(Ok(0)) => {
                    tracing::debug!(buffered = self.pending.len(), "Peer closed the stream");
                    return Ok(self.take_partial(FrameEnd::Closed));
                }
                Ok(Ok(n)) => self.pending.extend_from_slice(&chunk[..n]),
                Ok(Err(e)) => return Err(e),
                Err(_) => {
                    tracing::warn!(
                        buffered = self.pending.len(),
                        "No data within {:?}, returning partial frame",
                        self.read_timeout
                    );
                    return Ok(self.take_partial(FrameEnd::TimedOut));
                }
            }
        }
    }

    fn take_partial(&mut self, end: FrameEnd) -> Frame {
        Frame {
            bytes: std::mem::take(&mut self.pending),
            end,
        }
    }
}

/// Write `body` followed by the newline terminator as one write, then flush.
pub async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, body: &str) -> io::Result<()> {
    let mut payload = Vec::with_capacity(body.len() + 1);
    payload.extend_from_slice(body.as_bytes());
    payload.push(DELIMITER);

    writer.write_all(&payload).await?;
    writer.flush().await
}
