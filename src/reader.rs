//! Stream reader driving the continuous read-parse-emit loop.
//!
//! The reader owns one fixed-size buffer, reused every cycle. Each cycle:
//! read up to `buffer_size` bytes, snapshot exactly the bytes received into
//! a [`Chunk`], hand it to the parser, deliver the completed messages, then
//! read again. Consumption is pull-based: nothing is read from the transport
//! until the consumer asks for the next message, so dropping the sequence
//! stops the loop with at most one read abandoned in flight.
//!
//! # Example
//!
//! ```ignore
//! use textwire::{MessageParser, StreamReader};
//! use tokio::net::TcpStream;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stream = TcpStream::connect("127.0.0.1:7000").await?;
//!     let parser = MessageParser::new("<END>")?;
//!     let reader = StreamReader::from_tcp(stream, parser, 1024)?;
//!
//!     let mut messages = reader.read();
//!     while let Some(message) = messages.next().await {
//!         println!("{}", message?);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::VecDeque;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::TcpStream;

use crate::chunk::Chunk;
use crate::error::{Result, TextwireError};
use crate::parser::MessageParser;

/// Default read buffer size (64KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Reader for separator-framed text messages over an async byte stream.
///
/// Construction validates its arguments up front; the read loop itself
/// starts when [`read`] is called and the returned [`Messages`] sequence is
/// driven. Message order follows byte-arrival order exactly: only one read
/// is outstanding at a time, and the next read is not issued until the
/// current chunk has been parsed and delivered.
///
/// [`read`]: StreamReader::read
#[derive(Debug)]
pub struct StreamReader<R> {
    stream: R,
    parser: MessageParser,
    buffer_size: usize,
}

impl<R: AsyncRead + Unpin> StreamReader<R> {
    /// Create a reader over any async byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`TextwireError::InvalidBufferSize`] if `buffer_size` is 0.
    /// A buffer size of 1 is valid and yields the same message sequence as
    /// any larger size, only with finer read granularity.
    pub fn new(stream: R, parser: MessageParser, buffer_size: usize) -> Result<Self> {
        if buffer_size == 0 {
            return Err(TextwireError::InvalidBufferSize(buffer_size));
        }

        Ok(Self {
            stream,
            parser,
            buffer_size,
        })
    }

    /// Begin reading, turning this reader into an ordered message sequence.
    ///
    /// The sequence is lazy: no read is issued until [`Messages::next`] is
    /// awaited, and no messages are produced ahead of demand beyond what the
    /// one pending read cycle yields.
    pub fn read(self) -> Messages<R> {
        Messages {
            stream: self.stream,
            parser: self.parser,
            buf: vec![0u8; self.buffer_size],
            ready: VecDeque::new(),
            finished: false,
        }
    }
}

impl StreamReader<TcpStream> {
    /// Create a reader over a connected TCP stream.
    ///
    /// # Errors
    ///
    /// Returns [`TextwireError::NotConnected`] if the socket has no peer,
    /// and [`TextwireError::InvalidBufferSize`] if `buffer_size` is 0. Both
    /// are reported here, never deferred into the read loop.
    pub fn from_tcp(stream: TcpStream, parser: MessageParser, buffer_size: usize) -> Result<Self> {
        stream
            .peer_addr()
            .map_err(|_| TextwireError::NotConnected)?;

        Self::new(stream, parser, buffer_size)
    }
}

/// Builder for configuring a [`StreamReader`].
///
/// # Example
///
/// ```ignore
/// let reader = ReaderBuilder::new()
///     .separator("\n")
///     .buffer_size(4096)
///     .build(stream)?;
/// ```
#[derive(Debug, Default)]
pub struct ReaderBuilder {
    separator: Option<String>,
    buffer_size: Option<usize>,
}

impl ReaderBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message separator (required, non-empty).
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Set the read buffer size. Default: [`DEFAULT_BUFFER_SIZE`].
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Build a reader over any async byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`TextwireError::EmptySeparator`] if no separator was set or
    /// it is empty, [`TextwireError::InvalidBufferSize`] for a zero buffer.
    pub fn build<R: AsyncRead + Unpin>(self, stream: R) -> Result<StreamReader<R>> {
        let separator = self.separator.ok_or(TextwireError::EmptySeparator)?;
        let parser = MessageParser::new(separator)?;
        StreamReader::new(stream, parser, self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE))
    }

    /// Build a reader over a connected TCP stream.
    ///
    /// # Errors
    ///
    /// As [`build`](Self::build), plus [`TextwireError::NotConnected`] if
    /// the socket has no peer.
    pub fn build_tcp(self, stream: TcpStream) -> Result<StreamReader<TcpStream>> {
        let separator = self.separator.ok_or(TextwireError::EmptySeparator)?;
        let parser = MessageParser::new(separator)?;
        StreamReader::from_tcp(stream, parser, self.buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE))
    }
}

/// Ordered, lazily-produced sequence of messages from one stream.
///
/// Must be consumed from one place at a time (`next` takes `&mut self`).
/// The sequence ends with `None` on graceful peer close; an I/O error yields
/// exactly one `Some(Err(..))` and every call after that returns `None`.
/// Trailing text with no terminating separator is discarded at stream end,
/// never emitted as a partial message.
#[derive(Debug)]
pub struct Messages<R> {
    stream: R,
    parser: MessageParser,
    /// Reusable read buffer, overwritten every cycle. Only exact-sized
    /// [`Chunk`] copies of it ever leave this struct.
    buf: Vec<u8>,
    /// Messages parsed from the current chunk, not yet handed out.
    ready: VecDeque<String>,
    finished: bool,
}

impl<R: AsyncRead + Unpin> Messages<R> {
    /// Produce the next message, reading from the stream as needed.
    ///
    /// Suspends at most once per read cycle, while awaiting the physical
    /// read. Cancelling the returned future abandons at most that one read.
    pub async fn next(&mut self) -> Option<Result<String>> {
        loop {
            if let Some(message) = self.ready.pop_front() {
                return Some(Ok(message));
            }

            if self.finished {
                return None;
            }

            let n = match self.stream.read(&mut self.buf).await {
                Ok(0) => {
                    self.finished = true;
                    tracing::debug!("peer closed the stream");
                    return None;
                }
                Ok(n) => n,
                Err(e) => {
                    self.finished = true;
                    tracing::debug!(error = %e, "stream read failed");
                    return Some(Err(TextwireError::Io(e)));
                }
            };

            let chunk = Chunk::copy_from_slice(&self.buf[..n]);
            let mut sink = Vec::new();
            self.parser.parse(&chunk, &mut sink);

            tracing::trace!(bytes = n, messages = sink.len(), "read cycle");
            self.ready.extend(sink);
        }
    }
}
