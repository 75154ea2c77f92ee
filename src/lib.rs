//! # textwire
//!
//! Separator-framed text message reading over async byte streams.
//!
//! Connection-oriented transports such as TCP deliver bytes, not messages:
//! one send may arrive as many reads, many sends may arrive coalesced into
//! one. This crate reassembles discrete text messages from such a stream,
//! with boundaries marked by an arbitrary caller-supplied separator string.
//!
//! ## Architecture
//!
//! - [`MessageParser`]: stateful demultiplexer. Consumes one [`Chunk`] at a
//!   time, emits completed messages in arrival order, and carries any
//!   unterminated trailing text to the next call, so a separator split
//!   across two physical reads is still found.
//! - [`StreamReader`]: drives the read loop. One reusable buffer, one read
//!   outstanding at a time; each read becomes an exact-sized chunk, is
//!   parsed, and the messages surface through the pull-based [`Messages`]
//!   sequence.
//!
//! ```text
//! transport ─► read buffer ─► Chunk ─► MessageParser ─► Messages ─► caller
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use textwire::ReaderBuilder;
//! use tokio::net::TcpStream;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stream = TcpStream::connect("127.0.0.1:7000").await?;
//!     let mut messages = ReaderBuilder::new()
//!         .separator("<END>")
//!         .build_tcp(stream)?
//!         .read();
//!
//!     while let Some(message) = messages.next().await {
//!         println!("received: {}", message?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Limitations
//!
//! Chunks are UTF-8 decoded independently, so a multi-byte character split
//! across two physical reads decodes to replacement characters on each side.
//! Trailing text with no terminating separator when the peer closes is
//! discarded, not emitted.

pub mod chunk;
pub mod error;
pub mod parser;
pub mod reader;

pub use chunk::Chunk;
pub use error::{Result, TextwireError};
pub use parser::MessageParser;
pub use reader::{Messages, ReaderBuilder, StreamReader, DEFAULT_BUFFER_SIZE};
