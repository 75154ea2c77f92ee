//! Message parser for accumulating partial reads.
//!
//! A transport such as TCP gives no message boundaries: one send may arrive
//! as several reads, several sends may arrive coalesced into one. The parser
//! reassembles separator-terminated messages regardless of how the byte
//! stream was chunked, carrying any unterminated trailing text between calls.
//!
//! # Example
//!
//! ```
//! use textwire::{Chunk, MessageParser};
//!
//! let mut parser = MessageParser::new("<END>").unwrap();
//! let mut messages = Vec::new();
//!
//! // Separator arrives split across two chunks.
//! parser.parse(&Chunk::copy_from_slice(b"hello<E"), &mut messages);
//! assert!(messages.is_empty());
//!
//! parser.parse(&Chunk::copy_from_slice(b"ND>world"), &mut messages);
//! assert_eq!(messages, vec!["hello".to_string()]);
//! ```

use crate::chunk::Chunk;
use crate::error::{Result, TextwireError};

/// Stateful demultiplexer turning raw chunks into complete messages.
///
/// Bound one-to-one to a single logical stream. Each [`parse`] call emits
/// the messages completed by that chunk, in arrival order, and retains the
/// unterminated tail as carry for the next call. The carry is never exposed;
/// whatever remains unterminated when the stream ends is discarded by the
/// reader, not emitted.
///
/// Not safe for concurrent use; one parser belongs to one stream.
///
/// [`parse`]: MessageParser::parse
#[derive(Debug)]
pub struct MessageParser {
    /// Message boundary marker, fixed for the parser's lifetime.
    separator: String,
    /// Decoded text seen so far that no separator has terminated yet.
    carry: String,
}

impl MessageParser {
    /// Create a parser splitting on the given separator.
    ///
    /// # Errors
    ///
    /// Returns [`TextwireError::EmptySeparator`] if the separator is empty.
    pub fn new(separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(TextwireError::EmptySeparator);
        }

        Ok(Self {
            separator,
            carry: String::new(),
        })
    }

    /// The configured separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parse one chunk, pushing completed messages to `sink` in order.
    ///
    /// The chunk's bytes are decoded as UTF-8 (lossy, per chunk), appended
    /// to the carry, and the combined text is split on every non-overlapping
    /// separator occurrence. Everything up to the last occurrence is emitted;
    /// the tail after it becomes the new carry. A separator straddling two
    /// chunks is found on the second call, when its prefix (held in carry)
    /// and its suffix are evaluated jointly.
    ///
    /// Empty fragments are real messages: consecutive separators, or a
    /// separator at the very start of the stream, each emit an empty string.
    pub fn parse(&mut self, chunk: &Chunk, sink: &mut Vec<String>) {
        let decoded = chunk.decode_lossy();

        let mut working = std::mem::take(&mut self.carry);
        working.push_str(&decoded);

        if !working.contains(self.separator.as_str()) {
            // No boundary yet; keep everything for the next chunk.
            self.carry = working;
            return;
        }

        let mut fragments: Vec<&str> = working.split(self.separator.as_str()).collect();
        let tail = fragments.pop().expect("split yields at least one fragment");

        for fragment in fragments {
            sink.push(fragment.to_owned());
        }

        self.carry = tail.to_owned();
    }

    /// Current carry, for test assertions.
    #[cfg(test)]
    fn carry(&self) -> &str {
        &self.carry
    }
}
