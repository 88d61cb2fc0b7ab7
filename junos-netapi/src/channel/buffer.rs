//! Frame buffer for delimiter-terminated messages.
//!
//! NETCONF 1.0 terminates every message with `]]>]]>`. Replies such as a
//! full configuration dump can be large, so the delimiter search only
//! covers bytes appended since the last search (plus enough overlap to
//! catch a delimiter split across reads) instead of the whole buffer.

use bytes::{Bytes, BytesMut};
use memchr::memmem;

/// NETCONF 1.0 end-of-message marker.
pub const END_OF_MESSAGE: &[u8] = b"]]>]]>";

/// Buffer for accumulating channel output and splitting it into frames.
#[derive(Debug)]
pub struct FrameBuffer {
    /// The accumulated output buffer.
    buffer: BytesMut,

    /// Delimiter that ends a frame.
    delimiter: &'static [u8],

    /// Offset up to which the buffer has already been searched.
    scanned: usize,
}

impl FrameBuffer {
    /// Create a new frame buffer splitting on `delimiter`.
    pub fn new(delimiter: &'static [u8]) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            delimiter,
            scanned: 0,
        }
    }

    /// Append data read from the channel.
    pub fn extend(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Split off the next complete frame, without its delimiter.
    ///
    /// Returns `None` if no delimiter has arrived yet. Bytes following the
    /// delimiter stay buffered for the next frame.
    pub fn next_frame(&mut self) -> Option<Bytes> {
        let start = self.scanned.saturating_sub(self.delimiter.len() - 1);
        match memmem::find(&self.buffer[start..], self.delimiter) {
            Some(pos) => {
                let end = start + pos;
                let frame = self.buffer.split_to(end).freeze();
                let _ = self.buffer.split_to(self.delimiter.len());
                self.scanned = 0;
                Some(frame)
            }
            None => {
                self.scanned = self.buffer.len();
                None
            }
        }
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(END_OF_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut buffer = FrameBuffer::default();
        buffer.extend(b"<hello/>]]>]]>");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"<hello/>"[..]));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_incomplete_frame() {
        let mut buffer = FrameBuffer::default();
        buffer.extend(b"<rpc-reply>partial");
        assert!(buffer.next_frame().is_none());
        assert_eq!(buffer.len(), 18);
    }

    #[test]
    fn test_delimiter_split_across_reads() {
        let mut buffer = FrameBuffer::default();
        buffer.extend(b"<ok/>]]>");
        assert!(buffer.next_frame().is_none());
        buffer.extend(b"]]>");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"<ok/>"[..]));
    }

    #[test]
    fn test_trailing_bytes_kept_for_next_frame() {
        let mut buffer = FrameBuffer::default();
        buffer.extend(b"first]]>]]>second]]>]]>thi");
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"first"[..]));
        assert_eq!(buffer.next_frame().as_deref(), Some(&b"second"[..]));
        assert!(buffer.next_frame().is_none());
        assert_eq!(buffer.len(), 3);
    }
}
