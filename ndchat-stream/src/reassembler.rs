//! Byte-chunk to line reassembly.
//!
//! Transports hand over the response body in arbitrary pieces: a chunk may
//! hold several lines, a fraction of one, or end halfway through a multi-byte
//! UTF-8 character. [`ChunkReassembler`] decodes incrementally and only ever
//! emits whole lines.

/// Reassembles complete text lines from a sequence of byte chunks.
///
/// Owned by a single request cycle. Every byte fed in ends up either in an
/// emitted line or in the internal buffer until [`finish`](Self::finish).
/// Invalid UTF-8 is replaced with U+FFFD rather than dropped. The buffer is
/// unbounded.
#[derive(Debug, Default)]
pub struct ChunkReassembler {
    /// Decoded text after the last newline seen.
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence (at most 3).
    partial: Vec<u8>,
}

impl ChunkReassembler {
    /// Create an empty reassembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk` and return every line it completes, in order.
    ///
    /// Lines are split on `\n` with a trailing `\r` removed. Blank and
    /// whitespace-only lines are dropped. The unterminated tail stays
    /// buffered for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        // The buffer holds no newline between calls, so only the newly
        // decoded suffix needs scanning.
        let scanned = self.buffer.len();
        self.decode(chunk);

        let Some(last_newline) = self.buffer[scanned..].rfind('\n').map(|i| scanned + i) else {
            return Vec::new();
        };
        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Flush whatever is left once the transport reports end of stream.
    ///
    /// The peer may close without a trailing newline; the remainder is
    /// returned trimmed when it holds anything other than whitespace.
    pub fn finish(mut self) -> Option<String> {
        if !self.partial.is_empty() {
            self.buffer.push_str(&String::from_utf8_lossy(&self.partial));
        }
        let rest = self.buffer.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        }
    }

    /// Text currently held back waiting for a newline.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Whether nothing at all is held back.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.partial.is_empty()
    }

    /// Append `chunk` to the text buffer, carrying an incomplete trailing
    /// UTF-8 sequence over to the next call.
    fn decode(&mut self, chunk: &[u8]) {
        let joined;
        let mut bytes = if self.partial.is_empty() {
            chunk
        } else {
            self.partial.extend_from_slice(chunk);
            joined = std::mem::take(&mut self.partial);
            joined.as_slice()
        };

        loop {
            match std::str::from_utf8(bytes) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(e) => {
                    let (valid, rest) = bytes.split_at(e.valid_up_to());
                    self.buffer.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[len..];
                        }
                        None => {
                            self.partial.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_line_in_small_chunks() {
        let line = format!(r#"{{"type":"response","content":"{}"}}"#, "é".repeat(4096));
        let payload = format!("{line}\nnext");
        let mut r = ChunkReassembler::new();
        let mut lines = Vec::new();
        for chunk in payload.as_bytes().chunks(7) {
            lines.extend(r.feed(chunk));
            assert!(!r.buffered().contains('\n'));
        }
        assert_eq!(lines, vec![line]);
        assert_eq!(r.buffered(), "next");
    }

    #[test]
    fn single_chunk_multiple_lines() {
        let mut r = ChunkReassembler::new();
        let lines = r.feed(b"{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(lines, vec!["{\"a\":1}", "{\"b\":2}"]);
        assert!(r.is_empty());
    }

    #[test]
    fn line_split_across_chunks() {
        let mut r = ChunkReassembler::new();
        assert!(r.feed(b"{\"type\":\"sta").is_empty());
        assert_eq!(r.buffered(), "{\"type\":\"sta");
        let lines = r.feed(b"tus\"}\n");
        assert_eq!(lines, vec!["{\"type\":\"status\"}"]);
    }

    #[test]
    fn multibyte_split_is_carried() {
        let text = "{\"content\":\"Praha ✓\"}\n";
        let bytes = text.as_bytes();
        let check = bytes.iter().position(|&b| b == 0xE2).unwrap();

        let mut r = ChunkReassembler::new();
        assert!(r.feed(&bytes[..check + 1]).is_empty());
        assert!(r.feed(&bytes[check + 1..check + 2]).is_empty());
        let lines = r.feed(&bytes[check + 2..]);
        assert_eq!(lines, vec!["{\"content\":\"Praha ✓\"}"]);
    }

    #[test]
    fn crlf_is_stripped() {
        let mut r = ChunkReassembler::new();
        let lines = r.feed(b"one\r\ntwo\r\n");
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let mut r = ChunkReassembler::new();
        let lines = r.feed(b"\n   \n\t\r\nx\n\n");
        assert_eq!(lines, vec!["x"]);
    }

    #[test]
    fn finish_emits_unterminated_line() {
        let mut r = ChunkReassembler::new();
        assert_eq!(r.feed(b"first\nsecond"), vec!["first"]);
        assert_eq!(r.finish().as_deref(), Some("second"));
    }

    #[test]
    fn finish_ignores_whitespace_tail() {
        let mut r = ChunkReassembler::new();
        r.feed(b"line\n  \t");
        assert_eq!(r.finish(), None);
        assert_eq!(ChunkReassembler::new().finish(), None);
    }

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let mut r = ChunkReassembler::new();
        let lines = r.feed(b"a\xFFb\n");
        assert_eq!(lines, vec!["a\u{FFFD}b"]);
    }

    #[test]
    fn truncated_multibyte_at_end_is_flushed_lossy() {
        let mut r = ChunkReassembler::new();
        r.feed(b"tail\xE2\x9C");
        assert!(!r.is_empty());
        assert_eq!(r.finish().as_deref(), Some("tail\u{FFFD}"));
    }
}
