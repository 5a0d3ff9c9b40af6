//! Async adapter from a byte stream to a stream of NDJSON lines.

use futures::{Stream, StreamExt};

use crate::reassembler::ChunkReassembler;

/// Turn a stream of byte chunks into a stream of complete lines.
///
/// Lines come out in transport order, blank lines removed. When the byte
/// stream ends, a final unterminated line is still yielded. The first
/// transport error is passed through and ends the stream; whatever was
/// buffered at that point is discarded.
pub fn ndjson_lines<S, B, E>(
    byte_stream: S,
) -> impl Stream<Item = Result<String, E>> + Send + 'static
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
{
    async_stream::stream! {
        let mut reassembler = ChunkReassembler::new();
        let mut chunks = std::pin::pin!(byte_stream);

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    for line in reassembler.feed(bytes.as_ref()) {
                        yield Ok(line);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        if let Some(line) = reassembler.finish() {
            yield Ok(line);
        }
    }
}
