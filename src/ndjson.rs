//! Stream decoding for the local wire format.
//!
//! The local daemon answers a streaming request with newline-delimited JSON
//! objects, one per generated segment, with no prefix and no terminator
//! token; the stream ends when the body does. This module turns the raw
//! byte stream of such a response into a stream of [`Fragment`]s.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::{Error, Result};
use crate::observability::STREAM_SKIPPED_LINES;
use crate::types::{ChatChunk, Fragment};

/// Process a stream of bytes into a stream of decoded fragments.
///
/// Every non-empty line is parsed as a chat chunk; its `message.content`
/// field, when present, is the fragment. Malformed lines are skipped
/// silently; they never fail the stream.
pub fn process_ndjson<S>(byte_stream: S) -> impl Stream<Item = Result<Fragment>>
where
    S: Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Unpin + 'static,
{
    // Convert reqwest errors to our error type
    let stream = byte_stream.map(|result| {
        result
            .map_err(|e| Error::streaming(format!("error in HTTP stream: {e}"), Some(Box::new(e))))
    });

    // Use a state machine to process the line stream
    let buffer = String::new();

    stream::unfold(
        (stream, buffer, false),
        move |(mut stream, mut buffer, mut eof)| async move {
            loop {
                // Decode any complete line sitting in the buffer
                if let Some(line) = take_line(&mut buffer) {
                    if let Some(fragment) = decode_line(&line) {
                        return Some((Ok(fragment), (stream, buffer, eof)));
                    }
                    continue;
                }

                if eof {
                    // The stream may end without a trailing newline
                    if buffer.is_empty() {
                        return None;
                    }
                    let line = std::mem::take(&mut buffer);
                    if let Some(fragment) = decode_line(&line) {
                        return Some((Ok(fragment), (stream, buffer, eof)));
                    }
                    continue;
                }

                // Read more data
                match stream.next().await {
                    Some(Ok(bytes)) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => buffer.push_str(&text),
                        Err(e) => {
                            return Some((
                                Err(Error::encoding(
                                    format!("invalid UTF-8 in stream: {e}"),
                                    Some(Box::new(e)),
                                )),
                                (stream, buffer, eof),
                            ));
                        }
                    },
                    Some(Err(e)) => {
                        return Some((Err(e), (stream, buffer, eof)));
                    }
                    None => eof = true,
                }
            }
        },
    )
}

/// Remove and return the first complete line from the buffer.
fn take_line(buffer: &mut String) -> Option<String> {
    let newline = buffer.find('\n')?;
    let rest = buffer.split_off(newline + 1);
    let mut line = std::mem::replace(buffer, rest);
    line.truncate(line.len() - 1);
    if line.ends_with('\r') {
        line.pop();
    }
    Some(line)
}

/// Decode a single line of the local format.
fn decode_line(line: &str) -> Option<Fragment> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<ChatChunk>(line) {
        Ok(chunk) => chunk.into_content().map(Fragment::Content),
        Err(_) => {
            STREAM_SKIPPED_LINES.click();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tokio_test::assert_ok;

    async fn decode(chunks: Vec<&'static [u8]>) -> Vec<Fragment> {
        let stream = Box::pin(stream::iter(
            chunks.into_iter().map(|c| Ok(Bytes::from(c))).collect::<Vec<_>>(),
        ));
        let ndjson_stream = process_ndjson(stream);
        futures::pin_mut!(ndjson_stream);

        let mut fragments = Vec::new();
        while let Some(fragment) = ndjson_stream.next().await {
            fragments.push(assert_ok!(fragment));
        }
        fragments
    }

    #[tokio::test]
    async fn content_lines_in_order() {
        let data = b"{\"message\":{\"content\":\"Bon\"}}\n\
                     {\"message\":{\"content\":\"jour\"}}\n\
                     {\"message\":{\"content\":\"\"},\"done\":true}\n";
        let fragments = decode(vec![&data[..]]).await;
        assert_eq!(
            fragments,
            vec![
                Fragment::Content("Bon".to_string()),
                Fragment::Content("jour".to_string()),
                Fragment::Content(String::new()),
            ]
        );
    }

    #[tokio::test]
    async fn lines_without_content_contribute_nothing() {
        let data = b"{\"message\":{\"content\":\"hi\"}}\n\
                     {\"done\":true}\n\
                     {\"message\":{\"role\":\"assistant\"}}\n";
        let fragments = decode(vec![&data[..]]).await;
        assert_eq!(fragments, vec![Fragment::Content("hi".to_string())]);
    }

    #[tokio::test]
    async fn malformed_lines_skipped_silently() {
        let data = b"{\"message\":{\"content\":\"a\"}}\n\
                     garbage that is not json\n\
                     {\"message\":{\"content\":\"b\"}}\n";
        let fragments = decode(vec![&data[..]]).await;
        assert_eq!(
            fragments,
            vec![
                Fragment::Content("a".to_string()),
                Fragment::Content("b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn empty_lines_skipped() {
        let data = b"\n\n{\"message\":{\"content\":\"x\"}}\n\n";
        let fragments = decode(vec![&data[..]]).await;
        assert_eq!(fragments, vec![Fragment::Content("x".to_string())]);
    }

    #[tokio::test]
    async fn line_split_across_chunks() {
        let chunk1 = b"{\"message\":{\"con";
        let chunk2 = b"tent\":\"salut\"}}\n";
        let fragments = decode(vec![&chunk1[..], &chunk2[..]]).await;
        assert_eq!(fragments, vec![Fragment::Content("salut".to_string())]);
    }

    #[tokio::test]
    async fn trailing_line_without_newline() {
        let data = b"{\"message\":{\"content\":\"tail\"}}";
        let fragments = decode(vec![&data[..]]).await;
        assert_eq!(fragments, vec![Fragment::Content("tail".to_string())]);
    }

    #[tokio::test]
    async fn multibyte_content() {
        let data = "{\"message\":{\"content\":\"\u{4f60}\u{597d}\"}}\n".as_bytes();
        let fragments = decode(vec![data]).await;
        assert_eq!(fragments, vec![Fragment::Content("\u{4f60}\u{597d}".to_string())]);
    }
}
