//! Stream decoding for the remote wire format.
//!
//! The hosted API answers a streaming request with `text/event-stream`-style
//! lines, each prefixed `data: `. A payload of `[DONE]` terminates the
//! stream; every other payload is a JSON completion chunk carrying
//! incremental content. This module turns the raw byte stream of such a
//! response into a stream of [`Fragment`]s.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::error::{Error, Result};
use crate::observability::STREAM_SKIPPED_LINES;
use crate::types::{CompletionChunk, Fragment};

/// Marker prefix of a data-bearing line.
const DATA_PREFIX: &str = "data:";

/// Payload that signals end-of-stream.
const DONE_SENTINEL: &str = "[DONE]";

/// What one decoded line contributes to the stream.
enum Decoded {
    /// Zero, one, or two fragments (reasoning and content can share a line).
    Fragments(Vec<Fragment>),
    /// The terminator; decoding stops and later lines are ignored.
    Done,
}

/// Process a stream of bytes into a stream of decoded fragments.
///
/// This function takes the byte stream of an open HTTP response and decodes
/// it line by line, handling buffering across chunk boundaries. Malformed
/// and unprefixed lines are skipped silently; they never fail the stream.
pub fn process_sse<S>(byte_stream: S) -> impl Stream<Item = Result<Fragment>>
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
    let pending = VecDeque::new();

    stream::unfold(
        (stream, buffer, pending, false),
        move |(mut stream, mut buffer, mut pending, mut eof)| async move {
            loop {
                // Fragments decoded from an earlier line drain first
                if let Some(fragment) = pending.pop_front() {
                    return Some((Ok(fragment), (stream, buffer, pending, eof)));
                }

                // Then decode any complete line sitting in the buffer
                if let Some(line) = take_line(&mut buffer) {
                    match decode_line(&line) {
                        Decoded::Fragments(fragments) => pending.extend(fragments),
                        Decoded::Done => return None,
                    }
                    continue;
                }

                if eof {
                    // The stream may end without a trailing newline
                    if buffer.is_empty() {
                        return None;
                    }
                    let line = std::mem::take(&mut buffer);
                    match decode_line(&line) {
                        Decoded::Fragments(fragments) => pending.extend(fragments),
                        Decoded::Done => return None,
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
                                (stream, buffer, pending, eof),
                            ));
                        }
                    },
                    Some(Err(e)) => {
                        return Some((Err(e), (stream, buffer, pending, eof)));
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

/// Decode a single line of the remote format.
///
/// Lines without the `data:` prefix (empty lines, keep-alive comments) are
/// skipped, as are payloads that fail to parse as a completion chunk.
fn decode_line(line: &str) -> Decoded {
    let Some(payload) = line.strip_prefix(DATA_PREFIX).map(str::trim) else {
        return Decoded::Fragments(Vec::new());
    };
    if payload == DONE_SENTINEL {
        return Decoded::Done;
    }
    match serde_json::from_str::<CompletionChunk>(payload) {
        Ok(chunk) => {
            let mut fragments = Vec::new();
            if let Some(choice) = chunk.choices.into_iter().next() {
                if let Some(text) = choice.delta.reasoning_content {
                    fragments.push(Fragment::Reasoning(text));
                }
                if let Some(text) = choice.delta.content {
                    fragments.push(Fragment::Content(text));
                }
            }
            Decoded::Fragments(fragments)
        }
        Err(_) => {
            STREAM_SKIPPED_LINES.click();
            Decoded::Fragments(Vec::new())
        }
    }
}
