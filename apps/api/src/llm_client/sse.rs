//! Decoder for the Messages API event stream.
//!
//! The body is a sequence of server-sent events separated by blank lines.
//! Only text deltas, the stop marker and error events matter here; pings,
//! block boundaries and usage updates are skipped.

use std::collections::VecDeque;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;

use crate::llm_client::LlmError;
use crate::resume::relay::ChunkStream;

#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    TextDelta(String),
    MessageStop,
    Error(String),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ApiEvent {
    ContentBlockDelta { delta: Delta },
    MessageStop,
    Error { error: ApiErrorBody },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Delta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Incremental decoder. Bytes may arrive split anywhere, including inside a
/// UTF-8 sequence; only complete events are decoded.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn push(&mut self, bytes: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend(bytes.iter().filter(|b| **b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_blank_line(&self.buffer) {
            let block: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(event) = decode_block(&block[..end]) {
                events.push(event);
            }
        }
        events
    }
}

fn find_blank_line(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn decode_block(block: &[u8]) -> Option<StreamEvent> {
    let text = String::from_utf8_lossy(block);
    let data: String = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n");

    if data.is_empty() {
        return None;
    }

    match serde_json::from_str::<ApiEvent>(&data) {
        Ok(ApiEvent::ContentBlockDelta {
            delta: Delta::TextDelta { text },
        }) => Some(StreamEvent::TextDelta(text)),
        Ok(ApiEvent::MessageStop) => Some(StreamEvent::MessageStop),
        Ok(ApiEvent::Error { error }) => Some(StreamEvent::Error(error.message)),
        Ok(_) => None,
        Err(e) => Some(StreamEvent::Error(format!("malformed event: {e}"))),
    }
}

struct DecodeState<S> {
    bytes: std::pin::Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<StreamEvent>,
    finished: bool,
}

impl<S> DecodeState<S> {
    fn finish(mut self) -> Self {
        self.finished = true;
        self.pending.clear();
        self
    }
}

/// Turns a raw response body into a stream of text chunks. The stream ends
/// after the stop marker; an error event, a transport error or a body that
/// ends early yields one `Err` and then ends.
pub fn text_chunks<S, E>(bytes: S) -> ChunkStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<LlmError> + Send + 'static,
{
    let state = DecodeState {
        bytes: Box::pin(bytes),
        decoder: SseDecoder::default(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            match state.pending.pop_front() {
                Some(StreamEvent::TextDelta(text)) => return Some((Ok(text), state)),
                Some(StreamEvent::Error(message)) => {
                    return Some((Err(LlmError::Stream(message)), state.finish()))
                }
                Some(StreamEvent::MessageStop) => {
                    state = state.finish();
                    continue;
                }
                None => {}
            }

            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.push(&chunk);
                    state.pending.extend(events);
                }
                Some(Err(e)) => return Some((Err(e.into()), state.finish())),
                None => {
                    let err = LlmError::Stream("stream ended before message_stop".to_string());
                    return Some((Err(err), state.finish()));
                }
            }
        }
    })
    .boxed()
}
