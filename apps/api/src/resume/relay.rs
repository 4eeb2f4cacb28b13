//! Forwards text chunks from a streaming completion to a consumer.
//!
//! The relay knows nothing about prompts or transports: a `TextChunkSource`
//! produces chunks, a `TextChunkSink` consumes them. A sink that reports
//! itself closed cancels the relay, which drops the upstream stream.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::llm_client::{CompletionRequest, LlmError};

pub type ChunkStream = BoxStream<'static, Result<String, LlmError>>;

/// Opens a stream of text chunks for a completion request.
/// Carried in `AppState` as `Arc<dyn TextChunkSource>`.
#[async_trait]
pub trait TextChunkSource: Send + Sync {
    async fn open(&self, request: CompletionRequest) -> Result<ChunkStream, LlmError>;
}

/// The consumer has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkClosed;

#[async_trait]
pub trait TextChunkSink: Send {
    async fn chunk(&mut self, text: String) -> Result<(), SinkClosed>;
    async fn done(&mut self) -> Result<(), SinkClosed>;
    async fn interrupted(&mut self) -> Result<(), SinkClosed>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Completed { chunks: usize },
    Interrupted { chunks: usize, reason: String },
    Cancelled { chunks: usize },
}

/// Pumps `chunks` into `sink` until the source ends, fails, or the sink closes.
/// Nothing is buffered or retried.
pub async fn relay(mut chunks: ChunkStream, sink: &mut dyn TextChunkSink) -> RelayOutcome {
    let mut forwarded = 0;

    while let Some(next) = chunks.next().await {
        match next {
            Ok(text) => {
                if sink.chunk(text).await.is_err() {
                    return RelayOutcome::Cancelled { chunks: forwarded };
                }
                forwarded += 1;
            }
            Err(e) => {
                if sink.interrupted().await.is_err() {
                    return RelayOutcome::Cancelled { chunks: forwarded };
                }
                return RelayOutcome::Interrupted {
                    chunks: forwarded,
                    reason: e.to_string(),
                };
            }
        }
    }

    if sink.done().await.is_err() {
        return RelayOutcome::Cancelled { chunks: forwarded };
    }
    RelayOutcome::Completed { chunks: forwarded }
}

/// Terminal and non-terminal messages delivered to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeEvent {
    Text(String),
    Done,
    Interrupted,
}

impl ResumeEvent {
    pub fn payload(&self) -> Value {
        match self {
            ResumeEvent::Text(text) => json!({ "text": text }),
            ResumeEvent::Done => json!({ "done": true }),
            ResumeEvent::Interrupted => json!({ "error": "Stream interrupted" }),
        }
    }
}

/// Sink backed by a bounded channel. The receiving half is the HTTP response;
/// when the client disconnects the receiver is dropped and sends fail.
pub struct ChannelSink {
    tx: mpsc::Sender<ResumeEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<ResumeEvent>) -> Self {
        Self { tx }
    }

    async fn send(&mut self, event: ResumeEvent) -> Result<(), SinkClosed> {
        self.tx.send(event).await.map_err(|_| SinkClosed)
    }
}

#[async_trait]
impl TextChunkSink for ChannelSink {
    async fn chunk(&mut self, text: String) -> Result<(), SinkClosed> {
        self.send(ResumeEvent::Text(text)).await
    }

    async fn done(&mut self) -> Result<(), SinkClosed> {
        self.send(ResumeEvent::Done).await
    }

    async fn interrupted(&mut self) -> Result<(), SinkClosed> {
        self.send(ResumeEvent::Interrupted).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunk_stream(items: Vec<Result<String, LlmError>>) -> ChunkStream {
        stream::iter(items).boxed()
    }

    fn texts(parts: &[&str]) -> Vec<Result<String, LlmError>> {
        parts.iter().map(|p| Ok(p.to_string())).collect()
    }

    async fn drain(mut rx: mpsc::Receiver<ResumeEvent>) -> Vec<ResumeEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_completed_stream_ends_with_done() {
        let (tx, rx) = mpsc::channel(8);
        let mut sink = ChannelSink::new(tx);
        let outcome = relay(chunk_stream(texts(&["Led ", "a team"])), &mut sink).await;
        drop(sink);

        assert_eq!(outcome, RelayOutcome::Completed { chunks: 2 });
        assert_eq!(
            drain(rx).await,
            vec![
                ResumeEvent::Text("Led ".to_string()),
                ResumeEvent::Text("a team".to_string()),
                ResumeEvent::Done
            ]
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_ends_with_interrupted() {
        let mut items = texts(&["partial"]);
        items.push(Err(LlmError::Stream("connection reset".to_string())));
        items.push(Ok("never sent".to_string()));

        let (tx, rx) = mpsc::channel(8);
        let mut sink = ChannelSink::new(tx);
        let outcome = relay(chunk_stream(items), &mut sink).await;
        drop(sink);

        assert!(matches!(outcome, RelayOutcome::Interrupted { chunks: 1, .. }));
        assert_eq!(
            drain(rx).await,
            vec![ResumeEvent::Text("partial".to_string()), ResumeEvent::Interrupted]
        );
    }

    #[tokio::test]
    async fn test_closed_sink_cancels_relay() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        let outcome = relay(chunk_stream(texts(&["a", "b", "c"])), &mut sink).await;
        assert_eq!(outcome, RelayOutcome::Cancelled { chunks: 0 });
    }

    #[test]
    fn test_event_payloads() {
        assert_eq!(ResumeEvent::Text("hi".to_string()).payload(), json!({"text": "hi"}));
        assert_eq!(ResumeEvent::Done.payload(), json!({"done": true}));
        assert_eq!(
            ResumeEvent::Interrupted.payload(),
            json!({"error": "Stream interrupted"})
        );
    }
}
