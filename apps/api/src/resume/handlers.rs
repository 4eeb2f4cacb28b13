use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::analytics::AnalyticsEvent;
use crate::errors::AppError;
use crate::llm_client::CompletionRequest;
use crate::resume::prompts::{build_resume_prompt, RESUME_MAX_TOKENS, RESUME_SYSTEM};
use crate::resume::relay::{relay, ChannelSink, RelayOutcome, ResumeEvent};
use crate::state::AppState;

pub const MIN_ACCOMPLISHMENTS: usize = 2;
pub const MAX_ACCOMPLISHMENTS: usize = 6;
const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(default)]
    pub branch: String,
    pub rank: Option<String>,
    #[serde(default)]
    pub mos_afsc: String,
    pub years_of_service: Option<u32>,
    #[serde(default)]
    pub accomplishments: Vec<String>,
    #[serde(default)]
    pub target_industry: String,
    pub target_role: Option<String>,
    pub additional_context: Option<String>,
}

impl ResumeRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let filled = self
            .accomplishments
            .iter()
            .filter(|a| !a.trim().is_empty())
            .count();

        if self.branch.trim().is_empty() || self.mos_afsc.trim().is_empty() || filled == 0 {
            return Err(AppError::Validation(
                "Branch, MOS/AFSC, and accomplishments are required".to_string(),
            ));
        }
        if self.target_industry.trim().is_empty() {
            return Err(AppError::Validation("Target industry is required".to_string()));
        }
        if !(MIN_ACCOMPLISHMENTS..=MAX_ACCOMPLISHMENTS).contains(&filled) {
            return Err(AppError::Validation(
                "Please provide 2-6 accomplishments".to_string(),
            ));
        }
        Ok(())
    }
}

/// POST /api/resume/generate
///
/// Streams the translated resume as server-sent events:
/// `{"text": …}` per chunk, then `{"done": true}` or `{"error": "Stream interrupted"}`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(mut req): Json<ResumeRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    req.validate()?;
    req.accomplishments.retain(|a| !a.trim().is_empty());

    let source = state.chunk_source.clone().ok_or_else(|| {
        AppError::Unavailable("ANTHROPIC_API_KEY is not configured".to_string())
    })?;

    let chunks = source
        .open(CompletionRequest {
            system: RESUME_SYSTEM.to_string(),
            prompt: build_resume_prompt(&req),
            max_tokens: RESUME_MAX_TOKENS,
        })
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let events = state.events.clone();
    let industry = req.target_industry.clone();

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);
        match relay(chunks, &mut sink).await {
            RelayOutcome::Completed { chunks } => {
                info!("Resume stream completed ({chunks} chunks)");
                events.record(
                    AnalyticsEvent::tool_completed("resume-builder").with("target_industry", industry),
                );
            }
            RelayOutcome::Interrupted { chunks, reason } => {
                warn!("Resume stream interrupted after {chunks} chunks: {reason}");
            }
            RelayOutcome::Cancelled { chunks } => {
                info!("Resume stream cancelled by client after {chunks} chunks");
            }
        }
    });

    let body = stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        let sse = Event::default().data(event.payload().to_string());
        Some((Ok(sse), rx))
    });

    Ok(Sse::new(body).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(accomplishments: &[&str]) -> ResumeRequest {
        ResumeRequest {
            branch: "Navy".to_string(),
            rank: None,
            mos_afsc: "IT".to_string(),
            years_of_service: Some(6),
            accomplishments: accomplishments.iter().map(|a| a.to_string()).collect(),
            target_industry: "Technology".to_string(),
            target_role: None,
            additional_context: None,
        }
    }

    #[test]
    fn test_two_to_six_accomplishments_accepted() {
        assert!(request(&["a", "b"]).validate().is_ok());
        assert!(request(&["a", "b", "c", "d", "e", "f"]).validate().is_ok());
    }

    #[test]
    fn test_accomplishment_count_bounds() {
        assert!(request(&["only one"]).validate().is_err());
        assert!(request(&["1", "2", "3", "4", "5", "6", "7"]).validate().is_err());
        // blank entries do not count
        assert!(request(&["real", "  "]).validate().is_err());
    }

    #[test]
    fn test_required_fields() {
        let mut req = request(&["a", "b"]);
        req.mos_afsc = " ".to_string();
        assert!(req.validate().is_err());

        let mut req = request(&["a", "b"]);
        req.target_industry = String::new();
        assert!(req.validate().is_err());

        assert!(request(&[]).validate().is_err());
    }
}
