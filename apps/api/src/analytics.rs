//! Product analytics. Handlers record events through an injected `EventSink`;
//! the default sink writes them as structured tracing events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    PageView,
    ToolStarted,
    ToolStepCompleted,
    ToolCompleted,
    EmailCaptured,
    EmailModalOpened,
    EmailModalClosed,
    NavClick,
    CtaClick,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::PageView => "page_view",
            EventName::ToolStarted => "tool_started",
            EventName::ToolStepCompleted => "tool_step_completed",
            EventName::ToolCompleted => "tool_completed",
            EventName::EmailCaptured => "email_captured",
            EventName::EmailModalOpened => "email_modal_opened",
            EventName::EmailModalClosed => "email_modal_closed",
            EventName::NavClick => "nav_click",
            EventName::CtaClick => "cta_click",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub name: EventName,
    pub properties: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(name: EventName) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            properties: Map::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// `tool_completed` for one of the calculators.
    pub fn tool_completed(tool_name: &str) -> Self {
        Self::new(EventName::ToolCompleted).with("tool_name", tool_name)
    }
}

/// Destination for analytics events. Carried in `AppState` as `Arc<dyn EventSink>`.
pub trait EventSink: Send + Sync {
    fn record(&self, event: AnalyticsEvent);
}

/// Logs every event on the `analytics` target.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: AnalyticsEvent) {
        let properties = Value::Object(event.properties);
        tracing::info!(
            target: "analytics",
            event_id = %event.id,
            event = event.name.as_str(),
            timestamp = %event.timestamp.to_rfc3339(),
            properties = %properties,
            "analytics event"
        );
    }
}

/// Keeps events in memory so tests can inspect what was recorded.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<AnalyticsEvent>>,
}

#[cfg(test)]
impl RecordingEventSink {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl EventSink for RecordingEventSink {
    fn record(&self, event: AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_wire_format() {
        assert_eq!(
            serde_json::to_value(EventName::ToolStepCompleted).unwrap(),
            "tool_step_completed"
        );
        let parsed: EventName = serde_json::from_str("\"email_captured\"").unwrap();
        assert_eq!(parsed, EventName::EmailCaptured);
        assert_eq!(parsed.as_str(), "email_captured");
    }

    #[test]
    fn test_tool_completed_carries_tool_name() {
        let event = AnalyticsEvent::tool_completed("tax-calculator");
        assert_eq!(event.name, EventName::ToolCompleted);
        assert_eq!(event.properties["tool_name"], "tax-calculator");
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingEventSink::default();
        sink.record(AnalyticsEvent::new(EventName::PageView).with("path", "/tools"));
        sink.record(AnalyticsEvent::tool_completed("roi-calculator"));
        let names: Vec<EventName> = sink.events().iter().map(|e| e.name).collect();
        assert_eq!(names, [EventName::PageView, EventName::ToolCompleted]);
    }
}
