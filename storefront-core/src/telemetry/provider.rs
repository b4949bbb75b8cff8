use super::channels::TelemetrySender;
use super::types::{Measurements, Properties, TelemetryEvent};
use std::sync::Mutex;
use tokio::sync::mpsc::error::TrySendError;

/// Fire-and-forget telemetry sink.
pub trait TelemetryProvider: Send + Sync {
    fn track_trace(&self, tag: &str);

    fn track_event(&self, tag: &str, properties: Properties, measurements: Option<Measurements>);
}

/// Pushes events onto the telemetry channel without waiting.
///
/// A full or closed channel drops the event.
#[derive(Clone)]
pub struct ChannelTelemetry {
    tx: TelemetrySender,
}

impl ChannelTelemetry {
    pub fn new(tx: TelemetrySender) -> Self {
        Self { tx }
    }

    fn emit(&self, event: TelemetryEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(tag = event.tag(), "Telemetry channel full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(tag = event.tag(), "Telemetry channel closed, dropping event");
            }
        }
    }
}

impl TelemetryProvider for ChannelTelemetry {
    fn track_trace(&self, tag: &str) {
        self.emit(TelemetryEvent::Trace {
            tag: tag.to_string(),
        });
    }

    fn track_event(&self, tag: &str, properties: Properties, measurements: Option<Measurements>) {
        self.emit(TelemetryEvent::Event {
            tag: tag.to_string(),
            properties,
            measurements,
        });
    }
}

/// Keeps every event in memory. Used by tests to assert on what a
/// handler reported.
#[derive(Debug, Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, oldest first.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of recorded events with the given tag.
    pub fn count(&self, tag: &str) -> usize {
        self.events().iter().filter(|e| e.tag() == tag).count()
    }

    fn push(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl TelemetryProvider for RecordingTelemetry {
    fn track_trace(&self, tag: &str) {
        self.push(TelemetryEvent::Trace {
            tag: tag.to_string(),
        });
    }

    fn track_event(&self, tag: &str, properties: Properties, measurements: Option<Measurements>) {
        self.push(TelemetryEvent::Event {
            tag: tag.to_string(),
            properties,
            measurements,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::telemetry_channel;

    #[tokio::test]
    async fn test_channel_telemetry_delivers() {
        let (tx, mut rx) = telemetry_channel(4);
        let telemetry = ChannelTelemetry::new(tx);
        telemetry.track_trace("Order/Server/NullId");
        assert_eq!(
            rx.recv().await,
            Some(TelemetryEvent::Trace {
                tag: "Order/Server/NullId".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_full_channel_drops_without_blocking() {
        let (tx, mut rx) = telemetry_channel(1);
        let telemetry = ChannelTelemetry::new(tx);
        telemetry.track_trace("first");
        telemetry.track_trace("second");
        assert_eq!(rx.recv().await.map(|e| e.tag().to_string()), Some("first".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = telemetry_channel(1);
        drop(rx);
        let telemetry = ChannelTelemetry::new(tx);
        telemetry.track_event("Order/Server/Details", Properties::new(), None);
    }

    #[test]
    fn test_recording_counts_by_tag() {
        let telemetry = RecordingTelemetry::new();
        telemetry.track_trace("a");
        telemetry.track_trace("b");
        telemetry.track_trace("a");
        assert_eq!(telemetry.count("a"), 2);
        assert_eq!(telemetry.events().len(), 3);
    }
}
