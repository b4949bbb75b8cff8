use std::collections::BTreeMap;

/// String properties attached to an event.
pub type Properties = BTreeMap<String, String>;

/// Numeric measurements attached to an event.
pub type Measurements = BTreeMap<String, f64>;

/// A single telemetry record.
#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    /// A diagnostic trace identified by its tag.
    Trace { tag: String },
    /// A structured event.
    Event {
        tag: String,
        properties: Properties,
        measurements: Option<Measurements>,
    },
}

impl TelemetryEvent {
    pub fn tag(&self) -> &str {
        match self {
            TelemetryEvent::Trace { tag } => tag,
            TelemetryEvent::Event { tag, .. } => tag,
        }
    }
}
