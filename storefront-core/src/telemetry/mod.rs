//! Telemetry collaborator.
//!
//! Handlers report traces and events through a [`TelemetryProvider`].
//! The provider never reports failure back: telemetry must not change
//! the outcome of a request.
//!
//! # Event Flow
//!
//! 1. Handler calls [`ChannelTelemetry`] -> `try_send` on the telemetry channel
//! 2. `TelemetryRecorder` drains the channel and writes `tracing` records

pub mod channels;
pub mod provider;
pub mod types;

pub use channels::{
    DEFAULT_TELEMETRY_BUFFER, TelemetryReceiver, TelemetrySender, telemetry_channel,
};
pub use provider::{ChannelTelemetry, RecordingTelemetry, TelemetryProvider};
pub use types::{Measurements, Properties, TelemetryEvent};
