//! Telemetry channel factory and handles.

use super::types::TelemetryEvent;
use tokio::sync::mpsc;

/// Default buffer size for the telemetry channel.
pub const DEFAULT_TELEMETRY_BUFFER: usize = 256;

/// Sender handle for telemetry events.
pub type TelemetrySender = mpsc::Sender<TelemetryEvent>;
/// Receiver handle for telemetry events.
pub type TelemetryReceiver = mpsc::Receiver<TelemetryEvent>;

/// Create a new telemetry channel with room for `buffer` pending events.
///
/// A zero buffer is bumped to one since `mpsc::channel` rejects it.
pub fn telemetry_channel(buffer: usize) -> (TelemetrySender, TelemetryReceiver) {
    mpsc::channel(buffer.max(1))
}
