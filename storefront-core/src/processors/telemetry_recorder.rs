//! TelemetryRecorder processor.
//!
//! The TelemetryRecorder is responsible for:
//! - Receiving `TelemetryEvent` from the telemetry channel
//! - Writing each one as a structured `tracing` record under the
//!   `storefront::telemetry` target
//! - Flushing whatever is still queued when shutdown is signalled

use crate::telemetry::{TelemetryEvent, TelemetryReceiver};
use tokio::sync::watch;
use tracing::{debug, info};

/// Drains telemetry events into the `tracing` pipeline.
pub struct TelemetryRecorder {
    telemetry_rx: TelemetryReceiver,
    shutdown_rx: watch::Receiver<bool>,
}

impl TelemetryRecorder {
    /// Create a new TelemetryRecorder.
    ///
    /// # Arguments
    ///
    /// * `telemetry_rx` - Receiver for TelemetryEvent events
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(telemetry_rx: TelemetryReceiver, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self {
            telemetry_rx,
            shutdown_rx,
        }
    }

    /// Run the TelemetryRecorder until shutdown or until every sender is gone.
    ///
    /// Returns the number of events recorded.
    pub async fn run(mut self) -> u64 {
        info!("TelemetryRecorder started");
        let mut recorded = 0u64;

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("TelemetryRecorder received shutdown signal");
                        break;
                    }
                }

                event = self.telemetry_rx.recv() => {
                    let Some(event) = event else {
                        info!("Telemetry channel closed");
                        break;
                    };
                    record(&event);
                    recorded += 1;
                }
            }
        }

        // Flush events queued before shutdown.
        while let Ok(event) = self.telemetry_rx.try_recv() {
            record(&event);
            recorded += 1;
        }

        info!(recorded, "TelemetryRecorder shutdown complete");
        recorded
    }
}

/// Write one event as a `tracing` record.
pub fn record(event: &TelemetryEvent) {
    match event {
        TelemetryEvent::Trace { tag } => {
            info!(target: "storefront::telemetry", kind = "trace", tag = %tag);
        }
        TelemetryEvent::Event {
            tag,
            properties,
            measurements,
        } => {
            let properties = serde_json::to_string(properties).unwrap_or_default();
            let measurements = measurements
                .as_ref()
                .and_then(|m| serde_json::to_string(m).ok());
            info!(
                target: "storefront::telemetry",
                kind = "event",
                tag = %tag,
                properties = %properties,
                measurements = measurements.as_deref(),
            );
        }
    }
    debug!(tag = event.tag(), "Telemetry event recorded");
}
