//! Background processors.
//!
//! - [`TelemetryRecorder`]: drains the telemetry channel into `tracing`

pub mod telemetry_recorder;

pub use telemetry_recorder::TelemetryRecorder;
