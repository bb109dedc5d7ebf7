//! # Telemetry Module
//!
//! Decoding of the ESP32 controller's UDP telemetry records.

pub mod decoder;

pub use decoder::{decode, TelemetryReading, BUTTON_COUNT, FIELD_COUNT};
