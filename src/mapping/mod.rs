//! # Mapping Module
//!
//! Pure numeric transforms from raw telemetry values to destination-protocol
//! values, driven by an injected [`CalibrationProfile`]. No state is kept
//! beyond the profile; identical readings always map to identical frames.

pub mod calibration;
pub mod frame;
pub mod keys;

pub use calibration::{CalibrationProfile, OutputRange, StickScale};
pub use frame::{DeviceVariant, FrameBuilder, OutputFrame};
pub use keys::{derive_directions, DirectionalState, ThresholdBand};
