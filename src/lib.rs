//! # Motion Bridge Library
//!
//! Present an ESP32 motion controller as a virtual Linux input device.
//!
//! This library receives the controller's UDP telemetry (joystick, buttons and
//! tilt angles), remaps each raw field onto the destination input protocol's
//! range, and commits every sample as one atomic frame to a uinput device.

pub mod bridge;
pub mod config;
pub mod device;
pub mod error;
pub mod mapping;
pub mod telemetry;
