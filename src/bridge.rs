//! # Bridge Module
//!
//! The per-datagram pipeline: decode, then map. One datagram in, one complete
//! [`OutputFrame`] out, or nothing at all.
//!
//! The bridge is stateless across cycles. Every datagram is processed
//! independently, with no history, smoothing or duplicate detection; the only
//! long-lived data is the immutable calibration profile inside the frame
//! builder.

use crate::mapping::frame::{FrameBuilder, OutputFrame};
use crate::telemetry::decode;

/// Decodes datagrams and builds output frames for one configured device.
#[derive(Debug, Clone)]
pub struct Bridge {
    builder: FrameBuilder,
}

impl Bridge {
    /// Creates a bridge around a frame builder.
    #[must_use]
    pub fn new(builder: FrameBuilder) -> Self {
        Self { builder }
    }

    /// Processes one datagram payload.
    ///
    /// Returns `Some` with a fully populated frame when the payload decodes,
    /// `None` when it is malformed. Malformed payloads are a routine
    /// steady-state condition under lossy transport; the caller counts them
    /// and moves on without side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_bridge::bridge::Bridge;
    /// use motion_bridge::config::Config;
    /// use motion_bridge::mapping::{CalibrationProfile, DeviceVariant, FrameBuilder};
    ///
    /// let profile = CalibrationProfile::from_config(&Config::default());
    /// let bridge = Bridge::new(FrameBuilder::new(DeviceVariant::Gamepad, profile));
    ///
    /// assert!(bridge.frame_for(b"2047,2047,0,0,0,0,0,0.0,0.0").is_some());
    /// assert!(bridge.frame_for(b"garbage").is_none());
    /// ```
    #[must_use]
    pub fn frame_for(&self, payload: &[u8]) -> Option<OutputFrame> {
        decode(payload).map(|reading| self.builder.build(&reading))
    }
}
