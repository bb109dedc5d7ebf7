//! # Virtual Device Module
//!
//! Registers the logical input device with the kernel's uinput subsystem and
//! writes committed frames to it.
//!
//! Registration failure (missing /dev/uinput, insufficient permissions) is
//! fatal at startup: there is no way to serve input without the device, so the
//! process reports the condition and exits rather than run degraded.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, InputEvent, Key, UinputAbsSetup};
use tracing::info;

use crate::device::layout::DeviceLayout;
use crate::error::{MotionBridgeError, Result};

/// Sink for one atomic batch of input events.
///
/// This is the seam between the dispatcher and the kernel: production code
/// writes to a [`VirtualPad`], tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait EventWriter {
    /// Writes one complete frame. The implementation is responsible for the
    /// terminating synchronization event.
    fn write_frame(&mut self, events: &[InputEvent]) -> std::io::Result<()>;
}

/// A registered uinput device presenting the bridged controller.
pub struct VirtualPad {
    device: VirtualDevice,
}

impl VirtualPad {
    /// Registers a virtual device with the capabilities in `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`MotionBridgeError::Device`] if uinput registration fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use motion_bridge::device::{DeviceLayout, VirtualPad};
    /// use motion_bridge::mapping::{DeviceVariant, OutputRange};
    ///
    /// let range = OutputRange { min: -32768, max: 32767 };
    /// let layout = DeviceLayout::for_variant(DeviceVariant::Gamepad, &range);
    /// let pad = VirtualPad::create("ESP32 Motion Controller", &layout)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn create(name: &str, layout: &DeviceLayout) -> Result<Self> {
        let mut builder = VirtualDeviceBuilder::new()
            .map_err(|e| MotionBridgeError::Device(format!("cannot open uinput: {}", e)))?
            .name(name);

        for spec in &layout.axes {
            let setup = UinputAbsSetup::new(spec.axis, spec.abs_info());
            builder = builder
                .with_absolute_axis(&setup)
                .map_err(|e| MotionBridgeError::Device(format!("cannot declare axis: {}", e)))?;
        }

        if !layout.keys.is_empty() {
            let mut keys = AttributeSet::<Key>::new();
            for &key in &layout.keys {
                keys.insert(key);
            }
            builder = builder
                .with_keys(&keys)
                .map_err(|e| MotionBridgeError::Device(format!("cannot declare keys: {}", e)))?;
        }

        let device = builder
            .build()
            .map_err(|e| MotionBridgeError::Device(format!("cannot register device: {}", e)))?;

        info!(
            "Registered virtual device '{}' ({} axes, {} keys)",
            name,
            layout.axes.len(),
            layout.keys.len()
        );

        Ok(Self { device })
    }
}

impl EventWriter for VirtualPad {
    fn write_frame(&mut self, events: &[InputEvent]) -> std::io::Result<()> {
        // emit() appends the SYN_REPORT, so the whole batch applies atomically.
        self.device.emit(events)
    }
}
