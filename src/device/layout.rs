//! # Device Layout Module
//!
//! Describes the controls a device variant exposes: ordered absolute axes
//! with their ranges and ordered keys. The same descriptor drives uinput
//! registration and the dispatcher's event ordering, so the registered
//! capabilities and the emitted frames cannot drift apart.

use evdev::{AbsInfo, AbsoluteAxisType, Key};

use crate::mapping::calibration::OutputRange;
use crate::mapping::frame::{DeviceVariant, GAMEPAD_BUTTONS, KEYBOARD_KEYS};

/// One absolute axis declaration.
#[derive(Debug, Clone, Copy)]
pub struct AxisSpec {
    pub axis: AbsoluteAxisType,
    pub min: i32,
    pub max: i32,
    pub fuzz: i32,
    pub flat: i32,
    pub resolution: i32,
}

impl AxisSpec {
    /// A plain axis with no fuzz, flat zone or resolution, matching the
    /// firmware's original device registration.
    #[must_use]
    pub fn plain(axis: AbsoluteAxisType, range: &OutputRange) -> Self {
        Self {
            axis,
            min: range.min,
            max: range.max,
            fuzz: 0,
            flat: 0,
            resolution: 0,
        }
    }

    /// The evdev `AbsInfo` for this axis, with the initial value centered.
    #[must_use]
    pub fn abs_info(&self) -> AbsInfo {
        AbsInfo::new(0, self.min, self.max, self.fuzz, self.flat, self.resolution)
    }
}

/// The full capability set of one device variant.
#[derive(Debug, Clone)]
pub struct DeviceLayout {
    /// Axes in declared (dispatch) order.
    pub axes: Vec<AxisSpec>,
    /// Keys in declared (dispatch) order.
    pub keys: Vec<Key>,
}

impl DeviceLayout {
    /// Builds the layout for a device variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_bridge::device::DeviceLayout;
    /// use motion_bridge::mapping::{DeviceVariant, OutputRange};
    ///
    /// let range = OutputRange { min: -32768, max: 32767 };
    /// let layout = DeviceLayout::for_variant(DeviceVariant::Gamepad, &range);
    /// assert_eq!(layout.axes.len(), 4);
    /// assert_eq!(layout.keys.len(), 5);
    /// ```
    #[must_use]
    pub fn for_variant(variant: DeviceVariant, output: &OutputRange) -> Self {
        match variant {
            DeviceVariant::Gamepad => Self {
                axes: vec![
                    AxisSpec::plain(AbsoluteAxisType::ABS_X, output),
                    AxisSpec::plain(AbsoluteAxisType::ABS_Y, output),
                    AxisSpec::plain(AbsoluteAxisType::ABS_RX, output),
                    AxisSpec::plain(AbsoluteAxisType::ABS_RY, output),
                ],
                keys: GAMEPAD_BUTTONS.to_vec(),
            },
            DeviceVariant::Keyboard => Self {
                axes: Vec::new(),
                keys: KEYBOARD_KEYS.to_vec(),
            },
        }
    }

    /// Total number of configured controls.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.axes.len() + self.keys.len()
    }
}
