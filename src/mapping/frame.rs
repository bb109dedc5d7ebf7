//! # Frame Builder Module
//!
//! Turns one decoded [`TelemetryReading`] into a fully populated
//! [`OutputFrame`] for the configured device variant.
//!
//! ## Control Assignments
//!
//! Gamepad variant:
//!
//! | Control | Source |
//! |---------|--------|
//! | ABS_X | Joystick X |
//! | ABS_Y | Joystick Y |
//! | ABS_RX | Roll angle |
//! | ABS_RY | Pitch angle |
//! | BTN_TL | Select (stick press) |
//! | BTN_SOUTH / BTN_EAST / BTN_NORTH / BTN_WEST | Up / Left / Down / Right buttons |
//!
//! The face buttons use the kernel's canonical BTN_SOUTH-family codes (the
//! gamepad A/B/X/Y aliases).
//!
//! Keyboard variant: KEY_ENTER from select, KEY_UP/KEY_LEFT/KEY_DOWN/KEY_RIGHT
//! from the stick-or-button direction derivation. No axes.
//!
//! Every frame carries a value for every configured control, so each committed
//! frame re-asserts absolute state (level-triggered, no edge detection).

use evdev::{AbsoluteAxisType, Key};

use crate::mapping::calibration::CalibrationProfile;
use crate::mapping::keys::derive_directions;
use crate::telemetry::{TelemetryReading, BUTTON_COUNT};

/// Gamepad button codes in wire order: select, up, left, down, right.
pub const GAMEPAD_BUTTONS: [Key; BUTTON_COUNT] = [
    Key::BTN_TL,
    Key::BTN_SOUTH,
    Key::BTN_EAST,
    Key::BTN_NORTH,
    Key::BTN_WEST,
];

/// Keyboard key codes in dispatch order: select, up, left, down, right.
pub const KEYBOARD_KEYS: [Key; BUTTON_COUNT] = [
    Key::KEY_ENTER,
    Key::KEY_UP,
    Key::KEY_LEFT,
    Key::KEY_DOWN,
    Key::KEY_RIGHT,
];

/// Which virtual device the bridge presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceVariant {
    /// Four absolute axes plus five buttons.
    Gamepad,
    /// Arrow keys plus enter, derived from stick and buttons.
    Keyboard,
}

impl DeviceVariant {
    /// Parses a configured variant name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gamepad" => Some(Self::Gamepad),
            "keyboard" => Some(Self::Keyboard),
            _ => None,
        }
    }
}

/// Destination values for every configured control of one input sample.
///
/// Axis and key entries are in dispatch order. The frame is fully populated
/// before it reaches the dispatcher; a reading either produces a complete
/// frame or no frame at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFrame {
    /// Continuous axis values in declared axis order.
    pub axes: Vec<(AbsoluteAxisType, i32)>,
    /// Digital control values (1 = pressed, 0 = released) in declared order.
    pub keys: Vec<(Key, i32)>,
}

/// Builds output frames for one device variant and calibration profile.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    variant: DeviceVariant,
    profile: CalibrationProfile,
}

impl FrameBuilder {
    /// Creates a frame builder for the given variant and profile.
    #[must_use]
    pub fn new(variant: DeviceVariant, profile: CalibrationProfile) -> Self {
        Self { variant, profile }
    }

    /// The variant this builder targets.
    #[must_use]
    pub fn variant(&self) -> DeviceVariant {
        self.variant
    }

    /// The calibration profile in use.
    #[must_use]
    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }

    /// Builds the output frame for one reading.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_bridge::config::Config;
    /// use motion_bridge::mapping::{CalibrationProfile, DeviceVariant, FrameBuilder};
    /// use motion_bridge::telemetry::decode;
    ///
    /// let profile = CalibrationProfile::from_config(&Config::default());
    /// let builder = FrameBuilder::new(DeviceVariant::Gamepad, profile);
    ///
    /// let reading = decode(b"2047,2047,0,0,0,0,0,0.0,0.0").unwrap();
    /// let frame = builder.build(&reading);
    /// assert_eq!(frame.axes.len(), 4);
    /// assert_eq!(frame.keys.len(), 5);
    /// ```
    #[must_use]
    pub fn build(&self, reading: &TelemetryReading) -> OutputFrame {
        match self.variant {
            DeviceVariant::Gamepad => self.build_gamepad(reading),
            DeviceVariant::Keyboard => self.build_keyboard(reading),
        }
    }

    fn build_gamepad(&self, reading: &TelemetryReading) -> OutputFrame {
        let axes = vec![
            (AbsoluteAxisType::ABS_X, self.profile.map_stick_x(reading.stick_x)),
            (AbsoluteAxisType::ABS_Y, self.profile.map_stick_y(reading.stick_y)),
            (AbsoluteAxisType::ABS_RX, self.profile.map_roll(reading.roll)),
            (AbsoluteAxisType::ABS_RY, self.profile.map_pitch(reading.pitch)),
        ];

        let keys = GAMEPAD_BUTTONS
            .iter()
            .zip(reading.buttons.iter())
            .map(|(&key, &pressed)| (key, i32::from(pressed)))
            .collect();

        OutputFrame { axes, keys }
    }

    fn build_keyboard(&self, reading: &TelemetryReading) -> OutputFrame {
        let dirs = derive_directions(reading, &self.profile.band);
        let states = [
            reading.select(),
            dirs.up,
            dirs.left,
            dirs.down,
            dirs.right,
        ];

        let keys = KEYBOARD_KEYS
            .iter()
            .zip(states.iter())
            .map(|(&key, &pressed)| (key, i32::from(pressed)))
            .collect();

        OutputFrame {
            axes: Vec::new(),
            keys,
        }
    }
}
