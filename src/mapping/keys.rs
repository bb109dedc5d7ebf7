//! # Direction Derivation Module
//!
//! Combines the analog stick with the four direction buttons into the key
//! states used by the keyboard device variant.
//!
//! A direction is asserted when the stick leaves its dead band in that
//! direction OR the matching button is held. The two sources are a plain
//! logical OR: a stick pushed one way and a button held the other way assert
//! both directions in the same frame.
//!
//! Stick sense follows the firmware wiring: X values strictly below the low
//! threshold mean right and strictly above the high threshold mean left;
//! Y values below mean up and above mean down. The band between the two
//! thresholds asserts nothing.

use crate::telemetry::TelemetryReading;

/// Stick dead band bounds in the raw ADC domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdBand {
    pub low: i32,
    pub high: i32,
}

/// Derived directional key states, level-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalState {
    pub up: bool,
    pub left: bool,
    pub down: bool,
    pub right: bool,
}

/// Derives directional key states from one reading.
///
/// # Examples
///
/// ```
/// use motion_bridge::mapping::{derive_directions, ThresholdBand};
/// use motion_bridge::telemetry::decode;
///
/// let band = ThresholdBand { low: 1000, high: 3000 };
///
/// // Stick pushed right, no buttons.
/// let reading = decode(b"500,2000,0,0,0,0,0,0.0,0.0").unwrap();
/// let dirs = derive_directions(&reading, &band);
/// assert!(dirs.right && !dirs.left);
/// ```
#[must_use]
pub fn derive_directions(reading: &TelemetryReading, band: &ThresholdBand) -> DirectionalState {
    DirectionalState {
        up: reading.stick_y < band.low || reading.button_up(),
        left: reading.stick_x > band.high || reading.button_left(),
        down: reading.stick_y > band.high || reading.button_down(),
        right: reading.stick_x < band.low || reading.button_right(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::decode;

    const BAND: ThresholdBand = ThresholdBand { low: 1000, high: 3000 };

    fn reading(stick_x: i32, stick_y: i32, flags: [u8; 5]) -> TelemetryReading {
        let payload = format!(
            "{},{},{},{},{},{},{},0.0,0.0",
            stick_x, stick_y, flags[0], flags[1], flags[2], flags[3], flags[4]
        );
        decode(payload.as_bytes()).unwrap()
    }

    #[test]
    fn test_deadzone_asserts_nothing() {
        let dirs = derive_directions(&reading(2000, 2000, [0; 5]), &BAND);
        assert_eq!(dirs, DirectionalState::default());
    }

    #[test]
    fn test_stick_below_low_is_right() {
        let dirs = derive_directions(&reading(500, 2000, [0; 5]), &BAND);
        assert!(dirs.right);
        assert!(!dirs.left);
        assert!(!dirs.up);
        assert!(!dirs.down);
    }

    #[test]
    fn test_stick_above_high_is_left() {
        let dirs = derive_directions(&reading(3500, 2000, [0; 5]), &BAND);
        assert!(dirs.left);
        assert!(!dirs.right);
    }

    #[test]
    fn test_stick_y_sense() {
        let dirs = derive_directions(&reading(2000, 200, [0; 5]), &BAND);
        assert!(dirs.up);
        assert!(!dirs.down);

        let dirs = derive_directions(&reading(2000, 3900, [0; 5]), &BAND);
        assert!(dirs.down);
        assert!(!dirs.up);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly on either bound is inside the dead band.
        let dirs = derive_directions(&reading(1000, 3000, [0; 5]), &BAND);
        assert_eq!(dirs, DirectionalState::default());
    }

    #[test]
    fn test_buttons_assert_directions() {
        // Wire order: select, up, left, down, right.
        let dirs = derive_directions(&reading(2000, 2000, [0, 1, 0, 0, 0]), &BAND);
        assert!(dirs.up && !dirs.left && !dirs.down && !dirs.right);

        let dirs = derive_directions(&reading(2000, 2000, [0, 0, 1, 0, 1]), &BAND);
        assert!(dirs.left && dirs.right);
    }

    #[test]
    fn test_stick_and_button_are_or_not_exclusive() {
        // Stick pushed right while the left button is held: both assert.
        let dirs = derive_directions(&reading(500, 2000, [0, 0, 1, 0, 0]), &BAND);
        assert!(dirs.right);
        assert!(dirs.left);
    }

    #[test]
    fn test_select_flag_does_not_affect_directions() {
        let dirs = derive_directions(&reading(2000, 2000, [1, 0, 0, 0, 0]), &BAND);
        assert_eq!(dirs, DirectionalState::default());
    }
}
