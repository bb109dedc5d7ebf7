//! # Telemetry Decoder Module
//!
//! Parses one UDP datagram payload from the ESP32 controller into a
//! [`TelemetryReading`], or rejects it.
//!
//! ## Wire Format
//!
//! One datagram per input sample, ASCII text, nine comma-separated fields in
//! fixed order:
//!
//! | Field | Content | Type |
//! |-------|---------|------|
//! | 0 | Joystick X | decimal integer (0-4095) |
//! | 1 | Joystick Y | decimal integer (0-4095) |
//! | 2 | Select (stick press) | `"1"` = active |
//! | 3 | Up button | `"1"` = active |
//! | 4 | Left button | `"1"` = active |
//! | 5 | Down button | `"1"` = active |
//! | 6 | Right button | `"1"` = active |
//! | 7 | Pitch | decimal float, degrees |
//! | 8 | Roll | decimal float, degrees |
//!
//! There is no checksum, sequence number or terminator beyond UDP framing.
//!
//! ## Rejection Policy
//!
//! A wrong field count or a non-numeric token voids the whole record. This is
//! a routine condition under lossy transport, so rejection is silent: the
//! decoder returns `None` and the caller moves on to the next datagram. No
//! partial reading is ever produced.

/// Number of comma-separated fields in a telemetry record.
pub const FIELD_COUNT: usize = 9;

/// Number of digital controls carried per record.
pub const BUTTON_COUNT: usize = 5;

/// Token that marks a digital control as active. Any other token is inactive.
const ACTIVE_TOKEN: &str = "1";

/// One validated controller sample.
///
/// Raw values are kept in their hardware domains; scaling to the destination
/// protocol is the mapping module's job. `pitch` and `roll` are deliberately
/// unclamped here, out-of-range angles are legal and clamp during mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryReading {
    /// Joystick X, raw ADC domain.
    pub stick_x: i32,
    /// Joystick Y, raw ADC domain.
    pub stick_y: i32,
    /// Digital controls in wire order: select, up, left, down, right.
    pub buttons: [bool; BUTTON_COUNT],
    /// Pitch angle in degrees.
    pub pitch: f32,
    /// Roll angle in degrees.
    pub roll: f32,
}

impl TelemetryReading {
    /// Select (stick press) flag.
    #[must_use]
    pub fn select(&self) -> bool {
        self.buttons[0]
    }

    /// Up button flag.
    #[must_use]
    pub fn button_up(&self) -> bool {
        self.buttons[1]
    }

    /// Left button flag.
    #[must_use]
    pub fn button_left(&self) -> bool {
        self.buttons[2]
    }

    /// Down button flag.
    #[must_use]
    pub fn button_down(&self) -> bool {
        self.buttons[3]
    }

    /// Right button flag.
    #[must_use]
    pub fn button_right(&self) -> bool {
        self.buttons[4]
    }
}

/// Decodes one datagram payload into a [`TelemetryReading`].
///
/// Returns `None` for any malformed payload: non-UTF-8 bytes, a field count
/// other than [`FIELD_COUNT`], or a numeric field that fails to parse. Digital
/// flags cannot fail to parse; any token other than exactly `"1"` (no
/// surrounding whitespace) reads as inactive.
///
/// # Examples
///
/// ```
/// use motion_bridge::telemetry::decode;
///
/// let reading = decode(b"2047,2047,0,0,0,0,0,0.0,0.0").unwrap();
/// assert_eq!(reading.stick_x, 2047);
/// assert!(!reading.select());
///
/// // Eight fields: the whole record is discarded.
/// assert!(decode(b"2047,2047,0,0,0,0,0,0.0").is_none());
/// ```
#[must_use]
pub fn decode(payload: &[u8]) -> Option<TelemetryReading> {
    let text = std::str::from_utf8(payload).ok()?;
    let fields: Vec<&str> = text.split(',').collect();

    if fields.len() != FIELD_COUNT {
        return None;
    }

    let stick_x: i32 = fields[0].trim().parse().ok()?;
    let stick_y: i32 = fields[1].trim().parse().ok()?;

    let mut buttons = [false; BUTTON_COUNT];
    for (i, token) in fields[2..2 + BUTTON_COUNT].iter().enumerate() {
        // Exact equality, no trimming: a padded token is inactive.
        buttons[i] = *token == ACTIVE_TOKEN;
    }

    let pitch: f32 = fields[7].trim().parse().ok()?;
    let roll: f32 = fields[8].trim().parse().ok()?;

    Some(TelemetryReading {
        stick_x,
        stick_y,
        buttons,
        pitch,
        roll,
    })
}
