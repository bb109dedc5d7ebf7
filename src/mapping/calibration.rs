//! # Calibration Module
//!
//! Converts raw stick and tilt values into destination axis values.
//!
//! ## Stick Scaling
//!
//! The firmware's joystick reports a 12-bit ADC value. Two scale derivations
//! exist across deployed setups and they are not numerically identical near
//! the extremes, so both are supported as explicit configuration:
//!
//! - [`StickScale::CenterRatio`]: gain is derived as `out_max / center`, the
//!   `(v - c) * (32767 / c)` formula.
//! - [`StickScale::Gain`]: a fixed configured gain, e.g. `(v - c) * 16`.
//!
//! ## Tilt Scaling
//!
//! Tilt angles map linearly against a configured full-scale angle:
//! `round(angle / full_scale * out_max)`. Angles beyond full scale are legal
//! inputs and clamp to the output bounds.
//!
//! ## Usage
//!
//! ```
//! use motion_bridge::config::Config;
//! use motion_bridge::mapping::CalibrationProfile;
//!
//! let profile = CalibrationProfile::from_config(&Config::default());
//!
//! // Centered stick maps to the destination zero point.
//! assert_eq!(profile.map_stick(2047, false), 0);
//!
//! // Full-scale tilt maps to full deflection.
//! assert_eq!(profile.map_angle(90.0, false), 32767);
//! ```

use crate::config::Config;
use crate::mapping::keys::ThresholdBand;

/// Destination value bounds for continuous axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputRange {
    pub min: i32,
    pub max: i32,
}

impl OutputRange {
    /// Clamps a mapped value into the destination bounds.
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min, self.max)
    }
}

/// How the stick gain is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StickScale {
    /// Gain derived from the output range: `out_max / center`.
    CenterRatio,
    /// Explicit configured gain.
    Gain(f32),
}

/// Immutable calibration constants for one device profile.
///
/// Built once at startup from [`Config`] and shared by every mapping step.
/// Distinct deployments (different center values, scale factors, inverted
/// axes, keyboard thresholds) are expressed as different profiles rather than
/// different code paths.
#[derive(Debug, Clone)]
pub struct CalibrationProfile {
    /// Raw stick value at rest.
    pub center: i32,
    /// Stick gain derivation.
    pub scale: StickScale,
    /// Negate the mapped X axis.
    pub invert_x: bool,
    /// Negate the mapped Y axis.
    pub invert_y: bool,
    /// Tilt angle that maps to full output deflection, in degrees.
    pub full_scale_deg: f32,
    /// Negate the mapped pitch axis.
    pub invert_pitch: bool,
    /// Negate the mapped roll axis.
    pub invert_roll: bool,
    /// Destination axis bounds.
    pub output: OutputRange,
    /// Stick dead band for the keyboard variant's direction derivation.
    pub band: ThresholdBand,
}

impl CalibrationProfile {
    /// Builds a profile from validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            center: config.stick.center,
            scale: match config.stick.gain {
                Some(gain) => StickScale::Gain(gain),
                None => StickScale::CenterRatio,
            },
            invert_x: config.stick.invert_x,
            invert_y: config.stick.invert_y,
            full_scale_deg: config.tilt.full_scale_deg,
            invert_pitch: config.tilt.invert_pitch,
            invert_roll: config.tilt.invert_roll,
            output: OutputRange {
                min: config.output.min,
                max: config.output.max,
            },
            band: ThresholdBand {
                low: config.thresholds.low,
                high: config.thresholds.high,
            },
        }
    }

    /// Effective stick gain for this profile.
    #[must_use]
    pub fn stick_gain(&self) -> f32 {
        match self.scale {
            StickScale::CenterRatio => self.output.max as f32 / self.center as f32,
            StickScale::Gain(gain) => gain,
        }
    }

    /// Maps a raw stick value to the destination range.
    ///
    /// Computes `round((raw - center) * gain)`, negates if `invert` is set,
    /// then clamps to the output bounds. The center value always maps to 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_bridge::config::Config;
    /// use motion_bridge::mapping::CalibrationProfile;
    ///
    /// let profile = CalibrationProfile::from_config(&Config::default());
    /// assert_eq!(profile.map_stick(2047, false), 0);
    /// assert_eq!(profile.map_stick(4095, false), 32767);
    /// assert_eq!(profile.map_stick(4095, true), -32768);
    /// ```
    #[must_use]
    pub fn map_stick(&self, raw: i32, invert: bool) -> i32 {
        // Widened arithmetic: the decoder accepts any parseable i32, so the
        // offset, product and negation must not overflow before the clamp.
        let delta = raw as i64 - self.center as i64;
        let scaled = (delta as f64 * self.stick_gain() as f64).round() as i64;
        let signed = if invert { -scaled } else { scaled };
        signed.clamp(self.output.min as i64, self.output.max as i64) as i32
    }

    /// Maps a tilt angle in degrees to the destination range.
    ///
    /// Computes `round(angle / full_scale * out_max)`, negates if `invert` is
    /// set, then clamps. Angles beyond the full-scale angle clamp rather than
    /// wrap or error.
    #[must_use]
    pub fn map_angle(&self, degrees: f32, invert: bool) -> i32 {
        let scaled = (degrees / self.full_scale_deg * self.output.max as f32).round() as i32;
        let signed = if invert { -scaled } else { scaled };
        self.output.clamp(signed)
    }

    /// Maps the joystick X axis, honoring the profile's invert flag.
    #[must_use]
    pub fn map_stick_x(&self, raw: i32) -> i32 {
        self.map_stick(raw, self.invert_x)
    }

    /// Maps the joystick Y axis, honoring the profile's invert flag.
    #[must_use]
    pub fn map_stick_y(&self, raw: i32) -> i32 {
        self.map_stick(raw, self.invert_y)
    }

    /// Maps the pitch angle, honoring the profile's invert flag.
    #[must_use]
    pub fn map_pitch(&self, degrees: f32) -> i32 {
        self.map_angle(degrees, self.invert_pitch)
    }

    /// Maps the roll angle, honoring the profile's invert flag.
    #[must_use]
    pub fn map_roll(&self, degrees: f32) -> i32 {
        self.map_angle(degrees, self.invert_roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_profile() -> CalibrationProfile {
        CalibrationProfile::from_config(&Config::default())
    }

    // ==================== Stick Mapping Tests ====================

    #[test]
    fn test_map_stick_center_is_zero() {
        let profile = default_profile();
        assert_eq!(profile.map_stick(2047, false), 0);
        assert_eq!(profile.map_stick(2047, true), 0);
    }

    #[test]
    fn test_map_stick_extremes() {
        let profile = default_profile();
        // (4095 - 2047) * (32767 / 2047) overshoots slightly and clamps.
        assert_eq!(profile.map_stick(4095, false), 32767);
        // (0 - 2047) * (32767 / 2047) = -32767, within bounds.
        assert_eq!(profile.map_stick(0, false), -32767);
    }

    #[test]
    fn test_map_stick_invert_negates_before_clamp() {
        let profile = default_profile();
        // Unclamped value is +32785; inversion gives -32785 which clamps to min.
        assert_eq!(profile.map_stick(4095, true), -32768);
        assert_eq!(profile.map_stick(0, true), 32767);
    }

    #[test]
    fn test_map_stick_stays_in_bounds_over_raw_domain() {
        let profile = default_profile();
        for raw in (0..=4095).step_by(17) {
            let mapped = profile.map_stick(raw, false);
            assert!(mapped >= -32768 && mapped <= 32767, "raw {} mapped to {}", raw, mapped);
        }
    }

    #[test]
    fn test_map_stick_monotonic() {
        let profile = default_profile();
        let mut previous = profile.map_stick(0, false);
        for raw in 1..=4095 {
            let mapped = profile.map_stick(raw, false);
            assert!(mapped >= previous, "not monotonic at raw {}", raw);
            previous = mapped;
        }
    }

    #[test]
    fn test_map_stick_extreme_raw_values_clamp() {
        // The decoder accepts any parseable i32; values far outside the ADC
        // domain must clamp instead of overflowing the offset or negation.
        let profile = default_profile();
        assert_eq!(profile.map_stick(i32::MIN, false), -32768);
        assert_eq!(profile.map_stick(i32::MAX, false), 32767);
        assert_eq!(profile.map_stick(i32::MIN, true), 32767);
        assert_eq!(profile.map_stick(i32::MAX, true), -32768);
    }

    #[test]
    fn test_map_stick_explicit_gain_variant() {
        let mut profile = default_profile();
        profile.center = 2048;
        profile.scale = StickScale::Gain(16.0);

        assert_eq!(profile.map_stick(2048, false), 0);
        assert_eq!(profile.map_stick(2049, false), 16);
        assert_eq!(profile.map_stick(2047, false), -16);
        // (4095 - 2048) * 16 = 32752, inside the range.
        assert_eq!(profile.map_stick(4095, false), 32752);
        // (0 - 2048) * 16 = -32768, exactly the minimum.
        assert_eq!(profile.map_stick(0, false), -32768);
    }

    #[test]
    fn test_gain_variants_differ_near_extremes() {
        // The two source formulas are distinct profiles, not one formula.
        let ratio = default_profile();
        let mut fixed = default_profile();
        fixed.scale = StickScale::Gain(16.0);

        assert_ne!(ratio.map_stick(0, false), fixed.map_stick(0, false));
        assert_eq!(ratio.map_stick(2047, false), fixed.map_stick(2047, false));
    }

    #[test]
    fn test_stick_gain_derivation() {
        let profile = default_profile();
        assert!((profile.stick_gain() - 32767.0 / 2047.0).abs() < 1e-4);

        let mut fixed = default_profile();
        fixed.scale = StickScale::Gain(16.0);
        assert_eq!(fixed.stick_gain(), 16.0);
    }

    // ==================== Angle Mapping Tests ====================

    #[test]
    fn test_map_angle_zero_is_zero() {
        let profile = default_profile();
        assert_eq!(profile.map_angle(0.0, false), 0);
        assert_eq!(profile.map_angle(0.0, true), 0);
    }

    #[test]
    fn test_map_angle_full_scale() {
        let profile = default_profile();
        assert_eq!(profile.map_angle(90.0, false), 32767);
        assert_eq!(profile.map_angle(-90.0, false), -32767);
    }

    #[test]
    fn test_map_angle_half_scale() {
        let profile = default_profile();
        let mapped = profile.map_angle(45.0, false);
        assert!((mapped - 16384).abs() <= 1);
    }

    #[test]
    fn test_map_angle_clamps_out_of_range_input() {
        let profile = default_profile();
        assert_eq!(profile.map_angle(180.0, false), 32767);
        assert_eq!(profile.map_angle(-180.0, false), -32768);
        assert_eq!(profile.map_angle(1.0e6, false), 32767);
    }

    #[test]
    fn test_map_angle_invert() {
        let profile = default_profile();
        assert_eq!(profile.map_angle(90.0, true), -32767);
        assert_eq!(profile.map_angle(-90.0, true), 32767);
    }

    #[test]
    fn test_map_angle_monotonic() {
        let profile = default_profile();
        let mut previous = profile.map_angle(-120.0, false);
        let mut degrees = -120.0f32;
        while degrees <= 120.0 {
            let mapped = profile.map_angle(degrees, false);
            assert!(mapped >= previous, "not monotonic at {} degrees", degrees);
            previous = mapped;
            degrees += 0.25;
        }
    }

    #[test]
    fn test_map_angle_inverted_monotonic_non_increasing() {
        let profile = default_profile();
        let mut previous = profile.map_angle(-120.0, true);
        let mut degrees = -120.0f32;
        while degrees <= 120.0 {
            let mapped = profile.map_angle(degrees, true);
            assert!(mapped <= previous, "not non-increasing at {} degrees", degrees);
            previous = mapped;
            degrees += 0.25;
        }
    }

    #[test]
    fn test_map_angle_custom_full_scale() {
        let mut profile = default_profile();
        profile.full_scale_deg = 45.0;
        assert_eq!(profile.map_angle(45.0, false), 32767);
        assert_eq!(profile.map_angle(90.0, false), 32767);
    }

    // ==================== Profile Construction Tests ====================

    #[test]
    fn test_from_config_defaults() {
        let profile = default_profile();
        assert_eq!(profile.center, 2047);
        assert_eq!(profile.scale, StickScale::CenterRatio);
        assert!(!profile.invert_x);
        assert!(!profile.invert_y);
        assert_eq!(profile.full_scale_deg, 90.0);
        assert_eq!(profile.output, OutputRange { min: -32768, max: 32767 });
        assert_eq!(profile.band.low, 1000);
        assert_eq!(profile.band.high, 3000);
    }

    #[test]
    fn test_from_config_explicit_gain() {
        let mut config = Config::default();
        config.stick.gain = Some(16.0);
        config.stick.invert_y = true;
        let profile = CalibrationProfile::from_config(&config);
        assert_eq!(profile.scale, StickScale::Gain(16.0));
        assert!(profile.invert_y);
    }

    #[test]
    fn test_output_range_clamp() {
        let range = OutputRange { min: -32768, max: 32767 };
        assert_eq!(range.clamp(0), 0);
        assert_eq!(range.clamp(40000), 32767);
        assert_eq!(range.clamp(-40000), -32768);
        assert_eq!(range.clamp(32767), 32767);
        assert_eq!(range.clamp(-32768), -32768);
    }

    #[test]
    fn test_axis_helpers_honor_profile_flags() {
        let mut config = Config::default();
        config.stick.invert_x = true;
        config.tilt.invert_roll = true;
        let profile = CalibrationProfile::from_config(&config);

        assert_eq!(profile.map_stick_x(0), 32767);
        assert_eq!(profile.map_stick_y(0), -32767);
        assert_eq!(profile.map_roll(90.0), -32767);
        assert_eq!(profile.map_pitch(90.0), 32767);
    }
}
