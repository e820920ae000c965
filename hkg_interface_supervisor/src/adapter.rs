//! Host adapter layer: turn the host's decoded key/value bundle into `CarSignals`.
//!
//! Small and policy-free:
//! - No IO
//! - No bit-level decoding (the host's CAN parsers already did that)
//!
//! Hosts either implement `SignalMapper` or use `BasicSignalMapper` with
//! their own key names.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::warn;

use hkg_interface_core::CarSignals;

/// One cycle of decoded values, keyed by the host's signal names.
///
/// Booleans are carried as 0.0 / 1.0.
#[derive(Clone, Debug, Default)]
pub struct RawSignals<'a> {
    pub values: HashMap<Cow<'a, str>, f64>,
}

impl<'a> RawSignals<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<Cow<'a, str>>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    pub fn with_flag(self, key: impl Into<Cow<'a, str>>, value: bool) -> Self {
        self.with_value(key, if value { 1.0 } else { 0.0 })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// Trait: map a raw bundle into the core's signal record.
///
/// Previous button codes are left at 0; the session fills them from the
/// prior cycle.
pub trait SignalMapper {
    fn map(&self, raw: &RawSignals<'_>) -> CarSignals;
}

/// Key names read by `BasicSignalMapper`.
#[derive(Clone, Debug)]
pub struct BasicKeys {
    pub v_ego: &'static str,
    pub steering_angle_deg: &'static str,
    pub left_blinker: &'static str,
    pub right_blinker: &'static str,
    pub cruise_buttons: &'static str,
    pub cruise_main_button: &'static str,
    pub cruise_available: &'static str,
    pub cruise_enabled: &'static str,
    pub cruise_unavail: &'static str,
    pub park_brake: &'static str,
    pub brake_error: &'static str,
    pub turning_signal_timer: &'static str,
    /// Main, secondary and camera parser validity.
    pub can_valid: [&'static str; 3],
}

impl BasicKeys {
    /// Every key except the validity flags.
    pub fn signal_keys(&self) -> [&'static str; 12] {
        [
            self.v_ego,
            self.steering_angle_deg,
            self.left_blinker,
            self.right_blinker,
            self.cruise_buttons,
            self.cruise_main_button,
            self.cruise_available,
            self.cruise_enabled,
            self.cruise_unavail,
            self.park_brake,
            self.brake_error,
            self.turning_signal_timer,
        ]
    }
}

impl Default for BasicKeys {
    fn default() -> Self {
        Self {
            v_ego: "vEgo",
            steering_angle_deg: "steeringAngleDeg",
            left_blinker: "leftBlinker",
            right_blinker: "rightBlinker",
            cruise_buttons: "cruiseButtons",
            cruise_main_button: "cruiseMainButton",
            cruise_available: "cruiseAvailable",
            cruise_enabled: "cruiseEnabled",
            cruise_unavail: "cruiseUnavail",
            park_brake: "parkBrake",
            brake_error: "brakeError",
            turning_signal_timer: "turningSignalTimer",
            can_valid: ["canValid", "canValid2", "canValidCam"],
        }
    }
}

/// Basic mapper over configurable keys.
///
/// Missing or non-finite values read as 0 / false, so a missing validity key
/// marks that parser invalid. A non-finite signal marks every parser invalid:
/// the 0 it reads as is not a measurement.
#[derive(Clone, Debug, Default)]
pub struct BasicSignalMapper {
    pub keys: BasicKeys,
}

impl BasicSignalMapper {
    #[inline]
    fn scalar(raw: &RawSignals<'_>, key: &str) -> f64 {
        match raw.get(key) {
            Some(v) if v.is_finite() => v,
            Some(v) => {
                warn!(key, value = v, "non-finite signal dropped");
                0.0
            }
            None => 0.0,
        }
    }

    #[inline]
    fn flag(raw: &RawSignals<'_>, key: &str) -> bool {
        Self::scalar(raw, key) != 0.0
    }

    /// Button codes are small non-negative integers; anything else reads as 0.
    #[inline]
    fn code(raw: &RawSignals<'_>, key: &str) -> u8 {
        let v = Self::scalar(raw, key);
        if (0.0..=f64::from(u8::MAX)).contains(&v) {
            v as u8
        } else {
            0
        }
    }
}

impl SignalMapper for BasicSignalMapper {
    fn map(&self, raw: &RawSignals<'_>) -> CarSignals {
        let k = &self.keys;
        let timer = Self::scalar(raw, k.turning_signal_timer).max(0.0);
        let corrupt = k
            .signal_keys()
            .iter()
            .any(|key| raw.get(key).map_or(false, |v| !v.is_finite()));
        let can_valid = if corrupt {
            [false; 3]
        } else {
            k.can_valid.map(|key| Self::flag(raw, key))
        };

        CarSignals {
            v_ego: Self::scalar(raw, k.v_ego) as f32,
            steering_angle_deg: Self::scalar(raw, k.steering_angle_deg) as f32,
            left_blinker: Self::flag(raw, k.left_blinker),
            right_blinker: Self::flag(raw, k.right_blinker),
            cruise_buttons: Self::code(raw, k.cruise_buttons),
            prev_cruise_buttons: 0,
            cruise_main_button: Self::code(raw, k.cruise_main_button),
            prev_cruise_main_button: 0,
            cruise_available: Self::flag(raw, k.cruise_available),
            cruise_enabled: Self::flag(raw, k.cruise_enabled),
            cruise_unavail: Self::flag(raw, k.cruise_unavail),
            park_brake: Self::flag(raw, k.park_brake),
            brake_error: Self::flag(raw, k.brake_error),
            turning_signal_timer: timer.min(f64::from(u32::MAX)) as u32,
            can_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_default_keys() {
        let raw = RawSignals::new()
            .with_value("vEgo", 12.5)
            .with_value("cruiseButtons", 2.0)
            .with_flag("leftBlinker", true)
            .with_value("turningSignalTimer", 40.0)
            .with_flag("canValid", true)
            .with_flag("canValid2", true)
            .with_flag("canValidCam", true);

        let s = BasicSignalMapper::default().map(&raw);
        assert_eq!(s.v_ego, 12.5);
        assert_eq!(s.cruise_buttons, 2);
        assert!(s.left_blinker);
        assert!(!s.right_blinker);
        assert_eq!(s.turning_signal_timer, 40);
        assert_eq!(s.can_valid, [true; 3]);
    }

    #[test]
    fn garbage_reads_as_zero() {
        let raw = RawSignals::new()
            .with_value("vEgo", f64::NAN)
            .with_value("cruiseButtons", -3.0)
            .with_value("cruiseMainButton", 700.0);

        let s = BasicSignalMapper::default().map(&raw);
        assert_eq!(s.v_ego, 0.0);
        assert_eq!(s.cruise_buttons, 0);
        assert_eq!(s.cruise_main_button, 0);
        assert_eq!(s.can_valid, [false; 3]);
    }

    #[test]
    fn non_finite_signal_invalidates_cycle() {
        let raw = RawSignals::new()
            .with_value("vEgo", f64::INFINITY)
            .with_flag("canValid", true)
            .with_flag("canValid2", true)
            .with_flag("canValidCam", true);

        let s = BasicSignalMapper::default().map(&raw);
        assert_eq!(s.v_ego, 0.0);
        assert_eq!(s.can_valid, [false; 3]);
    }

    #[test]
    fn unread_keys_do_not_invalidate() {
        let raw = RawSignals::new()
            .with_value("somethingElse", f64::NAN)
            .with_flag("canValid", true)
            .with_flag("canValid2", true)
            .with_flag("canValidCam", true);

        assert_eq!(BasicSignalMapper::default().map(&raw).can_valid, [true; 3]);
    }

    #[test]
    fn custom_keys() {
        let mapper = BasicSignalMapper {
            keys: BasicKeys { v_ego: "CLU11.CF_Clu_Vanz", ..BasicKeys::default() },
        };
        let raw = RawSignals::new().with_value("CLU11.CF_Clu_Vanz", 8.0);
        assert_eq!(mapper.map(&raw).v_ego, 8.0);
    }
}
