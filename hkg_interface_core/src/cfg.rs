use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Read-only snapshot of the persistent toggles the interface consults.
///
/// The store itself is owned by the host; this crate only ever reads a copy.
/// Field names on the wire match the store's keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceParams {
    /// Override mode: cruise main engages lateral, gas does not disengage.
    #[serde(rename = "MadModeEnabled")]
    pub mad_mode_enabled: bool,
    #[serde(rename = "DisableRadar")]
    pub disable_radar: bool,
    #[serde(rename = "LongControlEnabled")]
    pub long_control_enabled: bool,
    #[serde(rename = "SteerLockout")]
    pub steer_lockout: bool,
    #[serde(rename = "LowSpeedAlerts")]
    pub low_speed_alerts: bool,
    /// Parking assist (SPAS/RSPA) feature toggle.
    #[serde(rename = "SpasRspaEnabled")]
    pub spas_rspa_enabled: bool,
    #[serde(rename = "UseSMDPSHarness")]
    pub use_smdps_harness: bool,
    #[serde(rename = "KeepSteeringTurnSignals")]
    pub keep_steering_turn_signals: bool,
    #[serde(rename = "NoMinLaneChangeSpeed")]
    pub no_min_lane_change_speed: bool,
}

impl InterfaceParams {
    /// Store keys, in field order.
    pub const KEYS: [&'static str; 9] = [
        "MadModeEnabled",
        "DisableRadar",
        "LongControlEnabled",
        "SteerLockout",
        "LowSpeedAlerts",
        "SpasRspaEnabled",
        "UseSMDPSHarness",
        "KeepSteeringTurnSignals",
        "NoMinLaneChangeSpeed",
    ];

    /// Parse a JSON object of store keys. Missing keys read as `false`.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Parse)
    }

    /// Build a snapshot by reading each key through `get`.
    ///
    /// Lets a host adapt whatever store it has without going through JSON.
    pub fn from_lookup<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        Self {
            mad_mode_enabled: get("MadModeEnabled"),
            disable_radar: get("DisableRadar"),
            long_control_enabled: get("LongControlEnabled"),
            steer_lockout: get("SteerLockout"),
            low_speed_alerts: get("LowSpeedAlerts"),
            spas_rspa_enabled: get("SpasRspaEnabled"),
            use_smdps_harness: get("UseSMDPSHarness"),
            keep_steering_turn_signals: get("KeepSteeringTurnSignals"),
            no_min_lane_change_speed: get("NoMinLaneChangeSpeed"),
        }
    }
}

/// 30 mph in m/s.
pub const LANE_CHANGE_SPEED_MIN: f32 = 13.4112;

/// Thresholds used by the per-cycle translator. Speeds are m/s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranslatorCfg {
    pub lane_change_speed_min: f32,
    /// Turning alert fires below `lane_change_speed_min - turning_alert_margin`.
    pub turning_alert_margin: f32,
    /// Low-speed alert is only armed for cars whose steering cuts out above this.
    pub low_speed_gate: f32,
    pub low_speed_enter_margin: f32,
    pub low_speed_exit_margin: f32,
}

impl Default for TranslatorCfg {
    fn default() -> Self {
        Self {
            lane_change_speed_min: LANE_CHANGE_SPEED_MIN,
            turning_alert_margin: 1.2,
            low_speed_gate: 10.0,
            low_speed_enter_margin: 0.2,
            low_speed_exit_margin: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_store_keys_and_defaults_missing() {
        let p = InterfaceParams::from_json(r#"{"MadModeEnabled": true, "UseSMDPSHarness": true}"#).unwrap();
        assert!(p.mad_mode_enabled);
        assert!(p.use_smdps_harness);
        assert!(!p.disable_radar);
    }

    #[test]
    fn json_rejects_non_bool() {
        assert!(InterfaceParams::from_json(r#"{"DisableRadar": "yes"}"#).is_err());
    }

    #[test]
    fn lookup_reads_every_key() {
        let mut seen = Vec::new();
        let p = InterfaceParams::from_lookup(|k| {
            seen.push(k.to_string());
            k == "LowSpeedAlerts"
        });
        assert!(p.low_speed_alerts);
        assert!(!p.steer_lockout);
        assert_eq!(seen, InterfaceParams::KEYS.to_vec());
    }
}
