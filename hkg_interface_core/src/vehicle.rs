use serde::{Deserialize, Serialize};

use crate::buttons::ButtonEvent;

/// Decoded signals for one cycle, as handed over by the host's CAN parsers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarSignals {
    /// m/s
    pub v_ego: f32,
    pub steering_angle_deg: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,

    pub cruise_buttons: u8,
    pub prev_cruise_buttons: u8,
    pub cruise_main_button: u8,
    pub prev_cruise_main_button: u8,

    pub cruise_available: bool,
    pub cruise_enabled: bool,
    pub cruise_unavail: bool,

    pub park_brake: bool,
    pub brake_error: bool,
    /// Cycles left on the controller's turn-signal hold. 0 when idle.
    pub turning_signal_timer: u32,

    /// Validity of the main, secondary and camera bus parsers.
    pub can_valid: [bool; 3],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CruiseState {
    pub available: bool,
    pub enabled: bool,
}

/// Normalised per-cycle snapshot read by the supervisory layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub v_ego: f32,
    pub steering_angle_deg: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,

    pub cruise_buttons: u8,
    pub prev_cruise_buttons: u8,
    pub cruise_main_button: u8,
    pub prev_cruise_main_button: u8,

    pub cruise_state: CruiseState,
    pub cruise_unavail: bool,
    pub park_brake: bool,
    pub brake_error: bool,
    pub turning_signal_timer: u32,

    /// False when any parser lost sync. Left to the supervisory layer to act on.
    pub can_valid: bool,

    pub button_events: Vec<ButtonEvent>,
}
