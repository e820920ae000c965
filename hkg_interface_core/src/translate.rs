//hkg_interface_core/translate.rs

use tracing::debug;

use crate::buttons::{cruise_edge, main_edge};
use crate::cfg::{InterfaceParams, TranslatorCfg};
use crate::profile::CapabilityProfile;
use crate::state::AlertState;
use crate::vehicle::{CarSignals, CruiseState, VehicleState};

/// Result of one translator cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Translation {
    pub state: VehicleState,
    pub alerts: AlertState,
}

/// True when the turning-indicator alert should show this cycle. Stateless.
pub fn turning_alert(sig: &CarSignals, profile: &CapabilityProfile, cfg: &TranslatorCfg) -> bool {
    !profile.turning_alert_suppressed
        && (sig.left_blinker || sig.right_blinker || sig.turning_signal_timer != 0)
        && sig.v_ego < cfg.lane_change_speed_min - cfg.turning_alert_margin
}

/// Translate one cycle.
///
/// `prev` is the alert state returned by the previous cycle of the same
/// session; cycles must be fed in arrival order with none skipped.
pub fn translate(
    sig: &CarSignals,
    profile: &CapabilityProfile,
    params: &InterfaceParams,
    cfg: &TranslatorCfg,
    prev: AlertState,
) -> Translation {
    let mut alerts = prev;
    alerts.turning_alert = turning_alert(sig, profile, cfg);
    alerts.step_low_speed(sig.v_ego, profile.min_steer_speed, cfg);
    if alerts.low_speed != prev.low_speed {
        debug!(from = ?prev.low_speed, to = ?alerts.low_speed, v_ego = sig.v_ego, "low speed alert");
    }

    let mut cruise_state = CruiseState {
        available: sig.cruise_available,
        enabled: sig.cruise_enabled,
    };
    // Override mode engages on main when the stock SCC still runs.
    if params.mad_mode_enabled && !profile.radar_disable {
        cruise_state.enabled = cruise_state.available;
    }

    let mut button_events = Vec::with_capacity(2);
    if let Some(ev) = cruise_edge(sig.prev_cruise_buttons, sig.cruise_buttons, profile.radar_disable) {
        debug!(kind = ?ev.kind, pressed = ev.pressed, "cruise button edge");
        button_events.push(ev);
    }
    if let Some(ev) = main_edge(sig.prev_cruise_main_button, sig.cruise_main_button) {
        debug!(pressed = ev.pressed, "cruise main edge");
        button_events.push(ev);
    }

    let state = VehicleState {
        v_ego: sig.v_ego,
        steering_angle_deg: sig.steering_angle_deg,
        left_blinker: sig.left_blinker,
        right_blinker: sig.right_blinker,
        cruise_buttons: sig.cruise_buttons,
        prev_cruise_buttons: sig.prev_cruise_buttons,
        cruise_main_button: sig.cruise_main_button,
        prev_cruise_main_button: sig.prev_cruise_main_button,
        cruise_state,
        cruise_unavail: sig.cruise_unavail,
        park_brake: sig.park_brake,
        brake_error: sig.brake_error,
        turning_signal_timer: sig.turning_signal_timer,
        can_valid: sig.can_valid.iter().all(|v| *v),
        button_events,
    };

    Translation { state, alerts }
}
