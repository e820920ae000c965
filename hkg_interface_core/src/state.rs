use serde::{Deserialize, Serialize};

use crate::cfg::TranslatorCfg;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LowSpeedAlert {
    #[default]
    Armed,
    Alerting,
}

/// Alert state carried from one cycle to the next.
///
/// Owned by exactly one session; the translator takes it by value and hands
/// back the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    /// Recomputed every cycle; kept here so the aggregator reads one value.
    pub turning_alert: bool,
    pub low_speed: LowSpeedAlert,
}

impl AlertState {
    #[inline]
    pub fn low_speed_alerting(&self) -> bool {
        self.low_speed == LowSpeedAlert::Alerting
    }

    /// Advance the low-speed hysteresis for one cycle at speed `v_ego`.
    ///
    /// Enter below `min_steer_speed + enter_margin`, only for cars whose
    /// steering cuts out above the gate. Leave above `min_steer_speed +
    /// exit_margin`. Between the two the state holds.
    #[inline]
    pub fn step_low_speed(&mut self, v_ego: f32, min_steer_speed: f32, cfg: &TranslatorCfg) {
        if min_steer_speed > cfg.low_speed_gate && v_ego < min_steer_speed + cfg.low_speed_enter_margin {
            self.low_speed = LowSpeedAlert::Alerting;
        } else if v_ego > min_steer_speed + cfg.low_speed_exit_margin {
            self.low_speed = LowSpeedAlert::Armed;
        }
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
