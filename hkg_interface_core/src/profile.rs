//! One-shot resolution of a session's capability profile from the bus fingerprint.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cfg::InterfaceParams;
use crate::fingerprint::{
    Fingerprint, MSG_EMS11, MSG_EMS16, MSG_ESP11, MSG_LCAN_MARKER, MSG_LCA11, MSG_LFAHDA_MFC,
    MSG_MDPS12, MSG_SAS11, MSG_SCC11, MSG_SCC13, MSG_SCC14,
};
use crate::models::{CarModel, ModelProfile, VehicleProfileStore};

/// Safety-module parameter bit: the interface owns longitudinal control.
pub const FLAG_HYUNDAI_LONG: u32 = 4;

/// Bus index used when a unit was not observed anywhere.
pub const BUS_ABSENT: i8 = -1;

/// Rule set the safety module enforces on outgoing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SafetyModel {
    HyundaiLegacy,
    HyundaiCommunity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyConfig {
    pub model: SafetyModel,
    /// Opaque to this crate beyond OR-ing in known flags.
    pub safety_param: u32,
}

impl SafetyConfig {
    pub fn new(model: SafetyModel) -> Self {
        Self { model, safety_param: 0 }
    }
}

/// Diagnostic request asking the radar ECU to stop transmitting.
///
/// The host sends it once at startup; this crate only says when and what.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcuDisableRequest {
    pub addr: u32,
    pub com_cont_req: [u8; 3],
}

pub const RADAR_ECU_DISABLE: EcuDisableRequest = EcuDisableRequest {
    addr: 0x7d0,
    com_cont_req: [0x28, 0x83, 0x01],
};

/// Everything a session knows about the car before the first cycle.
///
/// Frozen after resolution: there are no setters, and translator/aggregator
/// only ever borrow it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub car_model: CarModel,

    pub mdps_bus: i8,
    pub sas_bus: i8,
    pub scc_bus: i8,

    pub has_scc13: bool,
    pub has_scc14: bool,
    pub has_ems: bool,
    pub has_lfa_hda: bool,
    pub enable_bsm: bool,
    pub enable_auto_hold: bool,

    pub radar_off_can: bool,
    pub radar_disable: bool,
    pub pcm_cruise: bool,
    pub openpilot_longitudinal_control: bool,

    pub min_steer_speed: f32,
    pub steer_lockout: bool,
    pub max_steering_angle_deg: f32,

    pub spas_enabled: bool,
    /// Always false; reverse parking assist is not offered.
    pub rspa_enabled: bool,
    pub turning_alert_suppressed: bool,

    pub ecu_disable: Option<EcuDisableRequest>,

    safety_config: SafetyConfig,
}

impl CapabilityProfile {
    pub fn safety_config(&self) -> SafetyConfig {
        self.safety_config
    }

    /// The safety list handed to the safety module. Always exactly one entry.
    pub fn safety_configs(&self) -> &[SafetyConfig] {
        std::slice::from_ref(&self.safety_config)
    }
}

/// `1` when `id` is seen on bus 1 without the L-CAN marker, else `0`.
fn harness_bus(fp: &Fingerprint, id: u32) -> i8 {
    if fp.has(1, id) && !fp.has(1, MSG_LCAN_MARKER) {
        1
    } else {
        0
    }
}

fn scc_bus(fp: &Fingerprint) -> i8 {
    if fp.has(0, MSG_SCC11) {
        0
    } else if fp.has(1, MSG_SCC11) && !fp.has(1, MSG_LCAN_MARKER) {
        1
    } else if fp.has(2, MSG_SCC11) {
        2
    } else {
        BUS_ABSENT
    }
}

/// Resolve the session profile.
///
/// Pure and total: same inputs, same profile. Ids the resolver does not know
/// are ignored, and an empty fingerprint resolves to a radar-off-CAN car with
/// every feature flag cleared.
pub fn resolve_profile(
    fp: &Fingerprint,
    car_model: CarModel,
    model_profile: &ModelProfile,
    params: &InterfaceParams,
) -> CapabilityProfile {
    let mdps_bus = harness_bus(fp, MSG_MDPS12);
    let sas_bus = harness_bus(fp, MSG_SAS11);
    let scc_bus = scc_bus(fp);

    let (has_scc13, has_scc14) = if scc_bus >= 0 {
        let bus = scc_bus as u8;
        (fp.has(bus, MSG_SCC13), fp.has(bus, MSG_SCC14))
    } else {
        (false, false)
    };

    let radar_disable = params.disable_radar;
    let openpilot_longitudinal_control = params.long_control_enabled || params.disable_radar;
    let radar_off_can = scc_bus == BUS_ABSENT;
    let pcm_cruise = !radar_off_can || !radar_disable;

    let spas_enabled = params.spas_rspa_enabled;

    let escalate = radar_off_can
        || radar_disable
        || mdps_bus == 1
        || openpilot_longitudinal_control
        || scc_bus == 1
        || params.mad_mode_enabled
        || spas_enabled;

    let mut safety_config = if escalate {
        SafetyConfig::new(SafetyModel::HyundaiCommunity)
    } else {
        SafetyConfig::new(SafetyModel::HyundaiLegacy)
    };
    if radar_disable || (openpilot_longitudinal_control && radar_off_can) {
        safety_config.safety_param |= FLAG_HYUNDAI_LONG;
    }
    debug!(?safety_config, escalate, "safety model selected");

    let (steer_lockout, max_steering_angle_deg) = if params.steer_lockout {
        (false, 1000.0)
    } else {
        (true, 90.0)
    };

    let profile = CapabilityProfile {
        car_model,
        mdps_bus,
        sas_bus,
        scc_bus,
        has_scc13,
        has_scc14,
        has_ems: fp.has(0, MSG_EMS11) && fp.has(0, MSG_EMS16),
        has_lfa_hda: fp.has(0, MSG_LFAHDA_MFC),
        enable_bsm: fp.has(0, MSG_LCA11),
        enable_auto_hold: fp.has(0, MSG_ESP11),
        radar_off_can,
        radar_disable,
        pcm_cruise,
        openpilot_longitudinal_control,
        min_steer_speed: model_profile.effective_min_steer_speed(params.use_smdps_harness),
        steer_lockout,
        max_steering_angle_deg,
        spas_enabled,
        rspa_enabled: false,
        turning_alert_suppressed: params.keep_steering_turn_signals || params.no_min_lane_change_speed,
        ecu_disable: radar_disable.then_some(RADAR_ECU_DISABLE),
        safety_config,
    };

    info!(
        model = ?car_model,
        mdps_bus,
        sas_bus,
        scc_bus,
        radar_off_can,
        pcm_cruise,
        long_control = openpilot_longitudinal_control,
        "capability profile resolved"
    );

    profile
}

/// [`resolve_profile`] with the model constants fetched from `store`.
///
/// `None` when the store has no record for `car_model`.
pub fn resolve_from_store<S>(
    fp: &Fingerprint,
    car_model: CarModel,
    store: &S,
    params: &InterfaceParams,
) -> Option<CapabilityProfile>
where
    S: VehicleProfileStore + ?Sized,
{
    store
        .profile(car_model)
        .map(|mp| resolve_profile(fp, car_model, mp, params))
}
