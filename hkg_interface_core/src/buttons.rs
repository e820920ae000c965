use serde::{Deserialize, Serialize};

/// Raw steering-wheel cruise switch codes.
pub mod codes {
    pub const NONE: u8 = 0;
    pub const RES_ACCEL: u8 = 1;
    pub const SET_DECEL: u8 = 2;
    pub const GAP_DIST: u8 = 3;
    pub const CANCEL: u8 = 4;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonType {
    AccelCruise,
    DecelCruise,
    GapAdjustCruise,
    Cancel,
    /// Cruise main toggle.
    AltButton3,
    Unknown,
}

/// One press or release edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub pressed: bool,
}

/// Map a cruise switch code to its button type.
///
/// `cancel_enabled` is false unless the radar is disabled; the stock SCC
/// handles cancel on its own otherwise and the code reads as unknown.
pub fn classify(code: u8, cancel_enabled: bool) -> ButtonType {
    match code {
        codes::RES_ACCEL => ButtonType::AccelCruise,
        codes::SET_DECEL => ButtonType::DecelCruise,
        codes::GAP_DIST => ButtonType::GapAdjustCruise,
        codes::CANCEL if cancel_enabled => ButtonType::Cancel,
        _ => ButtonType::Unknown,
    }
}

/// Edge between two consecutive cruise switch codes, if any.
///
/// A release is classified by the code that was held, so `[accel, 0]`
/// yields an accel release rather than an unknown one.
pub fn cruise_edge(prev: u8, cur: u8, cancel_enabled: bool) -> Option<ButtonEvent> {
    if cur == prev {
        return None;
    }
    let pressed = cur != codes::NONE;
    let code = if pressed { cur } else { prev };
    Some(ButtonEvent {
        kind: classify(code, cancel_enabled),
        pressed,
    })
}

/// Edge on the cruise main toggle, if any.
pub fn main_edge(prev: u8, cur: u8) -> Option<ButtonEvent> {
    (cur != prev).then_some(ButtonEvent {
        kind: ButtonType::AltButton3,
        pressed: cur != 0,
    })
}
