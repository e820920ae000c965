use serde::{Deserialize, Serialize};

/// Semantic events the supervisory layer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    // baseline rules
    DoorOpen,
    SeatbeltNotLatched,
    WrongGear,
    ReverseGear,
    WrongCarMode,
    EspDisabled,
    PedalPressed,
    PcmEnable,
    PcmDisable,
    SpeedTooHigh,
    CruiseDisabled,
    AccFaulted,
    SteerTempUnavailable,
    SteerUnavailable,
    CanError,
    StockFcw,
    StockAeb,
    // interface
    BrakeUnavailable,
    ParkBrake,
    BelowSteerSpeed,
    TurningIndicatorOn,
    ButtonEnable,
    ButtonCancel,
    // subordinate controllers
    SlowingDownSpeed,
    SpasRspaActive,
}

/// Cycle-local event set. Unique per kind, insertion order preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSet {
    events: Vec<EventName>,
}

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ev` unless it is already present.
    pub fn add(&mut self, ev: EventName) {
        if !self.events.contains(&ev) {
            self.events.push(ev);
        }
    }

    /// Remove `ev` if present. No-op otherwise.
    pub fn remove(&mut self, ev: EventName) {
        self.events.retain(|e| *e != ev);
    }

    #[inline]
    pub fn contains(&self, ev: EventName) -> bool {
        self.events.contains(&ev)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EventName> + '_ {
        self.events.iter().copied()
    }

    /// Seal the set for the end of the cycle.
    pub fn finalize(self) -> FinalEvents {
        FinalEvents { events: self.events }
    }
}

impl Extend<EventName> for EventSet {
    fn extend<T: IntoIterator<Item = EventName>>(&mut self, iter: T) {
        for ev in iter {
            self.add(ev);
        }
    }
}

impl FromIterator<EventName> for EventSet {
    fn from_iter<T: IntoIterator<Item = EventName>>(iter: T) -> Self {
        let mut set = EventSet::new();
        set.extend(iter);
        set
    }
}

/// Read-only events of a finished cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalEvents {
    events: Vec<EventName>,
}

impl FinalEvents {
    #[inline]
    pub fn contains(&self, ev: EventName) -> bool {
        self.events.contains(&ev)
    }

    pub fn as_slice(&self) -> &[EventName] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
