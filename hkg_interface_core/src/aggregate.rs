//! Per-cycle event aggregation.
//!
//! Order of operations is fixed:
//! 1. baseline rules
//! 2. brake / park brake / low speed / turning alerts
//! 3. button intents
//! 4. override mode drops `pedalPressed`
//! 5. subordinate controller injectors, in registration order

use tracing::{debug, warn};

use crate::buttons::{ButtonEvent, ButtonType};
use crate::cfg::InterfaceParams;
use crate::events::{EventName, EventSet};
use crate::profile::CapabilityProfile;
use crate::state::AlertState;
use crate::vehicle::VehicleState;

/// Common rules shared by every car (door open, seatbelt, gear, pedals...).
///
/// Provided by the host. `pcm_enable` tells it whether the car's own cruise
/// module decides engagement.
pub trait BaselineRules {
    fn events(&self, state: &VehicleState, pcm_enable: bool) -> EventSet;
}

impl<F> BaselineRules for F
where
    F: Fn(&VehicleState, bool) -> EventSet,
{
    fn events(&self, state: &VehicleState, pcm_enable: bool) -> EventSet {
        self(state, pcm_enable)
    }
}

/// Baseline that raises nothing. Useful when the host merges common events itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBaseline;

impl BaselineRules for NoBaseline {
    fn events(&self, _state: &VehicleState, _pcm_enable: bool) -> EventSet {
        EventSet::new()
    }
}

/// A subordinate controller that may add or remove events at the end of a cycle.
///
/// Trusted: the aggregator does not check what comes back.
pub trait EventInjector {
    fn inject(&self, events: EventSet) -> EventSet;
}

impl<F> EventInjector for F
where
    F: Fn(EventSet) -> EventSet,
{
    fn inject(&self, events: EventSet) -> EventSet {
        self(events)
    }
}

/// Injectors applied in the order they were pushed.
#[derive(Default)]
pub struct InjectorChain {
    injectors: Vec<Box<dyn EventInjector>>,
}

impl InjectorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<I>(&mut self, injector: I)
    where
        I: EventInjector + 'static,
    {
        self.injectors.push(Box::new(injector));
    }

    pub fn len(&self) -> usize {
        self.injectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }

    pub fn apply(&self, events: EventSet) -> EventSet {
        self.injectors.iter().fold(events, |acc, inj| inj.inject(acc))
    }
}

impl std::fmt::Debug for InjectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectorChain")
            .field("len", &self.injectors.len())
            .finish()
    }
}

/// What the aggregator reads for one cycle.
#[derive(Clone, Copy, Debug)]
pub struct CycleView<'a> {
    pub state: &'a VehicleState,
    pub alerts: AlertState,
    pub profile: &'a CapabilityProfile,
    pub params: &'a InterfaceParams,
}

/// Turn button edges into engage/cancel intents.
///
/// Long control with the stock SCC still on the bus gets no engage intent.
pub fn apply_button_intents(
    events: &mut EventSet,
    buttons: &[ButtonEvent],
    cruise_enabled: bool,
    profile: &CapabilityProfile,
) {
    let long_owns_cruise = profile.openpilot_longitudinal_control && profile.radar_disable;

    for b in buttons {
        if b.kind == ButtonType::Cancel && b.pressed {
            events.add(EventName::ButtonCancel);
        }

        if long_owns_cruise {
            // engage on release of either accel or decel
            if matches!(b.kind, ButtonType::AccelCruise | ButtonType::DecelCruise) && !b.pressed {
                events.add(EventName::ButtonEnable);
                events.remove(EventName::WrongCarMode);
                events.remove(EventName::PcmDisable);
            }
        } else if !profile.openpilot_longitudinal_control
            && cruise_enabled
            && b.kind == ButtonType::DecelCruise
            && !b.pressed
        {
            events.add(EventName::ButtonEnable);
        }
    }
}

/// Build the cycle's event set, everything except the injectors.
pub fn interface_events<B>(view: CycleView<'_>, baseline: &B) -> EventSet
where
    B: BaselineRules + ?Sized,
{
    let CycleView { state, alerts, profile, params } = view;

    let mut events = baseline.events(state, profile.pcm_cruise);

    let long_unavail = profile.openpilot_longitudinal_control && state.cruise_unavail;
    let brake_fault = profile.radar_disable && state.brake_error;
    if long_unavail || brake_fault {
        warn!(long_unavail, brake_fault, "cruise error");
        events.add(EventName::BrakeUnavailable);
    }
    if state.park_brake {
        events.add(EventName::ParkBrake);
    }
    if alerts.low_speed_alerting() && profile.mdps_bus == 0 && params.low_speed_alerts {
        events.add(EventName::BelowSteerSpeed);
    }
    if alerts.turning_alert {
        events.add(EventName::TurningIndicatorOn);
    }

    apply_button_intents(&mut events, &state.button_events, state.cruise_state.enabled, profile);

    if params.mad_mode_enabled {
        events.remove(EventName::PedalPressed);
    }

    events
}

/// Full aggregation: interface events, then the injector chain.
pub fn aggregate_events<B>(view: CycleView<'_>, baseline: &B, injectors: &InjectorChain) -> EventSet
where
    B: BaselineRules + ?Sized,
{
    let events = interface_events(view, baseline);
    let events = injectors.apply(events);
    debug!(count = events.len(), "cycle events aggregated");
    events
}
