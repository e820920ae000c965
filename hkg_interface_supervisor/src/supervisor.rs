//! Per-vehicle session supervisor.
//!
//! Owns everything that lives for one drive:
//! - the frozen `CapabilityProfile`
//! - the alert state threaded between cycles
//! - previous button codes for edge detection
//! - the ordered injector chain
//!
//! No IO. No async. Each cycle takes `&mut self`, so there is exactly one
//! writer and cycles run in the order the host calls them.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use hkg_interface_core::{
    aggregate_events, resolve_from_store, translate, AlertState, BaselineRules, CapabilityProfile,
    CarModel, CarSignals, CycleView, EventInjector, FinalEvents, Fingerprint, InjectorChain,
    InterfaceParams, TranslatorCfg, VehicleProfileStore, VehicleState,
};

use crate::adapter::{RawSignals, SignalMapper};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no profile for model {0:?}")]
    UnknownModel(CarModel),
}

/// Externally visible result of one cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleOutput {
    pub state: VehicleState,
    pub events: FinalEvents,
    /// Alert state after this cycle; also retained by the session.
    pub alerts: AlertState,
}

/// Session state for storage-agnostic persistence.
///
/// Pure data: the host decides how/where to store it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub alerts: AlertState,
    pub prev_cruise_buttons: u8,
    pub prev_cruise_main_button: u8,
    pub cycles: u64,
}

/// One vehicle session. Build it once the fingerprint is captured, then call
/// `cycle` (or `ingest`) for every inbound signal bundle.
#[derive(Debug)]
pub struct VehicleSession<B> {
    profile: CapabilityProfile,
    params: InterfaceParams,
    cfg: TranslatorCfg,
    baseline: B,
    injectors: InjectorChain,

    alerts: AlertState,
    prev_cruise_buttons: u8,
    prev_cruise_main_button: u8,
    cycles: u64,
}

impl<B: BaselineRules> VehicleSession<B> {
    /// Create a session around an already resolved profile.
    pub fn new(profile: CapabilityProfile, params: InterfaceParams, baseline: B) -> Self {
        info!(model = ?profile.car_model, safety = ?profile.safety_config(), "vehicle session started");
        Self {
            profile,
            params,
            cfg: TranslatorCfg::default(),
            baseline,
            injectors: InjectorChain::new(),
            alerts: AlertState::default(),
            prev_cruise_buttons: 0,
            prev_cruise_main_button: 0,
            cycles: 0,
        }
    }

    /// Resolve the profile from `fp` and the model store, then start a session.
    pub fn start<S>(
        fp: &Fingerprint,
        model: CarModel,
        store: &S,
        params: InterfaceParams,
        baseline: B,
    ) -> Result<Self, SessionError>
    where
        S: VehicleProfileStore + ?Sized,
    {
        let profile = resolve_from_store(fp, model, store, &params).ok_or(SessionError::UnknownModel(model))?;
        Ok(Self::new(profile, params, baseline))
    }

    /// Override the translator thresholds.
    pub fn with_cfg(mut self, cfg: TranslatorCfg) -> Self {
        self.cfg = cfg;
        self
    }

    /// Append a subordinate controller. Injectors run in the order added.
    pub fn with_injector<I>(mut self, injector: I) -> Self
    where
        I: EventInjector + 'static,
    {
        self.injectors.push(injector);
        self
    }

    pub fn profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    pub fn params(&self) -> &InterfaceParams {
        &self.params
    }

    pub fn alerts(&self) -> AlertState {
        self.alerts
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle on a complete signal bundle (previous button codes included).
    pub fn cycle(&mut self, signals: &CarSignals) -> CycleOutput {
        let t = translate(signals, &self.profile, &self.params, &self.cfg, self.alerts);

        let view = CycleView {
            state: &t.state,
            alerts: t.alerts,
            profile: &self.profile,
            params: &self.params,
        };
        let events = aggregate_events(view, &self.baseline, &self.injectors).finalize();

        self.alerts = t.alerts;
        self.prev_cruise_buttons = signals.cruise_buttons;
        self.prev_cruise_main_button = signals.cruise_main_button;
        self.cycles += 1;

        debug!(cycle = self.cycles, events = events.len(), "cycle done");

        CycleOutput {
            state: t.state,
            events,
            alerts: t.alerts,
        }
    }

    /// Map a host bundle, fill previous button codes from the last cycle, and run it.
    pub fn ingest<M: SignalMapper>(&mut self, mapper: &M, raw: &RawSignals<'_>) -> CycleOutput {
        let mut signals = mapper.map(raw);
        signals.prev_cruise_buttons = self.prev_cruise_buttons;
        signals.prev_cruise_main_button = self.prev_cruise_main_button;
        self.cycle(&signals)
    }

    /// Export the cross-cycle state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            alerts: self.alerts,
            prev_cruise_buttons: self.prev_cruise_buttons,
            prev_cruise_main_button: self.prev_cruise_main_button,
            cycles: self.cycles,
        }
    }

    /// Replace the cross-cycle state with `snap`. The profile is untouched.
    pub fn restore(&mut self, snap: SessionSnapshot) {
        self.alerts = snap.alerts;
        self.prev_cruise_buttons = snap.prev_cruise_buttons;
        self.prev_cruise_main_button = snap.prev_cruise_main_button;
        self.cycles = snap.cycles;
    }

    /// Forget all cross-cycle state (e.g. after the host dropped bundles).
    pub fn reset(&mut self) {
        self.restore(SessionSnapshot::default());
    }
}
