//! hkg_interface_supervisor
//!
//! Session layer around `hkg_interface_core`.
//!
//! Responsibilities:
//! - resolve and freeze the `CapabilityProfile` once per session
//! - own the alert state and previous button codes between cycles
//! - map host signal bundles via adapters
//! - run translator, aggregator and injectors every cycle
//!
//! Non-goals:
//! - no IO
//! - no async
//! - no event policy (lives in core)

pub mod adapter;
pub mod supervisor;

pub use adapter::{
    RawSignals,
    SignalMapper,
    BasicSignalMapper,
    BasicKeys,
};

pub use supervisor::{
    VehicleSession,
    CycleOutput,
    SessionSnapshot,
    SessionError,
};
