pub mod fingerprint;
pub mod models;
pub mod profile;

pub mod cfg;
pub mod error;
pub mod state;
pub mod vehicle;
pub mod buttons;
pub mod translate;
pub mod events;
pub mod aggregate;

pub use fingerprint::Fingerprint;
pub use models::{CarModel, Brand, ModelProfile, VehicleProfileStore, StaticProfileTable, asset_name};
pub use profile::{CapabilityProfile, SafetyConfig, SafetyModel, EcuDisableRequest, FLAG_HYUNDAI_LONG, resolve_profile, resolve_from_store};

pub use cfg::{InterfaceParams, TranslatorCfg};
pub use error::{ConfigError, ProfileTableError};
pub use state::{AlertState, LowSpeedAlert};
pub use vehicle::{CarSignals, CruiseState, VehicleState};
pub use buttons::{ButtonEvent, ButtonType, classify, cruise_edge, main_edge};
pub use translate::{Translation, translate, turning_alert};
pub use events::{EventName, EventSet, FinalEvents};
pub use aggregate::{BaselineRules, NoBaseline, EventInjector, InjectorChain, CycleView, aggregate_events, interface_events, apply_button_intents};
