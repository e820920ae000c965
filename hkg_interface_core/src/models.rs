//! Static per-model constants and the store that serves them.
//!
//! The full tuning table is owned by the host; this module only fixes the
//! shape of a record, validates that a table covers every model, and ships a
//! small built-in table for the physical constants the interface reads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ProfileTableError;

pub const STD_CARGO_KG: f32 = 136.0;
pub const LB_TO_KG: f32 = 0.453592;
pub const MPH_TO_MS: f32 = 0.44704;
pub const KPH_TO_MS: f32 = 1.0 / 3.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarModel {
    Genesis,
    GenesisG70,
    GenesisG80,
    GenesisG90,
    SantaFe,
    Sonata,
    Sonata19,
    Palisade,
    Elantra,
    Kona,
    KonaEv,
    Ioniq,
    IoniqEv2020,
    GrandeurIg,
    Stinger,
    Sorento,
    K5,
    Sportage,
    NiroHev,
    NiroEv,
    K7,
    K9,
}

impl CarModel {
    pub const ALL: [CarModel; 22] = [
        CarModel::Genesis,
        CarModel::GenesisG70,
        CarModel::GenesisG80,
        CarModel::GenesisG90,
        CarModel::SantaFe,
        CarModel::Sonata,
        CarModel::Sonata19,
        CarModel::Palisade,
        CarModel::Elantra,
        CarModel::Kona,
        CarModel::KonaEv,
        CarModel::Ioniq,
        CarModel::IoniqEv2020,
        CarModel::GrandeurIg,
        CarModel::Stinger,
        CarModel::Sorento,
        CarModel::K5,
        CarModel::Sportage,
        CarModel::NiroHev,
        CarModel::NiroEv,
        CarModel::K7,
        CarModel::K9,
    ];

    pub fn brand(self) -> Brand {
        use CarModel::*;
        match self {
            Genesis | GenesisG70 | GenesisG80 | GenesisG90 => Brand::Genesis,
            Stinger | Sorento | K5 | Sportage | NiroHev | NiroEv | K7 | K9 => Brand::Kia,
            SantaFe | Sonata | Sonata19 | Palisade | Elantra | Kona | KonaEv | Ioniq | IoniqEv2020
            | GrandeurIg => Brand::Hyundai,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brand {
    Hyundai,
    Kia,
    Genesis,
}

/// Spinner asset the presentation layer should show for `model`.
///
/// Pure lookup; swapping files on disk is the presentation layer's business.
pub fn asset_name(model: CarModel) -> &'static str {
    match (model, model.brand()) {
        (CarModel::Stinger, _) => "Stinger.png",
        (_, Brand::Genesis) => "Genesis.png",
        (_, Brand::Kia) => "Kia.png",
        (_, Brand::Hyundai) => "Hyundai.png",
    }
}

/// Physical constants for one model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    /// Curb mass plus standard cargo, kg.
    pub mass: f32,
    pub wheelbase: f32,
    /// Centre of gravity as a fraction of wheelbase from the front axle.
    pub center_to_front_ratio: f32,
    pub steer_ratio: f32,
    pub tire_stiffness_factor: f32,
    pub ems_type: u8,
    /// Speed below which the stock MDPS refuses torque, m/s. 0 when it never cuts out.
    pub min_steer_speed: f32,
    /// An SMDPS harness removes the low-speed cut-out on this model.
    pub smdps_bypassable: bool,
}

impl ModelProfile {
    pub fn center_to_front(&self) -> f32 {
        self.wheelbase * self.center_to_front_ratio
    }

    pub fn effective_min_steer_speed(&self, use_smdps_harness: bool) -> f32 {
        if use_smdps_harness && self.smdps_bypassable {
            0.0
        } else {
            self.min_steer_speed
        }
    }
}

/// Lookup of model constants. Implemented by the built-in table or a host table.
pub trait VehicleProfileStore {
    fn profile(&self, model: CarModel) -> Option<&ModelProfile>;
}

/// Model table validated at construction to cover every `CarModel` exactly once.
#[derive(Clone, Debug)]
pub struct StaticProfileTable {
    entries: BTreeMap<CarModel, ModelProfile>,
}

impl StaticProfileTable {
    pub fn new<I>(entries: I) -> Result<Self, ProfileTableError>
    where
        I: IntoIterator<Item = (CarModel, ModelProfile)>,
    {
        let mut map = BTreeMap::new();
        for (model, profile) in entries {
            if map.insert(model, profile).is_some() {
                return Err(ProfileTableError::DuplicateModel(model));
            }
        }
        if let Some(missing) = CarModel::ALL.iter().find(|m| !map.contains_key(*m)) {
            return Err(ProfileTableError::MissingModel(*missing));
        }
        Ok(Self { entries: map })
    }

    pub fn builtin() -> Result<Self, ProfileTableError> {
        Self::new(builtin_entries())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VehicleProfileStore for StaticProfileTable {
    fn profile(&self, model: CarModel) -> Option<&ModelProfile> {
        self.entries.get(&model)
    }
}

fn mp(
    mass: f32,
    wheelbase: f32,
    steer_ratio: f32,
    tire_stiffness_factor: f32,
    ems_type: u8,
    min_steer_speed: f32,
) -> ModelProfile {
    ModelProfile {
        mass,
        wheelbase,
        center_to_front_ratio: 0.4,
        steer_ratio,
        tire_stiffness_factor,
        ems_type,
        min_steer_speed,
        smdps_bypassable: min_steer_speed > 0.0,
    }
}

fn builtin_entries() -> Vec<(CarModel, ModelProfile)> {
    vec![
        (CarModel::Genesis, mp(1900.0 + STD_CARGO_KG, 3.01, 16.5, 0.85, 1, 60.0 * KPH_TO_MS)),
        (CarModel::GenesisG70, mp(1640.0 + STD_CARGO_KG, 2.84, 13.56, 0.85, 1, 0.0)),
        (CarModel::GenesisG80, mp(1855.0 + STD_CARGO_KG, 3.01, 16.5, 0.85, 1, 0.0)),
        (CarModel::GenesisG90, mp(2150.0, 3.16, 16.5, 0.85, 1, 0.0)),
        (CarModel::SantaFe, mp(1694.0 + STD_CARGO_KG, 2.766, 13.27 * 1.15, 0.65, 0, 0.0)),
        (CarModel::Sonata, mp(1513.0 + STD_CARGO_KG, 2.84, 13.27 * 1.15, 0.65, 0, 0.0)),
        (CarModel::Sonata19, mp(4497.0 * LB_TO_KG, 2.804, 13.27 * 1.15, 1.0, 0, 0.0)),
        (CarModel::Palisade, mp(1999.0 + STD_CARGO_KG, 2.90, 15.6 * 1.15, 0.63, 0, 0.0)),
        (CarModel::Elantra, mp(1275.0 + STD_CARGO_KG, 2.7, 15.4, 0.7, 0, 32.0 * MPH_TO_MS)),
        (CarModel::Kona, mp(1275.0 + STD_CARGO_KG, 2.7, 13.73 * 1.15, 0.7, 1, 0.0)),
        (CarModel::KonaEv, mp(1395.0 + STD_CARGO_KG, 2.6, 13.73, 0.7, 2, 0.0)),
        (CarModel::Ioniq, mp(1490.0 + STD_CARGO_KG, 2.7, 13.73, 0.385, 2, 32.0 * MPH_TO_MS)),
        (CarModel::IoniqEv2020, mp(1490.0 + STD_CARGO_KG, 2.7, 13.73, 0.385, 2, 0.0)),
        (
            CarModel::GrandeurIg,
            ModelProfile {
                center_to_front_ratio: 0.385,
                ..mp(1640.0 + STD_CARGO_KG, 2.845, 17.0, 0.8, 0, 0.0)
            },
        ),
        (CarModel::Stinger, mp(1825.0 + STD_CARGO_KG, 2.906, 14.4 * 1.15, 1.125, 1, 0.0)),
        (CarModel::Sorento, mp(1985.0 + STD_CARGO_KG, 2.78, 14.4 * 1.1, 0.7, 0, 0.0)),
        (CarModel::K5, mp(3558.0 * LB_TO_KG, 2.80, 13.75, 0.7, 0, 0.0)),
        (CarModel::Sportage, mp(3765.0 * LB_TO_KG, 2.66, 13.75, 0.7, 0, 0.0)),
        (CarModel::NiroHev, mp(1737.0 + STD_CARGO_KG, 2.7, 13.73, 0.7, 2, 32.0 * MPH_TO_MS)),
        (CarModel::NiroEv, mp(1850.0 + STD_CARGO_KG, 2.7, 13.73 * 1.15, 0.8, 2, 0.0)),
        (CarModel::K7, mp(1650.0 + STD_CARGO_KG, 2.855, 17.5, 0.7, 0, 0.0)),
        (CarModel::K9, mp(2005.0 + STD_CARGO_KG, 3.15, 14.5, 0.8, 0, 0.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_model() {
        let table = StaticProfileTable::builtin().unwrap();
        assert_eq!(table.len(), CarModel::ALL.len());
        for m in CarModel::ALL {
            assert!(table.profile(m).is_some(), "{m:?}");
        }
    }

    #[test]
    fn missing_model_rejected() {
        let partial = builtin_entries().into_iter().filter(|(m, _)| *m != CarModel::K9);
        assert_eq!(
            StaticProfileTable::new(partial).unwrap_err(),
            ProfileTableError::MissingModel(CarModel::K9)
        );
    }

    #[test]
    fn duplicate_model_rejected() {
        let mut doubled = builtin_entries();
        doubled.push(doubled[0].clone());
        assert_eq!(
            StaticProfileTable::new(doubled).unwrap_err(),
            ProfileTableError::DuplicateModel(CarModel::Genesis)
        );
    }

    #[test]
    fn harness_clears_bypassable_cutout() {
        let table = StaticProfileTable::builtin().unwrap();
        let elantra = table.profile(CarModel::Elantra).unwrap();
        assert!((elantra.effective_min_steer_speed(false) - 14.30528).abs() < 1e-4);
        assert_eq!(elantra.effective_min_steer_speed(true), 0.0);

        let sonata = table.profile(CarModel::Sonata).unwrap();
        assert_eq!(sonata.effective_min_steer_speed(false), 0.0);
    }

    #[test]
    fn assets_by_brand() {
        assert_eq!(asset_name(CarModel::GenesisG70), "Genesis.png");
        assert_eq!(asset_name(CarModel::Stinger), "Stinger.png");
        assert_eq!(asset_name(CarModel::Sorento), "Kia.png");
        assert_eq!(asset_name(CarModel::Palisade), "Hyundai.png");
    }
}
