use thiserror::Error;

use crate::models::CarModel;

/// Load-time failures of a model table.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileTableError {
    #[error("no profile for model {0:?}")]
    MissingModel(CarModel),

    #[error("model {0:?} has more than one profile")]
    DuplicateModel(CarModel),
}

/// Failures reading a configuration snapshot.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed config snapshot: {0}")]
    Parse(#[source] serde_json::Error),
}
