//! Build errors

use strum::Display;
use thiserror::Error;

use crate::dungeon::MIN_DIMENSION;

/// Stage axis, used to name the offending option in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    Width,
    Height,
}

/// Errors returned by [`crate::build`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("either specify a level or specify both width & height")]
    MissingDimensions,

    #[error("options.{axis} must not be less than {min}, received {value}", min = MIN_DIMENSION)]
    DimensionTooSmall { axis: Axis, value: usize },

    #[error("tile at {x}, {y} is unreachable")]
    TileUnreachable { x: usize, y: usize },

    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("generated dungeon is split into {components} unconnected areas")]
    Disconnected { components: usize },
}

impl BuildError {
    /// True for errors caused by the caller's options rather than a defect
    /// in the generator
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BuildError::MissingDimensions
                | BuildError::DimensionTooSmall { .. }
                | BuildError::InvalidConfig(_)
        )
    }
}
