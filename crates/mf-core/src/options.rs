//! Build options and generator tuning
//!
//! Both types deserialize from JSON, so a caller can keep them in a file.

use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::rng::Seed;

/// Tunables of the generation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Room placement attempts; rejected attempts are not retried
    pub room_tries: u32,

    /// Inverse chance of opening a further connector between regions that
    /// are already joined. Higher values give fewer loops.
    pub extra_connector_chance: u32,

    /// Added to the upper bound of the room size roll
    pub room_extra_size: u32,

    /// Chance in percent of turning when the corridor could carry straight on
    pub winding_percent: u32,

    /// Iteration cap of a single maze run
    pub max_maze_steps: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_tries: 50,
            extra_connector_chance: 50,
            room_extra_size: 0,
            winding_percent: 50,
            max_maze_steps: 500,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.winding_percent > 100 {
            return Err(BuildError::InvalidConfig(format!(
                "winding_percent must be at most 100, received {}",
                self.winding_percent
            )));
        }
        if self.extra_connector_chance == 0 {
            return Err(BuildError::InvalidConfig(
                "extra_connector_chance must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What to build: a level number or explicit dimensions, plus an optional seed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Positive level number; overrides width and height when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<usize>,
    /// Generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
    #[serde(default)]
    pub config: GeneratorConfig,
}

impl BuildOptions {
    /// Square stage sized for the given level
    pub fn level(level: u32) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    pub fn size(width: usize, height: usize) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed to replay, if any; an empty phrase counts as absent
    pub fn replay_seed(&self) -> Option<&Seed> {
        self.seed
            .as_ref()
            .filter(|seed| !matches!(seed, Seed::Text(phrase) if phrase.is_empty()))
    }

    /// Requested (width, height) before odd rounding and minimum checks
    ///
    /// Level `n` maps to `(16 + (n - 1) * 4) * 2` on both axes; level 0 counts
    /// as absent.
    pub fn dimensions(&self) -> Result<(usize, usize), BuildError> {
        if let Some(level) = self.level.filter(|&level| level > 0) {
            let side = (16 + (level as usize - 1) * 4) * 2;
            return Ok((side, side));
        }
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(BuildError::MissingDimensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_dimensions() {
        assert_eq!(BuildOptions::level(1).dimensions(), Ok((32, 32)));
        assert_eq!(BuildOptions::level(2).dimensions(), Ok((40, 40)));
        assert_eq!(BuildOptions::level(5).dimensions(), Ok((64, 64)));
    }

    #[test]
    fn test_level_overrides_size() {
        let mut options = BuildOptions::size(9, 9);
        options.level = Some(1);
        assert_eq!(options.dimensions(), Ok((32, 32)));
    }

    #[test]
    fn test_missing_dimensions() {
        assert_eq!(
            BuildOptions::default().dimensions(),
            Err(BuildError::MissingDimensions)
        );
        let only_width = BuildOptions {
            width: Some(21),
            ..BuildOptions::default()
        };
        assert_eq!(only_width.dimensions(), Err(BuildError::MissingDimensions));
        assert_eq!(
            BuildOptions::level(0).dimensions(),
            Err(BuildError::MissingDimensions)
        );
    }

    #[test]
    fn test_empty_phrase_is_no_seed() {
        assert_eq!(BuildOptions::size(21, 21).with_seed("").replay_seed(), None);
        assert_eq!(BuildOptions::size(21, 21).replay_seed(), None);
        assert_eq!(
            BuildOptions::size(21, 21).with_seed("abc").replay_seed(),
            Some(&Seed::from("abc"))
        );
        assert_eq!(
            BuildOptions::size(21, 21).with_seed(0u64).replay_seed(),
            Some(&Seed::Number(0))
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(GeneratorConfig::default().validate().is_ok());
        let windy = GeneratorConfig {
            winding_percent: 101,
            ..GeneratorConfig::default()
        };
        assert!(matches!(windy.validate(), Err(BuildError::InvalidConfig(_))));
        let no_extra = GeneratorConfig {
            extra_connector_chance: 0,
            ..GeneratorConfig::default()
        };
        assert!(no_extra.validate().is_err());
    }

    #[test]
    fn test_options_from_json() {
        let options: BuildOptions = serde_json::from_str(
            r#"{"width": 31, "height": 25, "seed": "foobarbaz", "config": {"winding_percent": 10}}"#,
        )
        .unwrap();
        assert_eq!(options.dimensions(), Ok((31, 25)));
        assert_eq!(options.seed, Some(Seed::from("foobarbaz")));
        assert_eq!(options.config.winding_percent, 10);
        assert_eq!(options.config.room_tries, 50);

        let numeric: BuildOptions = serde_json::from_str(r#"{"level": 2, "seed": 99}"#).unwrap();
        assert_eq!(numeric.seed, Some(Seed::Number(99)));
        assert_eq!(numeric.config, GeneratorConfig::default());
    }
}
