//! Option resolution for the command line
//!
//! A JSON options file gives the base; explicit flags override it field by
//! field.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mf_core::{BuildError, BuildOptions, Seed};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid options file {path}: {source}")]
    Options {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode dungeon: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Read a JSON [`BuildOptions`] file
pub fn load_options(path: &Path) -> Result<BuildOptions, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Options {
        path: path.to_path_buf(),
        source,
    })
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub level: Option<u32>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<Seed>,
}

impl Overrides {
    /// Apply the overrides on top of `base`
    ///
    /// An explicit level replaces any size from the file and an explicit size
    /// replaces any level, so the flag the user typed always wins.
    pub fn apply(self, mut base: BuildOptions) -> BuildOptions {
        if self.level.is_some() {
            base.level = self.level;
        } else if self.width.is_some() || self.height.is_some() {
            base.level = None;
        }
        if self.width.is_some() {
            base.width = self.width;
        }
        if self.height.is_some() {
            base.height = self.height;
        }
        if self.seed.is_some() {
            base.seed = self.seed;
        }
        base
    }
}
