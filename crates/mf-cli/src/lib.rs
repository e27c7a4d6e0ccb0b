//! mf-cli: Terminal dump of generated dungeons
//!
//! Resolves command line flags and JSON option files into [`BuildOptions`]
//! and renders the result as ASCII or JSON.

pub mod options;
pub mod render;

pub use options::{load_options, CliError, Overrides};
pub use render::{glyph, render_ascii, render_json};
