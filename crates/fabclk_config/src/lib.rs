//! Option loading for the fabric clock-select bitstream setting generator.
//!
//! Options arrive either as the generator's native string map plus flag list,
//! or from a `fabclk.toml` file merged with command-line overrides. Both paths
//! produce a validated [`GenerateOptions`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_options, load_options_from_str};
pub use resolve::{resolve_options, OptionOverrides};
pub use types::*;
