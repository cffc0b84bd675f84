//! Facilities for reading runtime configuration values.
//!
//! The core decoding engine never reads configuration itself — it has no
//! file paths, no environment, no globals. This `Config` exists for the
//! demonstration binary and for decoder plugins that need host-supplied
//! paths (a hostboot symbol-file directory, the `fsp-trace` utility path);
//! the core only ever receives these as explicit arguments a plugin
//! constructor takes, never as implicit globals (see the design notes on
//! global mutable configuration paths).
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::error;

/// Host-supplied paths and settings consumed by decoder plugins, not by the
/// core engine itself.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    /// Directory containing hostboot symbol files, consulted by backtrace
    /// decoder plugins. Not read by the core.
    pub symbols_path: Option<String>,
    /// Path to the external `fsp-trace` utility, shelled out to by firmware
    /// trace decoder plugins. Not read by the core.
    pub fsp_trace_path: Option<String>,
    /// Directory the demonstration binary reads eSEL blobs from when no
    /// file arguments are given.
    pub objects_path: Option<String>,
}

impl Config {
    /// Loads the configuration by merging a `esel.toml` file with
    /// `ESEL__`-prefixed environment variables.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = Figment::new()
            .merge(Toml::file("esel.toml"))
            .merge(Env::prefixed("ESEL__").split("__"))
            .extract()
            .map_err(|err| {
                error!("Failed to validate configuration: {}", err);
                err
            })?;
        Ok(config)
    }
}
