//! Static synth configuration.
//!
//! Every field has a default, so an empty TOML file (or none at all) is a
//! valid configuration:
//!
//! ```toml
//! base_octave_frequency = 110.0   # Hz, key 0
//! sample_rate = 44100
//! instrument = "harmonica"        # bell | bell8 | harmonica
//! output_headroom = 0.4
//! capture_release_level = false   # fade from the current level on key up
//! poll_interval_ms = 5
//! hold_window_ms = 600
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    dsp::envelope::ReleaseMode,
    instrument::{Instrument, InstrumentKind},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Frequency of the lowest key in Hz.
    pub base_octave_frequency: f64,
    /// Requested output sample rate in Hz.
    pub sample_rate: u32,
    /// Instrument active at startup.
    pub instrument: InstrumentKind,
    /// Final gain applied to every sample.
    pub output_headroom: f64,
    /// Start the release ramp from the level at key up instead of the sustain level.
    pub capture_release_level: bool,
    /// Keyboard polling cadence.
    pub poll_interval_ms: u64,
    /// How long a key counts as held after its last press when the terminal
    /// cannot report key releases.
    pub hold_window_ms: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            base_octave_frequency: 110.0,
            sample_rate: 44_100,
            instrument: InstrumentKind::Harmonica,
            output_headroom: 0.4,
            capture_release_level: false,
            poll_interval_ms: 5,
            hold_window_ms: 600,
        }
    }
}

impl SynthConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_octave_frequency.is_finite() && self.base_octave_frequency > 0.0) {
            return Err(invalid(
                "base_octave_frequency",
                format!("must be a positive frequency, got {}", self.base_octave_frequency),
            ));
        }
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate", "must be greater than zero".into()));
        }
        if !(self.output_headroom > 0.0 && self.output_headroom <= 1.0) {
            return Err(invalid(
                "output_headroom",
                format!("must be in (0, 1], got {}", self.output_headroom),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(invalid("poll_interval_ms", "must be at least 1ms".into()));
        }
        Ok(())
    }

    pub fn release_mode(&self) -> ReleaseMode {
        if self.capture_release_level {
            ReleaseMode::FromCurrent
        } else {
            ReleaseMode::FromSustain
        }
    }

    /// Build the configured startup instrument.
    pub fn build_instrument(&self) -> Instrument {
        Instrument::with_release_mode(self.instrument, self.release_mode())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
