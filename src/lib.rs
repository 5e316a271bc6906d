pub mod config; // Static configuration and TOML loading
pub mod dsp;
pub mod instrument; // Fixed voice recipes built from oscillators + envelope
pub mod synth; // Voice control, key edges and the playback clock

pub use config::{ConfigError, SynthConfig};
pub use instrument::{Instrument, InstrumentKind};

/// Amplitudes at or below this level are flushed to zero to avoid denormal tails.
pub(crate) const SILENCE_THRESHOLD: f64 = 1e-4;
