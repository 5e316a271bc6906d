//! Low-level DSP primitives used by the instruments.
//!
//! Everything in here is allocation-free and realtime-safe. Oscillators are
//! pure functions of time; the envelope keeps only its trigger timestamps and
//! derives its stage from the clock on every query.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Vibrato (low frequency oscillator) parameters and helpers.
pub mod lfo;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeState, ReleaseMode};
pub use lfo::Vibrato;
pub use oscillator::Waveform;
