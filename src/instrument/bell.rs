//! Bell instruments.
//!
//! Bells are sine partials stacked on integer multiples of the played pitch,
//! starting an octave up. The lowest partial gets a touch of vibrato so long
//! notes shimmer instead of sounding like a test tone.
//!
//! # How It Works
//!
//! 1. Three sines at 2x, 3x and 4x the played frequency
//! 2. Weights halve with each partial (1.0, 0.5, 0.25)
//! 3. Fast 10ms attack gives the strike
//!
//! `Bell` decays to silence while the key is held (sustain 0) and rings out
//! over a second. `Bell8` holds at 0.8 instead, so it can play sustained
//! chords of the "organ bell" kind.

use crate::dsp::{
    envelope::{Envelope, ReleaseMode},
    oscillator::Waveform,
};

use super::Partial;

const BELL_PARTIALS: [Partial; 3] = [
    Partial::new(2.0, 1.0, Waveform::Sine).with_vibrato(5.0, 0.001),
    Partial::new(3.0, 0.5, Waveform::Sine),
    Partial::new(4.0, 0.25, Waveform::Sine),
];

/// Struck bell: rings out with no sustain.
#[derive(Debug, Clone, PartialEq)]
pub struct Bell {
    pub(super) envelope: Envelope,
}

impl Bell {
    pub const VOLUME: f64 = 1.0;
    pub const PARTIALS: [Partial; 3] = BELL_PARTIALS;

    pub fn new(release_mode: ReleaseMode) -> Self {
        Self {
            envelope: Envelope::adsr(0.01, 1.0, 1.0, 0.0, 1.0).with_release_mode(release_mode),
        }
    }
}

/// Sustaining bell: same partials, holds at 0.8 while the key is down.
#[derive(Debug, Clone, PartialEq)]
pub struct Bell8 {
    pub(super) envelope: Envelope,
}

impl Bell8 {
    pub const VOLUME: f64 = 1.0;
    pub const PARTIALS: [Partial; 3] = BELL_PARTIALS;

    pub fn new(release_mode: ReleaseMode) -> Self {
        Self {
            envelope: Envelope::adsr(0.01, 0.5, 1.0, 0.8, 1.0).with_release_mode(release_mode),
        }
    }
}
