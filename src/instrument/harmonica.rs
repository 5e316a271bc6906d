//! Harmonica voice.
//!
//! A reedy, buzzy sound from three square waves plus a little breath noise.
//! Squares carry only odd harmonics, which gives the hollow reed colour; the
//! 1.5x partial adds a fifth above for the slightly out-of-tune "chord" a
//! real harmonica reed plate produces.
//!
//! # How It Works
//!
//! 1. Square at the played pitch with gentle 5 Hz vibrato
//! 2. Square a fifth up (1.5x) at half weight
//! 3. Square an octave up (2x) at quarter weight
//! 4. 5% white noise for breath (ratio 0: pitchless)
//! 5. Quick attack, near-full sustain, short 100ms release

use crate::dsp::{
    envelope::{Envelope, ReleaseMode},
    oscillator::Waveform,
};

use super::Partial;

#[derive(Debug, Clone, PartialEq)]
pub struct Harmonica {
    pub(super) envelope: Envelope,
}

impl Harmonica {
    pub const VOLUME: f64 = 0.3;
    pub const PARTIALS: [Partial; 4] = [
        Partial::new(1.0, 1.0, Waveform::Square).with_vibrato(5.0, 0.001),
        Partial::new(1.5, 0.5, Waveform::Square),
        Partial::new(2.0, 0.25, Waveform::Square),
        Partial::new(0.0, 0.05, Waveform::Noise),
    ];

    pub fn new(release_mode: ReleaseMode) -> Self {
        Self {
            envelope: Envelope::adsr(0.05, 1.0, 1.0, 0.95, 0.1).with_release_mode(release_mode),
        }
    }
}
