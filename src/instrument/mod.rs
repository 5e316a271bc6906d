//! Instruments: fixed oscillator recipes shaped by an envelope.
//!
//! Each instrument owns one [`Envelope`] and a constant list of [`Partial`]s.
//! A partial is one oscillator call at a multiple of the played frequency,
//! with its own weight, waveform and vibrato. The instrument's sound at time
//! `t` is
//!
//! ```text
//! envelope(t) · volume · Σ weight_i · oscillator(ratio_i · f, t, waveform_i, vibrato_i)
//! ```
//!
//! The set of instruments is closed, so [`Instrument`] is an enum and every
//! operation is a `match`. Only the envelope inside an instrument ever
//! changes; the recipes are `const`.
//!
//! # Example
//!
//! ```
//! use keysynth::instrument::{Instrument, InstrumentKind};
//!
//! let mut bell = Instrument::new(InstrumentKind::Bell);
//! bell.note_on(0.0);
//! let s = bell.sound(0.01, 440.0);
//! assert!(s.is_finite());
//! ```

mod bell;
mod harmonica;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dsp::{
    envelope::{Envelope, ReleaseMode},
    lfo::Vibrato,
    oscillator::{self, Waveform},
};

pub use bell::{Bell, Bell8};
pub use harmonica::Harmonica;

/// One weighted oscillator in an instrument recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Multiplier on the played frequency. 0.0 marks a pitchless (noise) partial.
    pub ratio: f64,
    pub weight: f64,
    pub waveform: Waveform,
    pub vibrato: Vibrato,
}

impl Partial {
    pub const fn new(ratio: f64, weight: f64, waveform: Waveform) -> Self {
        Self {
            ratio,
            weight,
            waveform,
            vibrato: Vibrato::NONE,
        }
    }

    pub const fn with_vibrato(self, frequency: f64, depth: f64) -> Self {
        Self {
            vibrato: Vibrato::new(frequency, depth),
            ..self
        }
    }

    #[inline]
    fn render<R: Rng + ?Sized>(&self, rng: &mut R, time: f64, frequency: f64) -> f64 {
        self.weight
            * oscillator::sample_with(
                rng,
                self.ratio * frequency,
                time,
                self.waveform,
                self.vibrato,
            )
    }
}

/// Which instrument to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    Bell,
    Bell8,
    #[default]
    Harmonica,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [
        InstrumentKind::Bell,
        InstrumentKind::Bell8,
        InstrumentKind::Harmonica,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Bell => "bell",
            InstrumentKind::Bell8 => "bell8",
            InstrumentKind::Harmonica => "harmonica",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument `{0}` (expected one of: bell, bell8, harmonica)")]
pub struct ParseInstrumentError(pub String);

impl FromStr for InstrumentKind {
    type Err = ParseInstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        InstrumentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == needle)
            .ok_or_else(|| ParseInstrumentError(s.to_string()))
    }
}

/// A playable instrument: one envelope plus a fixed oscillator recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    Bell(Bell),
    Bell8(Bell8),
    Harmonica(Harmonica),
}

impl Instrument {
    pub fn new(kind: InstrumentKind) -> Self {
        Self::with_release_mode(kind, ReleaseMode::default())
    }

    pub fn with_release_mode(kind: InstrumentKind, mode: ReleaseMode) -> Self {
        match kind {
            InstrumentKind::Bell => Instrument::Bell(Bell::new(mode)),
            InstrumentKind::Bell8 => Instrument::Bell8(Bell8::new(mode)),
            InstrumentKind::Harmonica => Instrument::Harmonica(Harmonica::new(mode)),
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        match self {
            Instrument::Bell(_) => InstrumentKind::Bell,
            Instrument::Bell8(_) => InstrumentKind::Bell8,
            Instrument::Harmonica(_) => InstrumentKind::Harmonica,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            Instrument::Bell(bell) => &bell.envelope,
            Instrument::Bell8(bell) => &bell.envelope,
            Instrument::Harmonica(harmonica) => &harmonica.envelope,
        }
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        match self {
            Instrument::Bell(bell) => &mut bell.envelope,
            Instrument::Bell8(bell) => &mut bell.envelope,
            Instrument::Harmonica(harmonica) => &mut harmonica.envelope,
        }
    }

    pub fn partials(&self) -> &'static [Partial] {
        match self {
            Instrument::Bell(_) => &Bell::PARTIALS,
            Instrument::Bell8(_) => &Bell8::PARTIALS,
            Instrument::Harmonica(_) => &Harmonica::PARTIALS,
        }
    }

    pub fn volume(&self) -> f64 {
        match self {
            Instrument::Bell(_) => Bell::VOLUME,
            Instrument::Bell8(_) => Bell8::VOLUME,
            Instrument::Harmonica(_) => Harmonica::VOLUME,
        }
    }

    /// Start the envelope at playback `time`.
    pub fn note_on(&mut self, time: f64) {
        self.envelope_mut().note_on(time);
    }

    /// Release the envelope at playback `time`.
    pub fn note_off(&mut self, time: f64) {
        self.envelope_mut().note_off(time);
    }

    /// Sample at `time` for a note at `frequency`, with noise from the thread RNG.
    #[inline]
    pub fn sound(&self, time: f64, frequency: f64) -> f64 {
        self.sound_with(&mut rand::rng(), time, frequency)
    }

    /// Sample at `time` for a note at `frequency`, with noise from `rng`.
    pub fn sound_with<R: Rng + ?Sized>(&self, rng: &mut R, time: f64, frequency: f64) -> f64 {
        let amplitude = self.envelope().amplitude(time);
        if amplitude == 0.0 {
            return 0.0;
        }

        let mix: f64 = self
            .partials()
            .iter()
            .map(|partial| partial.render(rng, time, frequency))
            .sum();

        amplitude * mix * self.volume()
    }

    /// Returns true while the envelope is still producing output.
    pub fn is_active(&self, time: f64) -> bool {
        self.envelope().is_active(time)
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new(InstrumentKind::default())
    }
}
