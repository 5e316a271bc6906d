//! Vibrato: a low frequency oscillator bent onto an oscillator's phase.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/*
Vibrato
=======

Vibrato is pitch wobble. A second, very slow sine (the LFO) pushes the phase
of the audible oscillator back and forth, so its instantaneous frequency
swings slightly above and below the played note.

Vocabulary
----------

  audio-rate      Frequencies humans can hear: ~20 Hz to ~20,000 Hz.
                  The oscillator being modulated runs here.

  control-rate    Frequencies below ~20 Hz. The LFO runs here; you hear its
                  effect, not the LFO itself.

  rate            LFO frequency in Hz. 5-7 Hz is the classic vibrato speed.

  depth           How far the phase is pushed, as a fraction of the carrier
                  frequency. 0.001 is a subtle shimmer; 0.01 is very obvious.


The Math
--------

Without vibrato the phase of an oscillator at time t is simply:

    phase = 2π · f · t

With vibrato we add a sine term scaled by the depth and the carrier
frequency:

    phase = 2π · f · t  +  depth · f · sin(2π · rate · t)

Scaling by `f` keeps the perceived wobble proportional across the keyboard:
a high note bends by as many cents as a low one.

Both terms are pure functions of t, so the oscillator stays stateless and can
be evaluated at any time in any order.


Typical Settings
----------------

    rate 5 Hz, depth 0.001     Gentle, reed-like (harmonica, bells)
    rate 6 Hz, depth 0.005     Singer-style vibrato
    rate 0 or depth 0          No modulation (Vibrato::NONE)
*/

/// Phase modulation applied to an oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vibrato {
    /// LFO rate in Hz.
    pub frequency: f64,
    /// Modulation depth relative to the carrier frequency.
    pub depth: f64,
}

impl Vibrato {
    /// No modulation at all.
    pub const NONE: Vibrato = Vibrato {
        frequency: 0.0,
        depth: 0.0,
    };

    pub const fn new(frequency: f64, depth: f64) -> Self {
        Self { frequency, depth }
    }

    /// Phase offset (radians) added to a carrier at `carrier_frequency`.
    #[inline]
    pub fn phase_offset(&self, carrier_frequency: f64, time: f64) -> f64 {
        self.depth * carrier_frequency * (angular(self.frequency) * time).sin()
    }
}

/// Convert a frequency in Hz to angular velocity (radians per second).
#[inline]
pub fn angular(frequency_hz: f64) -> f64 {
    frequency_hz * TAU
}
