use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lfo::{angular, Vibrato};

/*
Oscillators
===========

An oscillator turns (frequency, time) into a sample. Every waveform here is a
pure function of its inputs: no phase accumulator, no per-voice memory. The
same call always returns the same value, which lets the voice controller ask
for a sample at whatever playback time the audio device reports.

The one exception is Noise, which draws from a random source.

Phase
-----

All periodic shapes start from the same (optionally vibrato-modulated)
phase in radians:

    phase = 2π · f · t  +  depth · f · sin(2π · rate · t)

Waveforms
---------

  Sine        sin(phase). Pure tone, no harmonics.

  Square      ±0.3 depending on the sign of sin(phase). Deliberately not
              full-scale: a square carries a lot of energy and instruments
              stack several of them.

              0.3 ┐ ┌───┐   ┌───┐
                  │ │   │   │   │
             -0.3 └─┘   └───┘   └──

  Triangle    asin(sin(phase)) · 2/π. asin folds the sine back into straight
              lines, giving an exact triangle in [-1, 1].

  AnalogSaw   Additive saw: Σ sin(n · phase) / n for n = 1..=49.
              Band-limited and warm, but 49 sin() calls per sample. The sum
              is returned unscaled (peaks slightly above ±1.5); instruments
              choose their own weights.

  DigitalSaw  Closed form ramp:

                  (2/π) · (f · π · (t mod 1/f) − π/2)

              Cheap and bright (aliases at high pitch). Ignores vibrato.
              A non-positive frequency has no period, so it yields 0.

  Noise       Uniform random value in [-1, 1]. Ignores frequency and time;
              instruments pass frequency 0 to mark a noise partial.
*/

/// Number of harmonics summed by [`Waveform::AnalogSaw`].
pub const ANALOG_SAW_HARMONICS: u32 = 49;

/// Peak level of [`Waveform::Square`].
pub const SQUARE_LEVEL: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    AnalogSaw,
    DigitalSaw,
    Noise,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::AnalogSaw,
        Waveform::DigitalSaw,
        Waveform::Noise,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::AnalogSaw => "analog_saw",
            Waveform::DigitalSaw => "digital_saw",
            Waveform::Noise => "noise",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown waveform `{0}`")]
pub struct ParseWaveformError(pub String);

impl FromStr for Waveform {
    type Err = ParseWaveformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Waveform::ALL
            .into_iter()
            .find(|w| w.name() == normalized)
            .ok_or_else(|| ParseWaveformError(s.to_string()))
    }
}

/// One sample of `waveform` at `time`, drawing noise from the thread-local RNG.
#[inline]
pub fn sample(frequency: f64, time: f64, waveform: Waveform, vibrato: Vibrato) -> f64 {
    sample_with(&mut rand::rng(), frequency, time, waveform, vibrato)
}

/// One sample of `waveform` at `time`, drawing noise from `rng`.
///
/// Pass a seeded RNG to make `Noise` reproducible; every other waveform ignores it.
pub fn sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    frequency: f64,
    time: f64,
    waveform: Waveform,
    vibrato: Vibrato,
) -> f64 {
    let phase = angular(frequency) * time + vibrato.phase_offset(frequency, time);

    match waveform {
        Waveform::Sine => phase.sin(),
        Waveform::Square => {
            if phase.sin() > 0.0 {
                SQUARE_LEVEL
            } else {
                -SQUARE_LEVEL
            }
        }
        Waveform::Triangle => phase.sin().asin() * FRAC_2_PI,
        Waveform::AnalogSaw => analog_saw(phase),
        Waveform::DigitalSaw => digital_saw(frequency, time),
        Waveform::Noise => rng.random_range(-1.0..=1.0),
    }
}

#[inline]
fn analog_saw(phase: f64) -> f64 {
    (1..=ANALOG_SAW_HARMONICS)
        .map(|n| {
            let n = n as f64;
            (n * phase).sin() / n
        })
        .sum()
}

#[inline]
fn digital_saw(frequency: f64, time: f64) -> f64 {
    if frequency <= 0.0 {
        return 0.0;
    }
    FRAC_2_PI * (frequency * PI * (time % (1.0 / frequency)) - FRAC_PI_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TIMES: [f64; 6] = [0.0, 0.0011, 0.0173, 0.25, 1.337, 42.5];

    #[test]
    fn periodic_waveforms_are_deterministic() {
        let vibrato = Vibrato::new(5.0, 0.001);
        for waveform in Waveform::ALL {
            if waveform == Waveform::Noise {
                continue;
            }
            for &t in &TIMES {
                let a = sample(220.0, t, waveform, vibrato);
                let b = sample(220.0, t, waveform, vibrato);
                assert_eq!(a.to_bits(), b.to_bits(), "{waveform} differs at t={t}");
            }
        }
    }

    #[test]
    fn sine_matches_closed_form() {
        let t = 0.0123;
        let expected = (440.0 * std::f64::consts::TAU * t).sin();
        let actual = sample(440.0, t, Waveform::Sine, Vibrato::NONE);
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn sine_and_triangle_stay_in_unit_range() {
        for waveform in [Waveform::Sine, Waveform::Triangle] {
            for i in 0..10_000 {
                let t = i as f64 / 44_100.0;
                let s = sample(329.63, t, waveform, Vibrato::new(6.0, 0.01));
                assert!((-1.0..=1.0).contains(&s), "{waveform} sample {s} out of range");
            }
        }
    }

    #[test]
    fn square_is_exactly_plus_minus_level() {
        for i in 0..5_000 {
            let t = i as f64 / 44_100.0;
            let s = sample(110.0, t, Waveform::Square, Vibrato::NONE);
            assert!(s == SQUARE_LEVEL || s == -SQUARE_LEVEL, "square sample {s}");
        }
    }

    #[test]
    fn triangle_peaks_at_quarter_period() {
        let f = 100.0;
        let quarter = 0.25 / f;
        let s = sample(f, quarter, Waveform::Triangle, Vibrato::NONE);
        assert!((s - 1.0).abs() < 1e-6, "expected peak, got {s}");
    }

    #[test]
    fn analog_saw_returns_the_harmonic_sum() {
        // An eighth of a cycle in: every partial contributes, so a dropped
        // sum would show up as 0.
        let f = 100.0;
        let t = 0.125 / f;
        let phase = angular(f) * t;
        let expected: f64 = (1..=49).map(|n| (n as f64 * phase).sin() / n as f64).sum();

        let actual = sample(f, t, Waveform::AnalogSaw, Vibrato::NONE);
        assert!(actual.abs() > 0.1, "analog saw collapsed to {actual}");
        assert!((actual - expected).abs() < 1e-12);
    }

    #[test]
    fn digital_saw_ramps_across_the_period() {
        let f = 10.0;
        let start = sample(f, 0.0, Waveform::DigitalSaw, Vibrato::NONE);
        let middle = sample(f, 0.05, Waveform::DigitalSaw, Vibrato::NONE);
        let late = sample(f, 0.099, Waveform::DigitalSaw, Vibrato::NONE);
        assert!((start + 1.0).abs() < 1e-9);
        assert!(middle.abs() < 1e-9);
        assert!(late > 0.95 && late < 1.0);
    }

    #[test]
    fn digital_saw_guards_zero_frequency() {
        assert_eq!(sample(0.0, 1.0, Waveform::DigitalSaw, Vibrato::NONE), 0.0);
        assert_eq!(sample(-5.0, 1.0, Waveform::DigitalSaw, Vibrato::NONE), 0.0);
    }

    #[test]
    fn noise_is_bounded_and_seedable() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let x = sample_with(&mut a, 0.0, 0.0, Waveform::Noise, Vibrato::NONE);
            let y = sample_with(&mut b, 0.0, 0.0, Waveform::Noise, Vibrato::NONE);
            assert!((-1.0..=1.0).contains(&x));
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn noise_draws_vary() {
        let mut rng = StdRng::seed_from_u64(99);
        let first = sample_with(&mut rng, 0.0, 0.0, Waveform::Noise, Vibrato::NONE);
        let differs = (0..16)
            .map(|_| sample_with(&mut rng, 0.0, 0.0, Waveform::Noise, Vibrato::NONE))
            .any(|s| s != first);
        assert!(differs);
    }

    #[test]
    fn parses_waveform_names() {
        assert_eq!("sine".parse::<Waveform>(), Ok(Waveform::Sine));
        assert_eq!("Analog-Saw".parse::<Waveform>(), Ok(Waveform::AnalogSaw));
        assert_eq!("digital saw".parse::<Waveform>(), Ok(Waveform::DigitalSaw));
        assert!("wobble".parse::<Waveform>().is_err());
    }
}
