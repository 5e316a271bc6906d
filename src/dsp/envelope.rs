use serde::{Deserialize, Serialize};

use crate::SILENCE_THRESHOLD;

/*
ADSR Envelope Implementation
============================

This module implements a linear ADSR envelope: the amplitude curve that makes
a note swell in, settle, hold while the key is down and fade out after it is
released.

Vocabulary
----------

  amplitude   The envelope's output (0.0 to 1.0) at a given time. Instruments
              multiply their summed oscillators by it.

  trigger     A timestamp (seconds of playback time) recorded by note_on or
              note_off. The envelope stores nothing else that changes.

  life time   Seconds since the note went on: t - trigger_on_time.

  start       Peak amplitude reached at the end of the attack.

  sustain     Level held after decay for as long as the key stays down.


The Shape: Linear Ramps
-----------------------

  Amplitude
  start ┐     ╱╲
        │    ╱  ╲___________
   sus  │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)


Time Derived, Not Stepped
-------------------------

There is no per-sample state. Each query recomputes where we are from the
clock:

    while note is on:
      life ≤ A          amplitude = (life / A) · start
      life ≤ A + D      amplitude = ((life − A) / D) · (sustain − start) + start
      otherwise         amplitude = sustain

    after note off:
      amplitude = sustain · (1 − (t − t_off) / R)     clamped to [0, sustain]

Because of this the envelope can be evaluated at any time, in any order, and
stays cheap: a couple of compares and one division.


The Release Quirk
-----------------

With ReleaseMode::FromSustain the release ramp always starts at the
configured sustain level, not at the level the note had actually reached. A
key released mid-attack therefore jumps to the sustain level before fading.

    start ┐   ╱│
          │  ╱ │   ← released here, still rising
      sus │ ╱  └╲  ← release restarts from sustain
          │╱     ╲
      0.0 └───────╲──→

ReleaseMode::FromCurrent snapshots the amplitude at note_off and fades from
there instead, removing the jump.

Anything at or below 1e-4 is flushed to exactly 0.0.
*/

/// Stage of the envelope at a particular time.
///
/// Derived on demand by [`Envelope::state`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,    // Never triggered, or release has finished
    Attack,  // Ramping 0 → start
    Decay,   // Ramping start → sustain
    Sustain, // Holding sustain while the key is down
    Release, // Key up, ramping down to 0
}

/// Where the release ramp starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMode {
    /// Fade from the configured sustain level, whatever was sounding.
    #[default]
    FromSustain,
    /// Fade from the amplitude present at the moment of note off.
    FromCurrent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    // Shape (fixed per instrument)
    attack_time: f64,       // seconds to ramp 0 → start
    decay_time: f64,        // seconds to ramp start → sustain
    release_time: f64,      // seconds to ramp release level → 0
    start_amplitude: f64,   // peak at the end of attack
    sustain_amplitude: f64, // level held while the key is down
    release_mode: ReleaseMode,

    // Triggers
    trigger_on_time: f64,
    trigger_off_time: f64,
    note_on: bool,
    release_amplitude: f64, // level the release ramp starts from
}

impl Envelope {
    pub fn adsr(attack: f64, decay: f64, start: f64, sustain: f64, release: f64) -> Self {
        let sustain = sustain.clamp(0.0, 1.0);
        Self {
            attack_time: attack.max(0.0),
            decay_time: decay.max(0.0),
            release_time: release.max(0.0),
            start_amplitude: start.clamp(0.0, 1.0),
            sustain_amplitude: sustain,
            release_mode: ReleaseMode::FromSustain,

            trigger_on_time: 0.0,
            // Never released: any release ramp is already over.
            trigger_off_time: f64::NEG_INFINITY,
            note_on: false,
            release_amplitude: sustain,
        }
    }

    pub fn with_release_mode(mut self, mode: ReleaseMode) -> Self {
        self.release_mode = mode;
        self
    }

    /// Gate high at `time`.
    pub fn note_on(&mut self, time: f64) {
        self.trigger_on_time = time;
        self.note_on = true;
    }

    /// Gate low at `time`. Ignored unless a note is currently on.
    pub fn note_off(&mut self, time: f64) {
        if !self.note_on {
            return;
        }

        self.release_amplitude = match self.release_mode {
            ReleaseMode::FromSustain => self.sustain_amplitude,
            ReleaseMode::FromCurrent => self.amplitude(time),
        };
        self.trigger_off_time = time;
        self.note_on = false;
    }

    /// Envelope amplitude at playback `time`.
    pub fn amplitude(&self, time: f64) -> f64 {
        let amplitude = if self.note_on {
            // Queried before the trigger: hold at the start of the attack.
            let life_time = (time - self.trigger_on_time).max(0.0);
            self.held_amplitude(life_time)
        } else {
            self.released_amplitude(time)
        };

        if amplitude <= SILENCE_THRESHOLD {
            0.0
        } else {
            amplitude
        }
    }

    fn held_amplitude(&self, life_time: f64) -> f64 {
        if life_time <= self.attack_time {
            if self.attack_time > 0.0 {
                (life_time / self.attack_time) * self.start_amplitude
            } else {
                self.start_amplitude
            }
        } else if life_time <= self.attack_time + self.decay_time {
            // decay_time > 0 here, otherwise the range would be empty
            ((life_time - self.attack_time) / self.decay_time)
                * (self.sustain_amplitude - self.start_amplitude)
                + self.start_amplitude
        } else {
            self.sustain_amplitude
        }
    }

    fn released_amplitude(&self, time: f64) -> f64 {
        if self.release_time <= 0.0 {
            return 0.0;
        }
        let progress = ((time - self.trigger_off_time) / self.release_time).clamp(0.0, 1.0);
        self.release_amplitude * (1.0 - progress)
    }

    /// Which stage the envelope is in at `time`.
    pub fn state(&self, time: f64) -> EnvelopeState {
        if self.note_on {
            let life_time = (time - self.trigger_on_time).max(0.0);
            if self.attack_time > 0.0 && life_time <= self.attack_time {
                EnvelopeState::Attack
            } else if self.decay_time > 0.0 && life_time <= self.attack_time + self.decay_time {
                EnvelopeState::Decay
            } else {
                EnvelopeState::Sustain
            }
        } else if self.amplitude(time) > 0.0 {
            EnvelopeState::Release
        } else {
            EnvelopeState::Idle
        }
    }

    /// Returns true if the envelope produces output at `time`.
    pub fn is_active(&self, time: f64) -> bool {
        !matches!(self.state(time), EnvelopeState::Idle)
    }

    pub fn is_note_on(&self) -> bool {
        self.note_on
    }

    pub fn trigger_on_time(&self) -> f64 {
        self.trigger_on_time
    }

    pub fn trigger_off_time(&self) -> f64 {
        self.trigger_off_time
    }

    pub fn attack_time(&self) -> f64 {
        self.attack_time
    }

    pub fn decay_time(&self) -> f64 {
        self.decay_time
    }

    pub fn release_time(&self) -> f64 {
        self.release_time
    }

    pub fn start_amplitude(&self) -> f64 {
        self.start_amplitude
    }

    pub fn sustain_amplitude(&self) -> f64 {
        self.sustain_amplitude
    }

    pub fn release_mode(&self) -> ReleaseMode {
        self.release_mode
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::adsr(0.1, 0.01, 1.0, 0.8, 0.2)
    }
}
