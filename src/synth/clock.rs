use std::sync::atomic::{AtomicU64, Ordering};

/// Playback time shared by the audio and input threads.
///
/// The audio callback owns the clock: it advances the frame counter once per
/// buffer. Everyone else only reads it. Time never goes backwards.
#[derive(Debug)]
pub struct PlaybackClock {
    frames: AtomicU64,
    sample_rate: f64,
}

impl PlaybackClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate: sample_rate as f64,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Current playback time in seconds.
    pub fn time(&self) -> f64 {
        self.time_at(self.frames())
    }

    /// Playback time of frame number `frame`.
    #[inline]
    pub fn time_at(&self, frame: u64) -> f64 {
        frame as f64 / self.sample_rate
    }

    /// Move the clock forward by `frames`, returning the new frame count.
    pub fn advance(&self, frames: u64) -> u64 {
        self.frames.fetch_add(frames, Ordering::AcqRel) + frames
    }
}
