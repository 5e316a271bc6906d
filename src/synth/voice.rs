use rand::rngs::SmallRng;
use rand::SeedableRng;
#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    dsp::envelope::ReleaseMode,
    instrument::{Instrument, InstrumentKind},
    synth::{
        clock::PlaybackClock,
        message::{MessageReceiver, MessageSender, VoiceMessage},
    },
};

/// The single sounding voice, owned by the audio thread.
///
/// Holds the active instrument and frequency. Everything that changes them
/// arrives as [`VoiceMessage`]s and is applied at the start of the next
/// sample, so the audio thread never waits on the input thread.
///
/// Noise is drawn from a generator owned by the controller and seeded when it
/// is built, so pulling samples never touches the thread-local RNG.
pub struct VoiceController<R: MessageReceiver> {
    instrument: Instrument,
    frequency: f64,
    headroom: f64,
    release_mode: ReleaseMode,
    rng: SmallRng,
    rx: R,
}

impl<R: MessageReceiver> VoiceController<R> {
    pub fn new(instrument: Instrument, headroom: f64, rx: R) -> Self {
        Self::with_rng(instrument, headroom, rx, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Like [`VoiceController::new`] with an explicit noise generator.
    pub fn with_rng(instrument: Instrument, headroom: f64, rx: R, rng: SmallRng) -> Self {
        let release_mode = instrument.envelope().release_mode();
        Self {
            instrument,
            frequency: 0.0,
            headroom,
            release_mode,
            rng,
            rx,
        }
    }

    /// Apply every pending control message.
    pub fn drain_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.apply(msg);
        }
    }

    fn apply(&mut self, msg: VoiceMessage) {
        match msg {
            VoiceMessage::NoteOn { time, frequency } => {
                self.frequency = frequency;
                self.instrument.note_on(time);
            }
            VoiceMessage::NoteOff { time } => {
                self.instrument.note_off(time);
            }
            VoiceMessage::SetInstrument { kind, time } => {
                let held = self.instrument.envelope().is_note_on();
                self.set_instrument(Instrument::with_release_mode(kind, self.release_mode));
                if held {
                    self.instrument.note_on(time);
                }
            }
        }
    }

    /// Pull one output sample at playback `time`.
    #[inline]
    pub fn next_sample(&mut self, time: f64) -> f64 {
        self.drain_messages();
        self.instrument.sound_with(&mut self.rng, time, self.frequency) * self.headroom
    }

    /// Fill an interleaved device buffer, one sample per frame copied to all
    /// channels, and advance `clock` past it.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize, clock: &PlaybackClock) {
        let channels = channels.max(1);
        let start = clock.frames();
        let mut frames = 0u64;

        for frame in data.chunks_mut(channels) {
            let time = clock.time_at(start + frames);
            let sample = self.next_sample(time) as f32;
            frame.fill(sample);
            frames += 1;
        }

        clock.advance(frames);
    }

    /// Swap the active instrument as is, without carrying over a held note.
    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.instrument = instrument;
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn headroom(&self) -> f64 {
        self.headroom
    }
}

#[cfg(feature = "rtrb")]
impl VoiceController<Consumer<VoiceMessage>> {
    /// Controller plus the handle that feeds it, joined by a ring buffer of
    /// `capacity` messages.
    pub fn with_queue(
        instrument: Instrument,
        headroom: f64,
        capacity: usize,
    ) -> (Self, VoiceHandle<Producer<VoiceMessage>>) {
        let (tx, rx) = RingBuffer::<VoiceMessage>::new(capacity);
        tracing::debug!(
            instrument = %instrument.kind(),
            headroom,
            capacity,
            "voice controller created"
        );
        (Self::new(instrument, headroom, rx), VoiceHandle::new(tx))
    }
}

/// Input-side end of the controller's message queue.
pub struct VoiceHandle<S: MessageSender> {
    tx: S,
}

impl<S: MessageSender> VoiceHandle<S> {
    pub fn new(tx: S) -> Self {
        Self { tx }
    }

    /// Queue a message; returns false if the queue was full and it was dropped.
    pub fn send(&mut self, msg: VoiceMessage) -> bool {
        self.tx.push(msg).is_ok()
    }

    pub fn note_on(&mut self, time: f64, frequency: f64) -> bool {
        self.send(VoiceMessage::NoteOn { time, frequency })
    }

    pub fn note_off(&mut self, time: f64) -> bool {
        self.send(VoiceMessage::NoteOff { time })
    }

    pub fn set_instrument(&mut self, kind: InstrumentKind, time: f64) -> bool {
        self.send(VoiceMessage::SetInstrument { kind, time })
    }
}
