use std::sync::Arc;

use crate::{
    instrument::InstrumentKind,
    synth::{
        clock::PlaybackClock,
        keys::{note_frequency, KeyEdge, KeyScanner, KEY_COUNT},
        message::{MessageSender, VoiceMessage},
        voice::VoiceHandle,
    },
};

/// Input-thread side of the synth: turns key snapshots into voice messages.
///
/// Each poll diffs the held keys, stamps any edge with the current playback
/// time and forwards it to the audio thread.
pub struct KeyInput<S: MessageSender> {
    scanner: KeyScanner,
    handle: VoiceHandle<S>,
    clock: Arc<PlaybackClock>,
    base_frequency: f64,
}

impl<S: MessageSender> KeyInput<S> {
    pub fn new(handle: VoiceHandle<S>, clock: Arc<PlaybackClock>, base_frequency: f64) -> Self {
        Self {
            scanner: KeyScanner::new(),
            handle,
            clock,
            base_frequency,
        }
    }

    /// Scan one tick of key state. Returns the message sent, if any.
    pub fn poll(&mut self, held: &[bool; KEY_COUNT]) -> Option<VoiceMessage> {
        let edge = self.scanner.scan(held)?;
        let time = self.clock.time();

        let msg = match edge {
            KeyEdge::Pressed { key } => {
                let frequency = note_frequency(self.base_frequency, key);
                tracing::debug!(key, time, frequency, "note on");
                VoiceMessage::NoteOn { time, frequency }
            }
            KeyEdge::Released => {
                tracing::debug!(time, "note off");
                VoiceMessage::NoteOff { time }
            }
        };

        if !self.handle.send(msg) {
            tracing::warn!(?msg, "voice queue full, dropping message");
        }
        Some(msg)
    }

    pub fn set_instrument(&mut self, kind: InstrumentKind) {
        let time = self.clock.time();
        tracing::debug!(instrument = %kind, time, "switching instrument");
        if !self.handle.set_instrument(kind, time) {
            tracing::warn!(instrument = %kind, "voice queue full, instrument not switched");
        }
    }

    /// The key currently sounding, if any.
    pub fn current_key(&self) -> Option<usize> {
        self.scanner.current()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }
}
