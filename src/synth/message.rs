#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, PushError};

use crate::instrument::InstrumentKind;

/// Control messages sent from the input thread to the audio thread.
///
/// Times are playback seconds read from the shared clock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum VoiceMessage {
    NoteOn { time: f64, frequency: f64 },
    NoteOff { time: f64 },
    /// Swap instruments; a held note carries over from `time`.
    SetInstrument { kind: InstrumentKind, time: f64 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<VoiceMessage>;
}

pub trait MessageSender {
    /// Queue `msg`, handing it back if there is no room.
    fn push(&mut self, msg: VoiceMessage) -> Result<(), VoiceMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<VoiceMessage> {
    fn pop(&mut self) -> Option<VoiceMessage> {
        Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl MessageSender for Producer<VoiceMessage> {
    fn push(&mut self, msg: VoiceMessage) -> Result<(), VoiceMessage> {
        match Producer::push(self, msg) {
            Ok(()) => Ok(()),
            Err(PushError::Full(msg)) => Err(msg),
        }
    }
}
