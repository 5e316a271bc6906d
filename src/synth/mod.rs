// Purpose: Voice control, key handling and the shared playback clock
// This layer sits above the instruments and connects them to the outside world

pub mod clock;
pub mod input;
pub mod keys;
pub mod message;
pub mod voice;

pub use clock::PlaybackClock;
pub use input::KeyInput;
pub use keys::{note_frequency, KeyEdge, KeyScanner, KEY_COUNT};
pub use message::{MessageReceiver, MessageSender, VoiceMessage};
pub use voice::{VoiceController, VoiceHandle};
