//! Keyboard layout, equal temperament and key edge detection.

/*
Sixteen computer keys form one and a third octaves of a piano, starting at
the base note. The bottom letter row holds the white keys, the row above it
the black keys:

    |   |   |   |   |   | |   |   |   |   | |   | |   |   |   |
    |   | S |   |   | F | | G |   |   | J | | K | | L |   |   |
    |   |___|   |   |___| |___|   |   |___| |___| |___|   |   |__
    |     |     |     |     |     |     |     |     |     |     |
    |  Z  |  X  |  C  |  V  |  B  |  N  |  M  |  ,  |  .  |  /  |
    |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|

Key k plays semitone k above the base:

    f(k) = base · (2^(1/12))^k

so k = 12 is exactly one octave (2 · base).
*/

/// Number of playable keys.
pub const KEY_COUNT: usize = 16;

/// Keys in semitone order, lowest first.
pub const KEY_LAYOUT: [char; KEY_COUNT] = [
    'z', 's', 'x', 'c', 'f', 'v', 'g', 'b', 'n', 'j', 'm', 'k', ',', 'l', '.', '/',
];

/// Text drawing of the layout above, for terminals.
pub const KEYBOARD_DIAGRAM: &str = "\
|   |   |   |   |   | |   |   |   |   | |   | |   |   |   |
|   | S |   |   | F | | G |   |   | J | | K | | L |   |   |
|   |___|   |   |___| |___|   |   |___| |___| |___|   |   |__
|     |     |     |     |     |     |     |     |     |     |
|  Z  |  X  |  C  |  V  |  B  |  N  |  M  |  ,  |  .  |  /  |
|_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|";

pub const TWELFTH_ROOT_OF_TWO: f64 = 1.059_463_094_359_295_3;

/// Equal-tempered frequency `semitone` steps above `base`.
#[inline]
pub fn note_frequency(base: f64, semitone: usize) -> f64 {
    base * TWELFTH_ROOT_OF_TWO.powi(semitone as i32)
}

/// Semitone index of a layout key, ignoring case.
pub fn key_index(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    KEY_LAYOUT.iter().position(|&k| k == key)
}

/// A change in which key is sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    /// `key` became the sounding key.
    Pressed { key: usize },
    /// No key is held any more.
    Released,
}

/// Turns per-tick "is held" snapshots into press/release edges.
///
/// Holding a key across any number of ticks yields one `Pressed`; letting
/// go of everything yields one `Released`. When several keys are down the
/// most recently pressed one sounds; if it is released while others are
/// still held, the lowest held key takes over.
#[derive(Debug, Clone)]
pub struct KeyScanner {
    previous: [bool; KEY_COUNT],
    current: Option<usize>,
}

impl KeyScanner {
    pub fn new() -> Self {
        Self {
            previous: [false; KEY_COUNT],
            current: None,
        }
    }

    /// The key currently sounding, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Compare `held` against the previous tick and report at most one edge.
    pub fn scan(&mut self, held: &[bool; KEY_COUNT]) -> Option<KeyEdge> {
        let newly_pressed = (0..KEY_COUNT)
            .rev()
            .find(|&k| held[k] && !self.previous[k]);

        let edge = match (newly_pressed, self.current) {
            (Some(key), current) if current != Some(key) => {
                self.current = Some(key);
                Some(KeyEdge::Pressed { key })
            }
            (Some(_), _) => None,
            (None, Some(key)) if held[key] => None,
            (None, Some(_)) => match held.iter().position(|&h| h) {
                Some(key) => {
                    self.current = Some(key);
                    Some(KeyEdge::Pressed { key })
                }
                None => {
                    self.current = None;
                    Some(KeyEdge::Released)
                }
            },
            (None, None) => None,
        };

        self.previous = *held;
        edge
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        Self::new()
    }
}
