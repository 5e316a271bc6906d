//! Static keyboard diagram and the one-line status display.

use std::io::{stdout, Stdout, Write};

use color_eyre::eyre::Result as EyreResult;
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use keysynth::{
    synth::{keys::KEYBOARD_DIAGRAM, VoiceMessage},
    InstrumentKind, SynthConfig,
};

/// Print the title, settings and key layout. Call before raw mode.
pub fn print_banner(config: &SynthConfig, sample_rate: u32) {
    println!("=== keysynth ===");
    println!("Base: {:.2} Hz", config.base_octave_frequency);
    println!("Sample rate: {} Hz", sample_rate);
    println!();
    println!("{KEYBOARD_DIAGRAM}");
    println!();

    let instruments: Vec<String> = InstrumentKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("[{}] {}", i + 1, kind))
        .collect();
    println!("{}  [Esc] Quit", instruments.join("  "));
    println!();
}

/// Status text rewritten in place on the current terminal line.
pub struct StatusLine {
    out: Stdout,
    instrument: InstrumentKind,
}

impl StatusLine {
    pub fn new(instrument: InstrumentKind) -> Self {
        Self {
            out: stdout(),
            instrument,
        }
    }

    pub fn set_instrument(&mut self, kind: InstrumentKind) -> EyreResult<()> {
        self.instrument = kind;
        self.write(format!("Instrument: {kind}"))
    }

    pub fn show(&mut self, msg: &VoiceMessage) -> EyreResult<()> {
        let text = match *msg {
            VoiceMessage::NoteOn { time, frequency } => {
                format!("[{}] Note On : {:.3}s {:.2}Hz", self.instrument, time, frequency)
            }
            VoiceMessage::NoteOff { time } => {
                format!("[{}] Note Off: {:.3}s", self.instrument, time)
            }
            VoiceMessage::SetInstrument { kind, .. } => format!("Instrument: {kind}"),
        };
        self.write(text)
    }

    fn write(&mut self, text: String) -> EyreResult<()> {
        queue!(
            self.out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        self.out.flush()?;
        Ok(())
    }
}
