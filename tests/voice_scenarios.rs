#![cfg(feature = "rtrb")]

use std::sync::Arc;
use std::thread;

use keysynth::{
    dsp::oscillator::Waveform,
    instrument::{Instrument, InstrumentKind},
    synth::{note_frequency, KeyInput, PlaybackClock, VoiceController, VoiceMessage, KEY_COUNT},
    SynthConfig,
};

fn held(keys: &[usize]) -> [bool; KEY_COUNT] {
    let mut state = [false; KEY_COUNT];
    for &k in keys {
        state[k] = true;
    }
    state
}

#[test]
fn harmonica_note_lifecycle() {
    let mut harmonica = Instrument::new(InstrumentKind::Harmonica);

    let tonal = harmonica
        .partials()
        .iter()
        .filter(|p| p.waveform != Waveform::Noise)
        .count();
    let noisy = harmonica
        .partials()
        .iter()
        .filter(|p| p.waveform == Waveform::Noise)
        .count();
    assert!(tonal >= 3);
    assert_eq!(noisy, 1);

    harmonica.note_on(0.0);
    let s = harmonica.sound(0.005, 220.0);
    assert!(s.is_finite());
    assert!((-1.0..=1.0).contains(&s), "sample {s} out of range");

    harmonica.note_off(0.5);
    assert_eq!(harmonica.envelope().amplitude(1.6), 0.0);
    assert_eq!(harmonica.sound(1.6, 220.0), 0.0);
}

#[test]
fn twelve_semitones_is_an_octave() {
    let config = SynthConfig::default();
    let f = note_frequency(config.base_octave_frequency, 12);
    assert!((f - 220.0).abs() < 0.5, "got {f}");
}

#[test]
fn every_instrument_stays_within_full_scale() {
    let config = SynthConfig::default();
    for kind in InstrumentKind::ALL {
        let mut instrument = Instrument::new(kind);
        instrument.note_on(0.0);
        for key in 0..KEY_COUNT {
            let f = note_frequency(config.base_octave_frequency, key);
            for i in 0..2_000 {
                let t = i as f64 / 4_410.0;
                let s = instrument.sound(t, f) * config.output_headroom;
                assert!((-1.0..=1.0).contains(&s), "{kind} key {key}: {s} at t={t}");
            }
        }
    }
}

#[test]
fn held_key_triggers_once_across_threads() {
    let clock = Arc::new(PlaybackClock::new(44_100));
    let (mut voice, handle) =
        VoiceController::with_queue(Instrument::new(InstrumentKind::Bell8), 0.4, 64);

    let input_thread = {
        let clock = clock.clone();
        thread::spawn(move || {
            let mut input = KeyInput::new(handle, clock.clone(), 110.0);
            let mut sent = Vec::new();
            for _ in 0..40 {
                sent.extend(input.poll(&held(&[7])));
                clock.advance(441);
            }
            for _ in 0..40 {
                sent.extend(input.poll(&held(&[])));
                clock.advance(441);
            }
            sent
        })
    };
    let sent = input_thread.join().unwrap();

    let note_ons: Vec<_> = sent
        .iter()
        .filter(|m| matches!(m, VoiceMessage::NoteOn { .. }))
        .collect();
    let note_offs: Vec<_> = sent
        .iter()
        .filter(|m| matches!(m, VoiceMessage::NoteOff { .. }))
        .collect();
    assert_eq!(note_ons.len(), 1);
    assert_eq!(note_offs.len(), 1);

    voice.drain_messages();
    let envelope = voice.instrument().envelope();
    assert_eq!(envelope.trigger_on_time(), 0.0);
    assert!((envelope.trigger_off_time() - 0.4).abs() < 1e-9);
    assert!((voice.frequency() - note_frequency(110.0, 7)).abs() < 1e-9);
}

#[test]
fn keyboard_to_device_buffer() {
    let clock = Arc::new(PlaybackClock::new(44_100));
    let (mut voice, handle) =
        VoiceController::with_queue(Instrument::new(InstrumentKind::Harmonica), 0.4, 16);
    let mut input = KeyInput::new(handle, clock.clone(), 110.0);
    let mut data = vec![0.0f32; 2 * 512];

    // Nothing pressed: silence.
    input.poll(&held(&[]));
    voice.render_interleaved(&mut data, 2, &clock);
    assert!(data.iter().all(|&s| s == 0.0));

    // Press: sound on the very next buffer.
    input.poll(&held(&[0]));
    voice.render_interleaved(&mut data, 2, &clock);
    assert!(data.iter().any(|&s| s != 0.0));
    assert!(data.iter().all(|&s| s.abs() <= 1.0));

    // Release, then render well past the 100ms release.
    input.poll(&held(&[]));
    for _ in 0..20 {
        voice.render_interleaved(&mut data, 2, &clock);
    }
    assert!(data.iter().all(|&s| s == 0.0));
}

#[test]
fn instrument_switch_reaches_audio_thread() {
    let clock = Arc::new(PlaybackClock::new(44_100));
    let (mut voice, handle) =
        VoiceController::with_queue(Instrument::new(InstrumentKind::Harmonica), 0.4, 16);
    let mut input = KeyInput::new(handle, clock.clone(), 110.0);

    input.set_instrument(InstrumentKind::Bell);
    let _ = voice.next_sample(clock.time());
    assert_eq!(voice.instrument().kind(), InstrumentKind::Bell);
}
