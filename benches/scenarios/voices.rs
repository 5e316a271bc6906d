//! Benchmarks for complete instruments.
//!
//! These are the per-sample costs the audio callback actually pays: the
//! envelope, every partial of the recipe, and the controller's queue drain.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::instrument::{Instrument, InstrumentKind};
use keysynth::synth::VoiceController;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let frequency = 110.0; // A2, the bottom key

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // === INSTRUMENTS ===
        // Bell: three sines; Harmonica: three squares plus noise
        for kind in InstrumentKind::ALL {
            let mut instrument = Instrument::new(kind);
            instrument.note_on(0.0);

            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| {
                    for (i, out) in buffer.iter_mut().enumerate() {
                        let t = 0.25 + i as f64 / SAMPLE_RATE;
                        *out = instrument.sound(t, black_box(frequency));
                    }
                })
            });
        }

        // === CONTROLLER ===
        // Harmonica through the voice controller, including the
        // per-sample message queue check
        let (mut voice, mut handle) =
            VoiceController::with_queue(Instrument::new(InstrumentKind::Harmonica), 0.4, 64);
        handle.note_on(0.0, frequency);

        group.bench_with_input(BenchmarkId::new("controller", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    let t = 0.25 + i as f64 / SAMPLE_RATE;
                    *out = voice.next_sample(black_box(t));
                }
            })
        });
    }

    group.finish();
}
