//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::{
    lfo::Vibrato,
    oscillator::{sample, Waveform},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // Sine - one sin() per sample
        // Square - sin() plus a branch
        // Triangle - sin() then asin()
        // AnalogSaw - 49 sin() calls, the expensive one
        // DigitalSaw - fmod, no transcendental functions
        // Noise - thread-local PRNG draw
        for waveform in Waveform::ALL {
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &size, |b, _| {
                b.iter(|| {
                    for (i, out) in buffer.iter_mut().enumerate() {
                        let t = i as f64 / SAMPLE_RATE;
                        *out = sample(black_box(440.0), t, waveform, Vibrato::NONE);
                    }
                })
            });
        }

        // Vibrato adds a second sin() per sample
        let vibrato = Vibrato::new(5.0, 0.001);
        group.bench_with_input(BenchmarkId::new("sine_vibrato", size), &size, |b, _| {
            b.iter(|| {
                for (i, out) in buffer.iter_mut().enumerate() {
                    let t = i as f64 / SAMPLE_RATE;
                    *out = sample(black_box(440.0), t, Waveform::Sine, vibrato);
                }
            })
        });
    }

    group.finish();
}
