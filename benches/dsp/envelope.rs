//! Benchmarks for the ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keysynth::dsp::envelope::Envelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(env: &Envelope, start: f64, buffer: &mut [f64]) {
    for (i, out) in buffer.iter_mut().enumerate() {
        *out = env.amplitude(start + i as f64 / SAMPLE_RATE);
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f64; size];

        // Attack phase (ramping up)
        let mut env = Envelope::adsr(1.0, 0.1, 1.0, 0.7, 0.3);
        env.note_on(0.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| render(black_box(&env), 0.0, &mut buffer))
        });

        // Sustain phase (holding steady)
        let mut env = Envelope::adsr(0.001, 0.001, 1.0, 0.7, 0.3);
        env.note_on(0.0);
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| render(black_box(&env), 1.0, &mut buffer))
        });

        // Release phase (ramping down)
        let mut env = Envelope::adsr(0.001, 0.001, 1.0, 0.7, 5.0);
        env.note_on(0.0);
        env.note_off(0.5);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| render(black_box(&env), 1.0, &mut buffer))
        });
    }

    group.finish();
}
