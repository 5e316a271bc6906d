//! Benchmarks for complete instruments and the voice controller.

mod voices;

pub use voices::bench_voices;
