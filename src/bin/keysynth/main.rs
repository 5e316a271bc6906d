//! keysynth - play the computer keyboard like a piano
//!
//! Run with: cargo run -- --instrument bell

mod app;
mod keyboard;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::{list_output_devices, Keysynth};
use keysynth::{InstrumentKind, SynthConfig};

/// Monophonic keyboard synthesizer for the terminal.
#[derive(Debug, Parser)]
#[command(name = "keysynth", version, about)]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Startup instrument (bell, bell8, harmonica)
    #[arg(short, long)]
    instrument: Option<InstrumentKind>,

    /// Frequency of the lowest key in Hz
    #[arg(long)]
    base_frequency: Option<f64>,

    /// Requested output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Output gain applied to every sample, in (0, 1]
    #[arg(long)]
    headroom: Option<f64>,

    /// Fade out from the level at key up instead of the sustain level
    #[arg(long)]
    capture_release: bool,

    /// Print the available output devices and exit
    #[arg(long)]
    list_devices: bool,
}

impl Cli {
    fn into_config(self) -> EyreResult<SynthConfig> {
        let mut config = match &self.config {
            Some(path) => SynthConfig::load(path)
                .wrap_err_with(|| format!("failed to load {}", path.display()))?,
            None => SynthConfig::default(),
        };

        if let Some(instrument) = self.instrument {
            config.instrument = instrument;
        }
        if let Some(base) = self.base_frequency {
            config.base_octave_frequency = base;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(headroom) = self.headroom {
            config.output_headroom = headroom;
        }
        if self.capture_release {
            config.capture_release_level = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.list_devices {
        return list_output_devices();
    }

    let config = cli.into_config()?;
    tracing::debug!(?config, "starting");

    Keysynth::new(config).run()
}
