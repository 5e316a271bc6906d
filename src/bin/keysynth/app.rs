//! Keysynth - audio device setup and the input loop

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use keysynth::{
    synth::{KeyInput, PlaybackClock, VoiceController},
    SynthConfig,
};

use super::keyboard::{Command, TerminalKeyboard};
use super::ui::{print_banner, StatusLine};

/// Room for bursts of key edges between two audio callbacks.
const VOICE_QUEUE_CAPACITY: usize = 64;

/// Main application: one voice, one output stream, one keyboard.
pub struct Keysynth {
    config: SynthConfig,
}

impl Keysynth {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    /// Open the audio device and play until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = choose_output_config(&device, self.config.sample_rate)?;

        let sample_rate = supported.sample_rate().0;
        let channels = supported.channels() as usize;
        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate,
            channels,
            "opened output device"
        );

        let clock = Arc::new(PlaybackClock::new(sample_rate));
        let (mut voice, handle) = VoiceController::with_queue(
            self.config.build_instrument(),
            self.config.output_headroom,
            VOICE_QUEUE_CAPACITY,
        );

        let stream = device
            .build_output_stream(
                &supported.config(),
                {
                    let clock = clock.clone();
                    move |data: &mut [f32], _| {
                        voice.render_interleaved(data, channels, &clock);
                    }
                },
                |err| tracing::error!(%err, "audio stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        print_banner(&self.config, sample_rate);

        let mut input = KeyInput::new(handle, clock, self.config.base_octave_frequency);
        let mut keyboard =
            TerminalKeyboard::enable(Duration::from_millis(self.config.hold_window_ms))?;
        let mut status = StatusLine::new(self.config.instrument);
        let tick = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            match keyboard.poll(tick)? {
                Some(Command::Quit) => break,
                Some(Command::SwitchInstrument(kind)) => {
                    input.set_instrument(kind);
                    status.set_instrument(kind)?;
                }
                None => {}
            }

            if let Some(msg) = input.poll(keyboard.held()) {
                status.show(&msg)?;
            }
        }

        drop(keyboard);
        println!();
        Ok(())
    }
}

/// Print every output device on the default host, marking the default one.
pub fn list_output_devices() -> EyreResult<()> {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());
    let devices = host
        .output_devices()
        .wrap_err("failed to enumerate output devices")?;

    let mut found = 0usize;
    for device in devices {
        let name = device.name().unwrap_or_else(|_| "<unknown>".into());
        let marker = if default_name.as_deref() == Some(name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {name}");
        found += 1;
    }

    if found == 0 {
        println!("No output devices found.");
    }
    tracing::info!(host = ?host.id(), found, "listed output devices");
    Ok(())
}

/// Prefer an f32 config at `sample_rate`, else fall back to the device default.
fn choose_output_config(
    device: &cpal::Device,
    sample_rate: u32,
) -> EyreResult<cpal::SupportedStreamConfig> {
    let wanted = cpal::SampleRate(sample_rate);
    let matching = device
        .supported_output_configs()
        .wrap_err("failed to query supported output configs")?
        .filter(|range| range.sample_format() == cpal::SampleFormat::F32)
        .find(|range| {
            range.min_sample_rate().0 <= sample_rate && sample_rate <= range.max_sample_rate().0
        });

    if let Some(range) = matching {
        return Ok(range.with_sample_rate(wanted));
    }

    let fallback = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if fallback.sample_format() != cpal::SampleFormat::F32 {
        return Err(eyre!(
            "device offers no f32 output (default format is {:?})",
            fallback.sample_format()
        ));
    }
    tracing::warn!(
        requested = sample_rate,
        using = fallback.sample_rate().0,
        "requested sample rate unsupported, using device default"
    );
    Ok(fallback)
}
